/// `use` statement extraction.
///
/// Builds the mapping of short (imported) names to their fully-qualified
/// equivalents that type hints and docblock types are resolved against.
use std::collections::HashMap;

use mago_syntax::ast::*;

use crate::util::short_name;

/// Extract individual use items from a `UseItems` node.
///
/// Function and constant imports are skipped; only class-like imports
/// affect type hint resolution.
pub(crate) fn extract_use_items(items: &UseItems, use_map: &mut HashMap<String, String>) {
    match items {
        UseItems::Sequence(seq) => {
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedSequence(seq) => {
            if seq.r#type.is_function() || seq.r#type.is_const() {
                return;
            }
            for item in seq.items.iter() {
                register_use_item(item, None, use_map);
            }
        }
        UseItems::TypedList(list) => {
            if list.r#type.is_function() || list.r#type.is_const() {
                return;
            }
            let prefix = list.namespace.value();
            for item in list.items.iter() {
                register_use_item(item, Some(prefix), use_map);
            }
        }
        UseItems::MixedList(list) => {
            let prefix = list.namespace.value();
            for maybe_typed in list.items.iter() {
                if let Some(ref t) = maybe_typed.r#type
                    && (t.is_function() || t.is_const())
                {
                    continue;
                }
                register_use_item(&maybe_typed.item, Some(prefix), use_map);
            }
        }
    }
}

/// Register a single `UseItem` into the use_map.
///
/// If `group_prefix` is `Some`, the item name is relative to that prefix
/// (e.g. for `use Foo\{Bar}`, prefix is `"Foo"` and item name is `"Bar"`,
/// giving FQN `"Foo\Bar"`).
fn register_use_item(
    item: &UseItem,
    group_prefix: Option<&str>,
    use_map: &mut HashMap<String, String>,
) {
    let item_name = item.name.value();

    let fqn = match group_prefix {
        Some(prefix) => format!("{}\\{}", prefix.trim_end_matches('\\'), item_name),
        None => item_name.to_string(),
    };
    let fqn = fqn.trim_start_matches('\\').to_string();

    let alias_name = match item.alias {
        Some(ref alias) => alias.identifier.value.to_string(),
        None => short_name(&fqn).to_string(),
    };

    use_map.insert(alias_name, fqn);
}
