//! The `json` format: a light index of every alias's members and their
//! parameter lists.  Doc comments are not included.
//!
//! ```json
//! {
//!   "DB": {
//!     "functions": {
//!       "connection": "($name = null)"
//!     }
//!   }
//! }
//! ```

use serde_json::{Map, Value, json};

use super::{NamespaceGroups, RenderOptions};

pub(super) fn render(groups: &NamespaceGroups<'_>, _options: &RenderOptions) -> String {
    let mut classes = Map::new();

    for alias in groups.values().flatten() {
        let mut functions = Map::new();
        for method in alias.members() {
            functions
                .entry(method.name())
                .or_insert_with(|| Value::String(format!("({})", method.params_joined(true))));
        }
        classes
            .entry(alias.short_name())
            .or_insert_with(|| json!({ "functions": functions }));
    }

    format!("{:#}", Value::Object(classes))
}
