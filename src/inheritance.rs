/// Class inheritance resolution.
///
/// Collects the callable surface of a class the way PHP reflection sees
/// it: the class's own methods, then methods copied in from traits, then
/// everything inherited up the `extends` chain, and finally (for abstract
/// classes) methods declared only on implemented interfaces.  PHP method
/// names are case-insensitive, so a name seen at a higher-precedence level
/// hides every later declaration of it:
///
///   class own > traits > parent chain > interfaces
///
/// Ancestors that cannot be loaded end the walk for that branch; the
/// members found so far are still returned.
use std::collections::HashSet;

use crate::registry::TypeRegistry;
use crate::types::{ClassInfo, MethodInfo, Visibility};
use crate::util::normalize_class_name;

/// Depth limit for `extends` chains and trait composition, guarding
/// against circular declarations.
pub(crate) const MAX_DEPTH: u32 = 20;

/// A method together with the class PHP reports as its declaring class.
///
/// Trait methods are declared by the class that uses the trait.
#[derive(Debug, Clone)]
pub struct InheritedMethod {
    /// FQN without a leading `\`.
    pub declaring_class: String,
    pub method: MethodInfo,
}

/// All public methods visible on `class`, in precedence order.
pub fn collect_public_methods(
    class: &ClassInfo,
    registry: &dyn TypeRegistry,
) -> Vec<InheritedMethod> {
    let mut collector = Collector {
        registry,
        seen: HashSet::new(),
        out: Vec::new(),
    };

    let mut current = class.clone();
    let mut visited = HashSet::new();
    let mut depth = 0;

    loop {
        let fqn = current.fqn();
        if !visited.insert(fqn.to_ascii_lowercase()) {
            break;
        }

        collector.take(&fqn, &current.methods);
        collector.merge_traits(&fqn, &current.used_traits, 0);

        depth += 1;
        if depth > MAX_DEPTH {
            break;
        }
        let Some(parent_name) = current.parent_class.as_deref() else {
            break;
        };
        match registry.find_class(parent_name) {
            Ok(parent) => current = (*parent).clone(),
            Err(e) => {
                tracing::debug!(class = %fqn, parent = parent_name, error = %e, "parent not loadable");
                break;
            }
        }
    }

    for interface in all_interfaces(class, registry) {
        if let Ok(info) = registry.find_class(&interface) {
            collector.take(&info.fqn(), &info.methods);
        }
    }

    collector.out
}

/// Every interface `class` implements, directly, through its parents, or
/// through interface inheritance.  Names have no leading `\`; order is
/// discovery order without duplicates.
pub fn all_interfaces(class: &ClassInfo, registry: &dyn TypeRegistry) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    let mut current = class.clone();
    let mut depth = 0;
    loop {
        pending.extend(current.interfaces.iter().cloned());
        depth += 1;
        if depth > MAX_DEPTH {
            break;
        }
        let Some(parent) = current
            .parent_class
            .as_deref()
            .and_then(|name| registry.find_class(name).ok())
        else {
            break;
        };
        current = (*parent).clone();
    }

    // Breadth-first over `interface X extends Y`.
    let mut index = 0;
    while index < pending.len() {
        let name = normalize_class_name(&pending[index]).to_string();
        index += 1;
        if found.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
            continue;
        }
        if let Ok(info) = registry.find_class(&name) {
            pending.extend(info.interfaces.iter().cloned());
        }
        found.push(name);
    }

    found
}

/// Whether `class` implements `interface` (given with or without `\`).
pub fn implements_interface(
    class: &ClassInfo,
    interface: &str,
    registry: &dyn TypeRegistry,
) -> bool {
    let interface = normalize_class_name(interface);
    all_interfaces(class, registry)
        .iter()
        .any(|i| i.eq_ignore_ascii_case(interface))
}

struct Collector<'r> {
    registry: &'r dyn TypeRegistry,
    /// Lower-cased method names already claimed.
    seen: HashSet<String>,
    out: Vec<InheritedMethod>,
}

impl Collector<'_> {
    /// Claim every method name in `methods`; keep only the public ones.
    ///
    /// Non-public methods still claim their name so an inherited public
    /// method of the same name does not leak through.
    fn take(&mut self, declaring_class: &str, methods: &[MethodInfo]) {
        for method in methods {
            if !self.seen.insert(method.name.to_ascii_lowercase()) {
                continue;
            }
            if method.visibility != Visibility::Public {
                continue;
            }
            self.out.push(InheritedMethod {
                declaring_class: declaring_class.to_string(),
                method: method.clone(),
            });
        }
    }

    /// Merge methods from `trait_names` as if declared on `using_class`.
    /// Traits can use other traits; the used trait's methods rank below
    /// the using trait's own.
    fn merge_traits(&mut self, using_class: &str, trait_names: &[String], depth: u32) {
        if depth > MAX_DEPTH {
            return;
        }
        for trait_name in trait_names {
            let trait_info = match self.registry.find_class(trait_name) {
                Ok(t) => t,
                Err(e) => {
                    tracing::debug!(class = using_class, r#trait = %trait_name, error = %e, "trait not loadable");
                    continue;
                }
            };
            self.take(using_class, &trait_info.methods);
            self.merge_traits(using_class, &trait_info.used_traits, depth + 1);
        }
    }
}
