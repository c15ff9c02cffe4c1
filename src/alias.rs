/// An alias (facade) and the callable surface it republishes.
///
/// Members are collected in a fixed order, and the first member found
/// under a given signature key is the one that is kept:
///
/// 1. the target class's own public methods (including traits and
///    inherited methods), added by [`Alias::new`];
/// 2. the public methods of each extra type, in configured order;
/// 3. the public methods of the concrete classes mapped to interfaces the
///    target implements (capabilities);
/// 4. synthesized members: `@method` tags on the target's class docblocks,
///    then the configured magic members.  A synthesized member never
///    replaces an existing member with the same name.
///
/// Any failure to introspect the target or an extra type makes the alias
/// invalid.  Invalid aliases are skipped by the generator; the reason is
/// kept for diagnostics.
use std::sync::Arc;

use indexmap::IndexMap;

use crate::docblock;
use crate::error::RegistryError;
use crate::inheritance;
use crate::method::{InterfaceMap, Method};
use crate::registry::TypeRegistry;
use crate::types::{ClassInfo, ClassLikeKind, MethodInfo, Visibility};
use crate::util::{namespace_of, normalize_class_name, short_name};

/// A configured magic member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MagicSpec {
    /// A parameter list such as `$key, $default = null`; the member
    /// forwards to the target class under its own name.
    Params(String),
    /// `Class::method`: copy the parameters and documentation of a real
    /// method and forward to it.
    Forward { class: String, method: String },
}

impl MagicSpec {
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if !spec.contains('$')
            && let Some((class, method)) = spec.rsplit_once("::")
            && !class.is_empty()
            && !method.is_empty()
        {
            return MagicSpec::Forward {
                class: normalize_class_name(class).to_string(),
                method: method.trim().to_string(),
            };
        }
        MagicSpec::Params(spec.to_string())
    }
}

#[derive(Debug)]
pub struct Alias {
    name: String,
    /// Target FQN without a leading `\`.
    target: String,
    target_info: Option<Arc<ClassInfo>>,
    members: IndexMap<String, Method>,
    extra_types: Vec<String>,
    capabilities: Vec<String>,
    interfaces: InterfaceMap,
    skip_reason: Option<String>,
}

impl Alias {
    /// Resolve `target` and collect its members.  Never fails: a target
    /// that cannot be introspected yields an invalid alias.
    pub fn new(
        name: &str,
        target: &str,
        registry: &dyn TypeRegistry,
        interfaces: &InterfaceMap,
    ) -> Self {
        let mut alias = Self {
            name: name.trim().to_string(),
            target: normalize_class_name(target).to_string(),
            target_info: None,
            members: IndexMap::new(),
            extra_types: Vec::new(),
            capabilities: Vec::new(),
            interfaces: interfaces.clone(),
            skip_reason: None,
        };

        let info = match registry.find_class(&alias.target) {
            Ok(info) => info,
            Err(e) => {
                alias.invalidate(&e);
                return alias;
            }
        };

        if let Some(kind) = non_class_kind(info.kind) {
            alias.invalidate(&RegistryError::NotAClass {
                class: alias.target.clone(),
                kind,
            });
            return alias;
        }

        alias.capabilities = interfaces
            .keys()
            .filter(|iface| inheritance::implements_interface(&info, iface, registry))
            .cloned()
            .collect();

        alias.collect_members(&info, registry);
        alias.target_info = Some(info);
        alias
    }

    /// Build a complete alias: target, extras, capabilities, magic.
    pub fn build(
        name: &str,
        target: &str,
        extras: &[String],
        magic: &IndexMap<String, MagicSpec>,
        registry: &dyn TypeRegistry,
        interfaces: &InterfaceMap,
    ) -> Self {
        let mut alias = Self::new(name, target, registry, interfaces);
        for extra in extras {
            if !alias.is_valid() {
                break;
            }
            alias.add_members_from(extra, registry);
        }
        if alias.is_valid() {
            alias.add_capability_members(registry);
            alias.add_magic_members(magic, registry);
        }
        alias
    }

    /// Merge the public members of `type_name`.  Keys already present win.
    /// Failure to introspect the type invalidates the alias.
    pub fn add_members_from(&mut self, type_name: &str, registry: &dyn TypeRegistry) {
        if !self.is_valid() {
            return;
        }
        match registry.find_class(type_name) {
            Ok(info) => {
                self.extra_types.push(info.fqn());
                self.collect_members(&info, registry);
            }
            Err(e) => self.invalidate(&e),
        }
    }

    /// Merge the members of the concrete classes mapped to the target's
    /// capabilities.  A mapped class that cannot be loaded is skipped.
    pub fn add_capability_members(&mut self, registry: &dyn TypeRegistry) {
        let concrete: Vec<String> = self
            .capabilities
            .iter()
            .filter_map(|iface| self.interfaces.get(iface).cloned())
            .collect();

        for class in concrete {
            match registry.find_class(&class) {
                Ok(info) => self.collect_members(&info, registry),
                Err(e) => {
                    tracing::debug!(alias = %self.name, class = %class, error = %e, "capability class not loadable")
                }
            }
        }
    }

    /// Add synthesized members: the target's `@method` tags, then the
    /// configured `specs`.  Names already present are left alone.
    pub fn add_magic_members(
        &mut self,
        specs: &IndexMap<String, MagicSpec>,
        registry: &dyn TypeRegistry,
    ) {
        let Some(target) = self.target_info.clone() else {
            return;
        };

        let mut current = Some(target.clone());
        let mut depth = 0;
        while let Some(class) = current.take() {
            if let Some(doc) = &class.docblock {
                for info in docblock::extract_method_tags(doc) {
                    self.add_synthesized(&info.name, &info, &class.fqn(), &target.fqn());
                }
            }
            depth += 1;
            if depth > inheritance::MAX_DEPTH {
                break;
            }
            current = class
                .parent_class
                .as_deref()
                .and_then(|p| registry.find_class(p).ok());
        }

        for (name, spec) in specs {
            match spec {
                MagicSpec::Params(params) => {
                    let info = MethodInfo {
                        name: name.clone(),
                        parameters: docblock::parse_param_list(params),
                        return_type: None,
                        is_static: true,
                        visibility: Visibility::Public,
                        docblock: None,
                    };
                    let fqn = target.fqn();
                    self.add_synthesized(name, &info, &fqn, &fqn);
                }
                MagicSpec::Forward { class, method } => {
                    let Ok(info) = registry.find_class(class) else {
                        tracing::debug!(alias = %self.name, class = %class, "magic member class not found");
                        continue;
                    };
                    let found = inheritance::collect_public_methods(&info, registry)
                        .into_iter()
                        .find(|m| m.method.name.eq_ignore_ascii_case(method));
                    match found {
                        Some(m) => {
                            self.add_synthesized(name, &m.method, &m.declaring_class, &info.fqn())
                        }
                        None => {
                            tracing::debug!(alias = %self.name, class = %class, method = %method, "magic member method not found")
                        }
                    }
                }
            }
        }
    }

    fn add_synthesized(&mut self, name: &str, info: &MethodInfo, declaring: &str, root: &str) {
        if self.has_member_named(name) {
            return;
        }
        let method = Method::synthesized(name, info, declaring, root, &self.interfaces);
        self.members.insert(method.signature_key(), method);
    }

    /// Insert the public methods of `class` (with traits and ancestors)
    /// under their signature keys, keeping existing entries.
    fn collect_members(&mut self, class: &ClassInfo, registry: &dyn TypeRegistry) {
        let root = class.fqn();
        tracing::debug!(alias = %self.name, class = %root, "collecting members");

        for inherited in inheritance::collect_public_methods(class, registry) {
            // Constructors and other magic methods are not forwarded.
            if inherited.method.name.starts_with("__") {
                continue;
            }
            let method = Method::reflected(
                &inherited.method,
                &inherited.declaring_class,
                &root,
                &self.interfaces,
            );
            self.members.entry(method.signature_key()).or_insert(method);
        }
    }

    fn has_member_named(&self, name: &str) -> bool {
        self.members
            .values()
            .any(|m| m.name().eq_ignore_ascii_case(name))
    }

    fn invalidate(&mut self, error: &RegistryError) {
        tracing::debug!(alias = %self.name, error = %error, "alias invalid");
        self.skip_reason = Some(error.to_string());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target FQN without a leading `\`.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_valid(&self) -> bool {
        self.skip_reason.is_none()
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    /// Namespace of the target, empty for the root namespace.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.target)
    }

    /// The alias name without any namespace.
    pub fn short_name(&self) -> &str {
        short_name(&self.name)
    }

    /// Members in discovery order.
    pub fn members(&self) -> impl Iterator<Item = &Method> {
        self.members.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// FQNs of the extra types merged in, in order.
    pub fn extra_types(&self) -> &[String] {
        &self.extra_types
    }

    /// Configured interfaces the target implements.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }
}

fn non_class_kind(kind: ClassLikeKind) -> Option<&'static str> {
    match kind {
        ClassLikeKind::Interface => Some("an interface"),
        ClassLikeKind::Trait => Some("a trait"),
        ClassLikeKind::Class | ClassLikeKind::Enum => None,
    }
}
