//! Data types produced by the PHP introspection layer.
//!
//! This module contains the "model" structs and enums that represent
//! extracted PHP information (classes, methods, parameters).  All data is
//! owned so nothing depends on the parser's arena lifetime; these are the
//! values a [`crate::registry::TypeRegistry`] hands out.

/// Visibility of a class member.
///
/// In PHP, members without an explicit visibility modifier default to `Public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// The syntactic kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassLikeKind {
    #[default]
    Class,
    Interface,
    Trait,
    Enum,
}

/// A parameter default value as found in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// A default that can be written back verbatim as PHP source text:
    /// booleans, numbers, strings, `null`, array literals of such values,
    /// and constant / class-constant references (e.g. `'Barry'`, `-1`,
    /// `[]`, `PHP_INT_MAX`, `Status::Active`).
    Literal(String),
    /// A default whose value cannot be re-expressed as a constant literal
    /// (e.g. `new Foo()`, a function call, an arithmetic expression).
    Opaque,
}

/// Stores extracted parameter information from a parsed PHP method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// The parameter name including the `$` prefix (e.g. "$text").
    pub name: String,
    /// Optional type hint string, resolved to a fully-qualified name for
    /// class-like types (e.g. "string", "?int", "\\App\\User").
    pub type_hint: Option<String>,
    /// Whether this parameter is variadic (has `...`).
    pub is_variadic: bool,
    /// Whether this parameter is passed by reference (has `&`).
    pub is_reference: bool,
    /// The default value, if one is declared.
    pub default: Option<DefaultValue>,
}

/// Stores extracted method information from a parsed PHP class.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    /// The method name (e.g. "updateText").
    pub name: String,
    /// The parameters of the method, in declaration order.
    pub parameters: Vec<ParameterInfo>,
    /// Native return type hint (e.g. "void", "string", "?int").
    pub return_type: Option<String>,
    /// Whether the method is static.
    pub is_static: bool,
    /// Visibility of the method (public, protected, or private).
    pub visibility: Visibility,
    /// Raw `/** ... */` docblock text preceding the method, if any.
    pub docblock: Option<String>,
}

/// Stores extracted class information from a parsed PHP file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassInfo {
    /// Whether this is a class, interface, trait, or enum.
    pub kind: ClassLikeKind,
    /// The short name of the class (e.g. "User").
    pub name: String,
    /// The namespace the class is declared in, without leading or trailing
    /// `\` (e.g. "App\\Models").  `None` for the global namespace.
    pub namespace: Option<String>,
    /// The methods defined directly in this class.
    pub methods: Vec<MethodInfo>,
    /// Fully-qualified parent class name from the `extends` clause.
    pub parent_class: Option<String>,
    /// Fully-qualified names of implemented (or, for interfaces, extended)
    /// interfaces.
    pub interfaces: Vec<String>,
    /// Fully-qualified names of traits used via `use TraitName;`.
    pub used_traits: Vec<String>,
    /// Raw class-level docblock text, if any.
    pub docblock: Option<String>,
}

impl ClassInfo {
    /// The fully-qualified name without a leading `\`.
    pub fn fqn(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}\\{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}
