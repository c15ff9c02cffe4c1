/// A single formal parameter, ready to be rendered into a stub.
///
/// Built from a registry [`ParameterInfo`] plus the `@param` tag that
/// documents it, if any.  Construction never fails: anything missing
/// simply stays `None`/`false`.
///
/// # Default values
///
/// A default that was found in source as a constant expression
/// ([`DefaultValue::Literal`]) is rendered back verbatim, so `'Barry'`
/// renders as `$first = 'Barry'`.  A default that cannot be written as a
/// literal ([`DefaultValue::Opaque`], e.g. `new Collection()` or a
/// function call) is rendered as `= null`.  Only the fact that the
/// parameter is optional survives; its value is lost.  This applies to
/// every opaque default, whatever the parameter's type.
use crate::docblock::types::map_type_words;
use crate::docblock::{ParamTag, is_nullable_type};
use crate::types::{DefaultValue, ParameterInfo};
use crate::util::absolute_class_name;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Name without the `$` sigil.
    name: String,
    type_hint: Option<String>,
    default: Option<DefaultValue>,
    is_variadic: bool,
    is_reference: bool,
    is_nullable: bool,
    /// Type from the `@param` tag, if the tag gives one.
    doc_type: Option<String>,
    description: String,
}

impl Parameter {
    /// Build a parameter.  `owner` is the FQN of the type declaring the
    /// member; `self` and `static` in the hints resolve to it.
    pub fn new(info: &ParameterInfo, owner: &str, tag: Option<&ParamTag>) -> Self {
        let type_hint = info
            .type_hint
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| resolve_self(t, owner));
        let doc_type = tag
            .map(|t| t.type_str.as_str())
            .filter(|t| !t.is_empty())
            .map(|t| resolve_self(t, owner));

        let null_default = matches!(
            &info.default,
            Some(DefaultValue::Literal(lit)) if lit.eq_ignore_ascii_case("null")
        );
        let is_nullable = null_default || type_hint.as_deref().is_some_and(is_nullable_type);

        Self {
            name: info.name.trim_start_matches('$').to_string(),
            type_hint,
            default: info.default.clone(),
            is_variadic: info.is_variadic,
            is_reference: info.is_reference,
            is_nullable,
            doc_type,
            description: tag.map(|t| t.description.clone()).unwrap_or_default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn is_nullable(&self) -> bool {
        self.is_nullable
    }

    pub fn is_optional(&self) -> bool {
        self.has_default() || self.is_variadic
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The type written on the `@param` line: the documented type, else
    /// the native hint, else empty.
    pub fn doc_type(&self) -> &str {
        self.doc_type
            .as_deref()
            .or(self.type_hint.as_deref())
            .unwrap_or("")
    }

    /// Rewrite the documented type (or the hint standing in for it).
    pub(crate) fn map_doc_type(&mut self, f: impl Fn(&str) -> String) {
        let current = self.doc_type();
        if !current.is_empty() {
            self.doc_type = Some(f(current));
        }
    }

    /// Render as it appears in a parameter list.
    ///
    /// `...$name` for variadics (which never carry a default), `&$name`
    /// for by-reference parameters, `$name` otherwise.  A by-reference
    /// variadic keeps both markers: `&...$name`.  With
    /// `with_default`, a declared default is appended as ` = <literal>`
    /// (` = null` for opaque defaults, see the type docs).
    pub fn render(&self, with_default: bool) -> String {
        let mut out = String::new();
        if self.is_reference {
            out.push('&');
        }
        if self.is_variadic {
            out.push_str("...$");
            out.push_str(&self.name);
            return out;
        }
        out.push('$');
        out.push_str(&self.name);

        if with_default && let Some(default) = &self.default {
            out.push_str(" = ");
            match default {
                DefaultValue::Literal(lit) => out.push_str(lit),
                DefaultValue::Opaque => out.push_str("null"),
            }
        }
        out
    }
}

/// Replace `self`/`static` words in a type with the owner's absolute FQN.
fn resolve_self(type_str: &str, owner: &str) -> String {
    map_type_words(type_str, |word| {
        (word.eq_ignore_ascii_case("self") || word.eq_ignore_ascii_case("static"))
            .then(|| absolute_class_name(owner))
    })
}
