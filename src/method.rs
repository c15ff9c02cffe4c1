/// One callable member of an alias, ready to be rendered.
///
/// A `Method` is built once from a registry [`MethodInfo`] and never
/// changes afterwards.  It knows two classes:
///
/// - the **declaring class**, where PHP says the method lives (for an
///   inherited method, the ancestor; for a trait method, the class using
///   the trait);
/// - the **root class**, the class the method was collected through,
///   which is what the stub forwards the call to.
///
/// Both are returned in absolute form (`\App\Foo`).
use indexmap::IndexMap;

use crate::docblock::types::map_type_words;
use crate::docblock::{self, ParamTag};
use crate::parameter::Parameter;
use crate::types::MethodInfo;
use crate::util::{absolute_class_name, normalize_class_name};

/// Interface → concrete class substitutions applied to documented types.
/// Keys are absolute interface names (`\Foo\BarInterface`).
pub type InterfaceMap = IndexMap<String, String>;

/// Where a member came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Declared in source on the target (or an extra, or an ancestor).
    Reflected,
    /// Exists only through `__callStatic`: a class `@method` tag or a
    /// configured magic member.
    Synthesized,
}

#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    /// Name called on the root class; differs from `name` for magic
    /// members that forward to a differently named method.
    real_name: String,
    declaring_class: String,
    root_class: String,
    parameters: Vec<Parameter>,
    return_type: Option<String>,
    return_description: String,
    is_static: bool,
    summary: String,
    description: String,
    origin: Origin,
}

impl Method {
    /// A member reflected from `declaring_class`, collected through
    /// `root_class`.
    pub fn reflected(
        info: &MethodInfo,
        declaring_class: &str,
        root_class: &str,
        interfaces: &InterfaceMap,
    ) -> Self {
        Self::build(
            info,
            &info.name,
            declaring_class,
            root_class,
            Origin::Reflected,
            interfaces,
        )
    }

    /// A synthesized member named `name` that forwards to `info` on
    /// `root_class`.
    pub fn synthesized(
        name: &str,
        info: &MethodInfo,
        declaring_class: &str,
        root_class: &str,
        interfaces: &InterfaceMap,
    ) -> Self {
        Self::build(
            info,
            name,
            declaring_class,
            root_class,
            Origin::Synthesized,
            interfaces,
        )
    }

    fn build(
        info: &MethodInfo,
        name: &str,
        declaring_class: &str,
        root_class: &str,
        origin: Origin,
        interfaces: &InterfaceMap,
    ) -> Self {
        let doc = info.docblock.as_deref().unwrap_or("");
        let (summary, description) = docblock::extract_text(doc);
        let param_tags = docblock::extract_param_tags(doc);
        let return_tag = docblock::extract_return_tag(doc);

        let substitute = |t: &str| substitute_interfaces(t, interfaces);

        let parameters = info
            .parameters
            .iter()
            .map(|p| {
                let tag: Option<&ParamTag> = param_tags.iter().find(|t| t.name == p.name);
                let mut param = Parameter::new(p, declaring_class, tag);
                param.map_doc_type(substitute);
                param
            })
            .collect();

        let (return_type, return_description) = match return_tag {
            Some(tag) => (Some(tag.type_str), tag.description),
            None => (info.return_type.clone(), String::new()),
        };
        let return_type = return_type
            .filter(|t| !t.is_empty())
            .map(|t| substitute(&resolve_this(&t, root_class)));

        Self {
            name: name.to_string(),
            real_name: info.name.clone(),
            declaring_class: absolute_class_name(declaring_class),
            root_class: absolute_class_name(root_class),
            parameters,
            return_type,
            return_description,
            is_static: info.is_static,
            summary,
            description,
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn real_name(&self) -> &str {
        &self.real_name
    }

    /// Absolute FQN of the class that declares the member.
    pub fn declaring_class(&self) -> &str {
        &self.declaring_class
    }

    /// Absolute FQN of the class the member was collected through.
    pub fn root_class(&self) -> &str {
        &self.root_class
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn return_description(&self) -> &str {
        &self.return_description
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Whether the declaring class is a different class than the root,
    /// i.e. the member was inherited.
    pub fn is_inherited(&self) -> bool {
        !self.declaring_class.eq_ignore_ascii_case(&self.root_class)
    }

    /// Each parameter rendered in declared order.
    pub fn params(&self, with_default: bool) -> Vec<String> {
        self.parameters
            .iter()
            .map(|p| p.render(with_default))
            .collect()
    }

    /// [`params`](Self::params) joined with `", "`.
    pub fn params_joined(&self, with_default: bool) -> String {
        self.params(with_default).join(", ")
    }

    /// False only when the return type is explicitly `void`.  An unknown
    /// return type still returns.
    pub fn should_return(&self) -> bool {
        !self
            .return_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("void"))
    }

    /// Signature key for deduplication: lower-cased name followed by the
    /// documented type of each parameter.
    pub fn signature_key(&self) -> String {
        let mut key = self.name.to_ascii_lowercase();
        key.push('(');
        let types: Vec<&str> = self.parameters.iter().map(|p| p.doc_type()).collect();
        key.push_str(&types.join(","));
        key.push(')');
        key
    }

    /// The documentation block for this member, each line prefixed with
    /// `indent`.
    ///
    /// ```text
    /// /**
    ///  * Summary
    ///  *
    ///  * @param string $last
    ///  * @return string
    ///  */
    /// ```
    ///
    /// The block shape never depends on what is missing: an empty summary
    /// still produces its ` * ` line, every parameter gets a `@param` line
    /// (`@param  $name ` when nothing is known), and every tag line keeps
    /// its separator space even when the description is empty.
    /// `@return` appears when the member returns and a type is known.
    pub fn doc_comment(&self, indent: &str) -> String {
        let mut text = self.summary.clone();
        if !self.description.is_empty() {
            text.push_str("\n\n");
            text.push_str(&self.description);
        }

        let mut out = format!("{indent}/**\n");
        for line in text.split('\n') {
            out.push_str(&format!("{indent} * {line}\n"));
        }
        out.push_str(&format!("{indent} *\n"));

        for param in &self.parameters {
            out.push_str(&format!(
                "{indent} * @param {} ${} {}\n",
                param.doc_type(),
                param.name(),
                param.description()
            ));
        }

        if self.should_return()
            && let Some(return_type) = &self.return_type
        {
            out.push_str(&format!(
                "{indent} * @return {} {}\n",
                return_type, self.return_description
            ));
        }

        out.push_str(&format!("{indent} */"));
        out
    }
}

/// `$this`, `self` and `static` in a return type mean the root class.
fn resolve_this(type_str: &str, root_class: &str) -> String {
    map_type_words(type_str, |word| {
        (word == "$this" || word.eq_ignore_ascii_case("self") || word.eq_ignore_ascii_case("static"))
            .then(|| absolute_class_name(root_class))
    })
}

/// Replace configured interface names with their concrete class.
fn substitute_interfaces(type_str: &str, interfaces: &InterfaceMap) -> String {
    if interfaces.is_empty() {
        return type_str.to_string();
    }
    map_type_words(type_str, |word| {
        let word = normalize_class_name(word);
        interfaces
            .iter()
            .find(|(iface, _)| normalize_class_name(iface).eq_ignore_ascii_case(word))
            .map(|(_, concrete)| absolute_class_name(concrete))
    })
}
