/// PHP parsing and AST extraction.
///
/// This module contains the logic for parsing PHP source text using the
/// mago_syntax parser and extracting class information (methods with their
/// parameters, defaults and docblocks) from the resulting AST.
///
/// Sub-modules:
/// - [`classes`]: Class, interface, trait, and enum extraction
/// - [`use_statements`]: `use` statement extraction
/// - [`names`]: Name resolution of type hints to fully-qualified names
mod classes;
mod names;
mod use_statements;

use mago_span::HasSpan;
use mago_syntax::ast::*;

use crate::types::*;

pub use names::{resolve_name, resolve_type_string};

/// Context for reading docblocks and source slices while walking the AST.
///
/// Bundles the program's trivia (comments/whitespace) and the raw source
/// text so that extraction functions can look up the `/** ... */` comment
/// preceding any AST node and copy default-value expressions verbatim.
pub(crate) struct DocblockCtx<'a> {
    pub trivias: &'a [Trivia<'a>],
    pub content: &'a str,
}

/// Extract a string representation of a type hint from the AST.
pub(crate) fn extract_hint_string(hint: &Hint) -> String {
    match hint {
        Hint::Identifier(ident) => ident.value().to_string(),
        Hint::Nullable(nullable) => {
            format!("?{}", extract_hint_string(nullable.hint))
        }
        Hint::Union(union) => {
            let left = extract_hint_string(union.left);
            let right = extract_hint_string(union.right);
            format!("{}|{}", left, right)
        }
        Hint::Intersection(intersection) => {
            let left = extract_hint_string(intersection.left);
            let right = extract_hint_string(intersection.right);
            format!("{}&{}", left, right)
        }
        Hint::Void(ident)
        | Hint::Never(ident)
        | Hint::Float(ident)
        | Hint::Bool(ident)
        | Hint::Integer(ident)
        | Hint::String(ident)
        | Hint::Object(ident)
        | Hint::Mixed(ident)
        | Hint::Iterable(ident) => ident.value.to_string(),
        Hint::Null(keyword)
        | Hint::True(keyword)
        | Hint::False(keyword)
        | Hint::Array(keyword)
        | Hint::Callable(keyword)
        | Hint::Static(keyword)
        | Hint::Self_(keyword)
        | Hint::Parent(keyword) => keyword.value.to_string(),
        Hint::Parenthesized(paren) => {
            format!("({})", extract_hint_string(paren.hint))
        }
    }
}

/// Extract parameter information from a method's parameter list.
pub(crate) fn extract_parameters(
    parameter_list: &FunctionLikeParameterList,
    content: &str,
) -> Vec<ParameterInfo> {
    parameter_list
        .parameters
        .iter()
        .map(|param| {
            let name = param.variable.name.to_string();
            let is_variadic = param.ellipsis.is_some();
            let is_reference = param.ampersand.is_some();
            let default = param
                .default_value
                .as_ref()
                .map(|d| classify_default(&d.value, content));

            let type_hint = param.hint.as_ref().map(|h| extract_hint_string(h));

            ParameterInfo {
                name,
                type_hint,
                is_variadic,
                is_reference,
                default,
            }
        })
        .collect()
}

/// Decide whether a default value expression can be written back as
/// source text, and if so copy that text.
fn classify_default(expr: &Expression, content: &str) -> DefaultValue {
    if !is_constant_expression(expr) {
        return DefaultValue::Opaque;
    }
    let span = expr.span();
    match content.get(span.start.offset as usize..span.end.offset as usize) {
        Some(text) if !text.trim().is_empty() => DefaultValue::Literal(text.trim().to_string()),
        _ => DefaultValue::Opaque,
    }
}

fn is_constant_expression(expr: &Expression) -> bool {
    match expr {
        Expression::Literal(_) => true,
        Expression::ConstantAccess(_) => true,
        Expression::Access(Access::ClassConstant(_)) => true,
        Expression::Parenthesized(p) => is_constant_expression(p.expression),
        Expression::UnaryPrefix(u) => matches!(u.operand, Expression::Literal(_)),
        Expression::Array(arr) => arr.elements.iter().all(is_constant_element),
        Expression::LegacyArray(arr) => arr.elements.iter().all(is_constant_element),
        _ => false,
    }
}

fn is_constant_element(elem: &ArrayElement) -> bool {
    match elem {
        ArrayElement::KeyValue(kv) => {
            is_constant_expression(kv.key) && is_constant_expression(kv.value)
        }
        ArrayElement::Value(v) => is_constant_expression(v.value),
        ArrayElement::Variadic(_) | ArrayElement::Missing(_) => false,
    }
}

/// Extract visibility from a set of modifiers.
/// Defaults to `Public` if no visibility modifier is present.
pub(crate) fn extract_visibility<'a>(
    modifiers: impl Iterator<Item = &'a Modifier<'a>>,
) -> Visibility {
    for m in modifiers {
        if m.is_private() {
            return Visibility::Private;
        }
        if m.is_protected() {
            return Visibility::Protected;
        }
        if m.is_public() {
            return Visibility::Public;
        }
    }
    Visibility::Public
}

/// Parse PHP source text and extract class information.
///
/// Returns a `ClassInfo` for every class-like declaration in the file, with
/// its namespace recorded and every class reference (parents, interfaces,
/// traits, type hints) resolved to a fully-qualified name.
///
/// The mago parser can panic on malformed input; a panic is caught, logged,
/// and yields an empty result so one broken file never aborts a run.
pub fn parse_php(content: &str) -> Vec<ClassInfo> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let arena = bumpalo::Bump::new();
        let file_id = mago_database::file::FileId::new("input.php");
        let program = mago_syntax::parser::parse_file_content(&arena, file_id, content);

        let doc_ctx = DocblockCtx {
            trivias: program.trivia.as_slice(),
            content,
        };

        let mut classes = Vec::new();
        classes::extract_from_program(program.statements.iter(), &mut classes, &doc_ctx);
        classes
    }));

    match result {
        Ok(classes) => classes,
        Err(_) => {
            tracing::error!("phpantom-stubgen: parser panicked in parse_php");
            Vec::new()
        }
    }
}
