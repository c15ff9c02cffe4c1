/// Name resolution.
///
/// Converts class names written in source (`Builder`, `Query\Builder`,
/// `\Foo`) into fully-qualified names using the file's `use` map and the
/// enclosing namespace, following PHP's resolution rules.  Type strings
/// (unions, nullables, generics, array shapes) are rewritten token by
/// token so that stubs rendered in a different namespace stay correct.
use std::collections::HashMap;

use crate::docblock::split_params;
use crate::docblock::types::{is_scalar, split_type_token};
use crate::types::{ClassInfo, DefaultValue};

/// Keywords that should never be resolved as class names.
const TYPE_KEYWORDS: &[&str] = &[
    "self",
    "static",
    "parent",
    "$this",
    "mixed",
    "object",
    "void",
    "never",
    "null",
    "true",
    "false",
    "class-string",
    "list",
    "non-empty-list",
    "non-empty-array",
    "positive-int",
    "negative-int",
    "non-empty-string",
    "numeric-string",
    "array-key",
    "scalar",
    "numeric",
    "class",
    "callable",
    "key-of",
    "value-of",
    "is",
];

/// Resolve a class name to its fully-qualified form (without a leading
/// `\`) given a use_map and namespace context.
///
/// Rules (matching PHP name resolution):
///   1. Already fully-qualified (`\Foo\Bar`) → strip leading `\`
///   2. Qualified (`Foo\Bar`) → if first segment is in use_map, expand it;
///      otherwise prepend current namespace
///   3. Unqualified (`Bar`) → check use_map; otherwise prepend namespace
///   4. No namespace and not in use_map → keep as-is
pub fn resolve_name(
    name: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
) -> String {
    if let Some(stripped) = name.strip_prefix('\\') {
        return stripped.to_string();
    }

    if let Some(pos) = name.find('\\') {
        let first = &name[..pos];
        let rest = &name[pos..];
        if let Some(fqn) = use_map.get(first) {
            return format!("{}{}", fqn, rest);
        }
    } else if let Some(fqn) = use_map.get(name) {
        return fqn.clone();
    }

    match namespace {
        Some(ns) if !ns.is_empty() => format!("{}\\{}", ns, name),
        _ => name.to_string(),
    }
}

/// Resolve class-like identifiers within a type string to their
/// fully-qualified forms, each prefixed with `\`.
///
/// Handles unions (`A|B`), intersections (`A&B`), nullable (`?A`),
/// generics (`Collection<int, User>`), and array shapes
/// (`array{name: string, user: User}`).  Scalars, keywords and names in
/// `skip_names` (template parameters) are left untouched.
///
/// # Examples
/// - `"Builder"` → `"\\Illuminate\\Database\\Query\\Builder"` (via use map)
/// - `"?Builder"` → `"?\\Illuminate\\Database\\Query\\Builder"`
/// - `"int|string"` → `"int|string"`
pub fn resolve_type_string(
    type_str: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
    skip_names: &[String],
) -> String {
    let mut result = String::with_capacity(type_str.len() + 8);
    let chars: Vec<(usize, char)> = type_str.char_indices().collect();
    let len = chars.len();
    let offset = |i: usize| chars.get(i).map_or(type_str.len(), |&(o, _)| o);
    let mut i = 0;

    // Track brace depth so we can distinguish array shape keys
    // (identifiers before `:` inside `{…}`) from type names.
    let mut brace_depth: u32 = 0;
    let mut in_shape_key = false;

    while i < len {
        let c = chars[i].1;

        if starts_identifier(c) {
            let start = i;
            while i < len && (is_identifier_char(chars[i].1) || (chars[i].1 == '-' && i > start)) {
                i += 1;
            }
            let word = &type_str[offset(start)..offset(i)];

            if brace_depth > 0 && in_shape_key {
                result.push_str(word);
                continue;
            }

            let lower = word.to_ascii_lowercase();
            if is_scalar(word)
                || TYPE_KEYWORDS.contains(&lower.as_str())
                || skip_names.iter().any(|s| s == word)
            {
                result.push_str(word);
            } else {
                result.push('\\');
                result.push_str(&resolve_name(word, use_map, namespace));
            }
        } else if c == '$' {
            let start = i;
            i += 1;
            while i < len && is_identifier_char(chars[i].1) && chars[i].1 != '\\' {
                i += 1;
            }
            result.push_str(&type_str[offset(start)..offset(i)]);
        } else if c == '\'' || c == '"' {
            // Literal string types (`'foo'|'bar'`) are copied verbatim.
            let start = i;
            i += 1;
            while i < len && chars[i].1 != c {
                i += 1;
            }
            i = (i + 1).min(len);
            result.push_str(&type_str[offset(start)..offset(i)]);
        } else if c.is_ascii_digit() {
            let start = i;
            while i < len && (chars[i].1.is_ascii_alphanumeric() || chars[i].1 == '.') {
                i += 1;
            }
            result.push_str(&type_str[offset(start)..offset(i)]);
        } else {
            match c {
                '{' => {
                    brace_depth += 1;
                    in_shape_key = true;
                }
                '}' => {
                    brace_depth = brace_depth.saturating_sub(1);
                    in_shape_key = brace_depth > 0;
                }
                ':' if brace_depth > 0 => in_shape_key = false,
                ',' if brace_depth > 0 => in_shape_key = true,
                _ => {}
            }
            result.push(c);
            i += 1;
        }
    }

    result
}

/// PHP names may start with a letter, `_`, `\` or any byte above 0x7f.
fn starts_identifier(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '\\' || !c.is_ascii()
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\\' || !c.is_ascii()
}

/// Resolve every class reference of the classes declared in one namespace
/// scope: parents, interfaces, traits, native type hints, and the types
/// inside method docblocks.
pub(crate) fn resolve_class_names(
    classes: &mut [ClassInfo],
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
) {
    for class in classes.iter_mut() {
        class.parent_class = class
            .parent_class
            .as_ref()
            .map(|p| resolve_name(p, use_map, namespace));
        class.interfaces = class
            .interfaces
            .iter()
            .map(|i| resolve_name(i, use_map, namespace))
            .collect();
        class.used_traits = class
            .used_traits
            .iter()
            .map(|t| resolve_name(t, use_map, namespace))
            .collect();

        let template_params = class
            .docblock
            .as_deref()
            .map(template_names)
            .unwrap_or_default();

        let scope = ConstantScope {
            owner: match namespace {
                Some(ns) if !ns.is_empty() => format!("{}\\{}", ns, class.name),
                _ => class.name.clone(),
            },
            parent: class.parent_class.clone(),
        };

        for method in &mut class.methods {
            let mut skip = template_params.clone();
            if let Some(doc) = method.docblock.as_deref() {
                skip.extend(template_names(doc));
            }

            if let Some(ref ret) = method.return_type {
                method.return_type = Some(resolve_type_string(ret, use_map, namespace, &skip));
            }
            for param in &mut method.parameters {
                if let Some(ref hint) = param.type_hint {
                    param.type_hint = Some(resolve_type_string(hint, use_map, namespace, &skip));
                }
                if let Some(DefaultValue::Literal(ref lit)) = param.default {
                    param.default = Some(DefaultValue::Literal(resolve_class_constant(
                        lit, &scope, use_map, namespace,
                    )));
                }
            }
            if let Some(ref doc) = method.docblock {
                method.docblock = Some(resolve_docblock_types(doc, use_map, namespace, &skip));
            }
        }

        if let Some(ref doc) = class.docblock {
            class.docblock = Some(resolve_docblock_types(
                doc,
                use_map,
                namespace,
                &template_params,
            ));
        }
    }
}

/// The classes `self`/`static` and `parent` refer to inside a class body.
struct ConstantScope {
    owner: String,
    parent: Option<String>,
}

/// Qualify the class of a `Foo::BAR` default so it still resolves when
/// the stub is rendered in another namespace or class.  Anything else is
/// returned unchanged.
fn resolve_class_constant(
    literal: &str,
    scope: &ConstantScope,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
) -> String {
    let Some((class, constant)) = literal.split_once("::") else {
        return literal.to_string();
    };
    let is_name = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '\\')
    };
    if !is_name(class) || !is_name(constant) {
        return literal.to_string();
    }

    let resolved = if class.eq_ignore_ascii_case("self") || class.eq_ignore_ascii_case("static") {
        scope.owner.clone()
    } else if class.eq_ignore_ascii_case("parent") {
        match &scope.parent {
            Some(parent) => parent.clone(),
            None => return literal.to_string(),
        }
    } else {
        resolve_name(class, use_map, namespace)
    };
    format!("\\{}::{}", resolved, constant)
}

/// Names declared with `@template` (and its PHPStan/Psalm variants).
fn template_names(docblock: &str) -> Vec<String> {
    docblock
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim().trim_start_matches('*').trim();
            let rest = trimmed.strip_prefix('@')?;
            let (tag, body) = rest.split_once(char::is_whitespace)?;
            let tag = tag
                .trim_start_matches("phpstan-")
                .trim_start_matches("psalm-");
            if tag.starts_with("template") {
                body.split_whitespace().next().map(str::to_string)
            } else {
                None
            }
        })
        .collect()
}

/// Rewrite the type token of `@param`, `@return` and `@method` tags in a
/// docblock so that class names are fully-qualified.
fn resolve_docblock_types(
    docblock: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
    skip_names: &[String],
) -> String {
    let mut out = Vec::new();
    for line in docblock.split('\n') {
        out.push(resolve_tag_line(line, use_map, namespace, skip_names));
    }
    out.join("\n")
}

fn resolve_tag_line(
    line: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
    skip_names: &[String],
) -> String {
    const TYPED_TAGS: &[&str] = &["@param", "@return", "@method", "@throws", "@var"];

    let Some(at) = line.find('@') else {
        return line.to_string();
    };
    let after = &line[at..];
    let Some(tag) = TYPED_TAGS
        .iter()
        .find(|t| after.starts_with(**t) && after[t.len()..].starts_with(char::is_whitespace))
    else {
        return line.to_string();
    };

    let head = &line[..at + tag.len()];
    let body = &line[at + tag.len()..];
    let trimmed = body.trim_start();
    let lead = &body[..body.len() - trimmed.len()];

    let (static_kw, trimmed) = match trimmed.strip_prefix("static ") {
        Some(rest) if *tag == "@method" => ("static ", rest.trim_start()),
        _ => ("", trimmed),
    };

    if trimmed.is_empty() || trimmed.starts_with('$') || trimmed.starts_with("...") {
        return line.to_string();
    }

    if *tag == "@method" {
        let (token, rest) = split_type_token(trimmed);
        if token.starts_with('(') {
            return line.to_string();
        }
        // `@method name(...)` has no return type.
        let (return_type, signature) = if token.contains('(') {
            (String::new(), trimmed)
        } else {
            (resolve_type_string(token, use_map, namespace, skip_names), rest)
        };
        let signature = resolve_method_signature(signature, use_map, namespace, skip_names);
        return format!("{head}{lead}{static_kw}{return_type}{signature}");
    }

    let (type_token, rest) = split_type_token(trimmed);
    if type_token.starts_with('(') {
        return line.to_string();
    }
    let resolved = resolve_type_string(type_token, use_map, namespace, skip_names);
    format!("{}{}{}{}{}", head, lead, static_kw, resolved, rest)
}

/// Resolve the parameter types inside the parentheses of a `@method`
/// signature such as `raw(Expression $value, array $bindings = [])`.
fn resolve_method_signature(
    signature: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
    skip_names: &[String],
) -> String {
    let (Some(open), Some(close)) = (signature.find('('), signature.rfind(')')) else {
        return signature.to_string();
    };
    if close < open {
        return signature.to_string();
    }

    let params: Vec<String> = split_params(&signature[open + 1..close])
        .into_iter()
        .map(|param| resolve_param_type(param, use_map, namespace, skip_names))
        .collect();
    format!(
        "{}{}{}",
        &signature[..=open],
        params.join(","),
        &signature[close..]
    )
}

/// Resolve the type in front of `$name` in one parameter declaration,
/// keeping the surrounding text (spacing, `&`, `...`, default) as is.
fn resolve_param_type(
    param: &str,
    use_map: &HashMap<String, String>,
    namespace: Option<&str>,
    skip_names: &[String],
) -> String {
    let Some(dollar) = param.find('$') else {
        return param.to_string();
    };
    let decl = &param[..dollar];
    let type_start = decl.len() - decl.trim_start().len();
    let type_end = decl
        .trim_end()
        .trim_end_matches("...")
        .trim_end()
        .trim_end_matches('&')
        .trim_end()
        .len();
    if type_end <= type_start {
        return param.to_string();
    }

    let resolved = resolve_type_string(&decl[type_start..type_end], use_map, namespace, skip_names);
    format!("{}{}{}", &param[..type_start], resolved, &param[type_end..])
}
