//! Virtual method extraction (`@method` tags and parameter-list specs).
//!
//! Class-level `@method` tags declare members that only exist through
//! `__call` / `__callStatic`:
//!
//!   - `@method ReturnType methodName(ParamType $param, ...)`
//!   - `@method static ReturnType methodName(ParamType $param, ...)`
//!   - `@method methodName(ParamType $param, ...)`  (no return type)
//!
//! The same parameter-list grammar is used for magic member specs given
//! in configuration, so [`parse_param_list`] is public.

use crate::types::{DefaultValue, MethodInfo, ParameterInfo, Visibility};

/// Extract all `@method` tags from a class-level docblock.
///
/// Returns one `MethodInfo` per tag; the tag line itself (minus the
/// signature) becomes the method's docblock summary.
pub fn extract_method_tags(docblock: &str) -> Vec<MethodInfo> {
    let inner = docblock
        .trim()
        .strip_prefix("/**")
        .unwrap_or(docblock)
        .strip_suffix("*/")
        .unwrap_or(docblock);

    let mut results = Vec::new();

    for line in inner.lines() {
        let trimmed = line.trim().trim_start_matches('*').trim();

        let Some(rest) = trimmed.strip_prefix("@method") else {
            continue;
        };

        // The tag must be followed by whitespace.
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let rest = rest.trim_start();

        // Optional `static` keyword, which must be followed by whitespace
        // so that a method literally named `staticFoo` is not misread.
        let (is_static, rest) = match rest.strip_prefix("static") {
            Some(after) if after.starts_with(char::is_whitespace) => (true, after.trim_start()),
            _ => (false, rest),
        };

        let Some(paren_pos) = rest.find('(') else {
            continue;
        };
        let Some(close_paren) = rest.rfind(')') else {
            continue;
        };
        if close_paren < paren_pos {
            continue;
        }

        let before_paren = rest[..paren_pos].trim();
        let params_str = rest[paren_pos + 1..close_paren].trim();
        let description = rest[close_paren + 1..].trim();

        if before_paren.is_empty() {
            continue;
        }

        // The method name is the last whitespace-delimited token.
        let (return_type, method_name) = match before_paren.rfind(char::is_whitespace) {
            Some(last_space) => (
                Some(before_paren[..last_space].trim().to_string()),
                before_paren[last_space..].trim(),
            ),
            None => (None, before_paren),
        };

        if method_name.is_empty() {
            continue;
        }

        let docblock = if description.is_empty() {
            None
        } else {
            Some(format!("/**\n * {}\n */", description))
        };

        results.push(MethodInfo {
            name: method_name.to_string(),
            parameters: parse_param_list(params_str),
            return_type: return_type.filter(|t| !t.is_empty()),
            is_static,
            visibility: Visibility::Public,
            docblock,
        });
    }

    results
}

/// Parse a PHP-like parameter list such as
/// `string $key, array<string, mixed> $data = [], &$out, ...$rest`.
///
/// Splits on commas while respecting `<>`, `()`, `[]` and `{}` nesting and
/// quoted strings.  Entries without a `$name` are skipped.
pub fn parse_param_list(params_str: &str) -> Vec<ParameterInfo> {
    split_params(params_str)
        .into_iter()
        .filter_map(|part| parse_single_param(part.trim()))
        .collect()
}

fn parse_single_param(part: &str) -> Option<ParameterInfo> {
    if part.is_empty() {
        return None;
    }

    let (decl, default) = match find_top_level_equals(part) {
        Some(eq) => (part[..eq].trim(), Some(part[eq + 1..].trim())),
        None => (part, None),
    };

    let dollar_pos = decl.rfind('$')?;
    let name = decl[dollar_pos..].trim();
    if name.len() < 2 {
        return None;
    }

    let mut before = decl[..dollar_pos].trim_end();
    let is_variadic = before.ends_with("...");
    before = before.trim_end_matches("...").trim_end();
    let is_reference = before.ends_with('&');
    before = before.trim_end_matches('&').trim_end();

    let type_hint = if before.is_empty() {
        None
    } else {
        Some(before.to_string())
    };

    let default = default.map(|text| {
        if text.is_empty() {
            DefaultValue::Opaque
        } else {
            DefaultValue::Literal(text.to_string())
        }
    });

    Some(ParameterInfo {
        name: name.to_string(),
        type_hint,
        is_variadic,
        is_reference,
        default,
    })
}

/// Position of the first `=` outside of nesting and quotes.
fn find_top_level_equals(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut prev = ' ';
    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            prev = ch;
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            '<' | '(' | '[' | '{' => depth += 1,
            '>' if is_arrow(prev) => {}
            '>' | ')' | ']' | '}' => depth -= 1,
            '=' if depth == 0 => return Some(i),
            _ => {}
        }
        prev = ch;
    }
    None
}

/// Split a parameter string on commas while respecting nesting so that
/// `array<string, mixed>` or `['a', 'b']` is not split.
pub(crate) fn split_params(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut start = 0;

    let mut prev = ' ';

    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            prev = ch;
            continue;
        }
        match ch {
            '\'' | '"' => quote = Some(ch),
            '<' | '(' | '[' | '{' => depth += 1,
            '>' if is_arrow(prev) => {}
            '>' | ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = ch;
    }
    parts.push(&s[start..]);
    parts
}

/// `=>` and `->` close nothing.
fn is_arrow(prev: char) -> bool {
    prev == '=' || prev == '-'
}
