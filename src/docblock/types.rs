//! Type string utilities for PHPDoc and native type hints.
//!
//! This submodule provides helpers for splitting type tokens out of tag
//! bodies, classifying built-in types, and detecting nullability.

/// Built-in type names that are never class references and must not be
/// namespace-resolved or substituted.
pub(crate) const SCALAR_TYPES: &[&str] = &[
    "int", "integer", "float", "double", "string", "bool", "boolean", "void", "never", "null",
    "false", "true", "array", "callable", "iterable", "resource", "mixed", "object",
];

/// Split off the first type token from `s`, respecting `<…>`, `{…}` and
/// `(…)` nesting.
///
/// Returns `(type_token, remainder)` where `type_token` is the full type
/// (e.g. `Collection<int, User>`) and `remainder` is whatever follows.
pub(crate) fn split_type_token(s: &str) -> (&str, &str) {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '{' | '(' => depth += 1,
            '>' | '}' | ')' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                return (&s[..i], &s[i..]);
            }
            _ => {}
        }
    }
    (s, "")
}

/// Check whether a type name is a built-in scalar (i.e. can never be an object).
pub(crate) fn is_scalar(type_name: &str) -> bool {
    let lower = type_name.to_ascii_lowercase();
    SCALAR_TYPES.contains(&lower.as_str())
}

/// Whether a type string admits `null`: `?Foo`, `Foo|null`, `null`,
/// or `mixed`.
pub fn is_nullable_type(type_str: &str) -> bool {
    let t = type_str.trim();
    if t.starts_with('?') {
        return true;
    }
    t.split('|')
        .map(|part| part.trim().trim_start_matches('(').trim_end_matches(')'))
        .any(|part| part.eq_ignore_ascii_case("null") || part.eq_ignore_ascii_case("mixed"))
}

/// Rewrite the class-like words of a type string through `f`, leaving
/// punctuation (`|`, `?`, `<`, `,` ...) and unmatched words untouched.
///
/// `map_type_words("?self|Foo<Bar>", f)` calls `f` with `self`, `Foo` and
/// `Bar`; a `Some` result replaces that word.
pub(crate) fn map_type_words(type_str: &str, f: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(type_str.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        if !word.is_empty() {
            match f(word) {
                Some(replacement) => out.push_str(&replacement),
                None => out.push_str(word),
            }
            word.clear();
        }
    };

    for ch in type_str.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == '\\' || ch == '$' || !ch.is_ascii() {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push(ch);
        }
    }
    flush(&mut word, &mut out);
    out
}
