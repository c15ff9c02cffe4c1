//! PHPDoc text and tag extraction.
//!
//! This submodule pulls the pieces a stub doc comment is rebuilt from out
//! of a raw `/** ... */` block: the summary/description text, `@param`
//! tags (type, name and description) and the `@return` tag.  It also
//! locates the docblock that belongs to an AST node.

use mago_span::HasSpan;
use mago_syntax::ast::*;

use super::types::split_type_token;

/// A `@param` tag as written in a docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    /// The parameter name including the `$` prefix.
    pub name: String,
    /// The raw type, empty when the tag omits it (`@param $foo`).
    pub type_str: String,
    /// Free description text, possibly empty.
    pub description: String,
}

/// A `@return` tag as written in a docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTag {
    pub type_str: String,
    pub description: String,
}

/// Strip the `/**` and `*/` delimiters and the `*` gutter, yielding the
/// content lines of a docblock.
fn inner_lines(docblock: &str) -> Vec<&str> {
    let inner = docblock
        .trim()
        .strip_prefix("/**")
        .unwrap_or(docblock)
        .strip_suffix("*/")
        .unwrap_or(docblock);

    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect()
}

/// Split a docblock's free text into `(summary, description)`.
///
/// The summary is the first paragraph (up to the first blank line); the
/// description is every following line before the first tag.  Both are
/// trimmed of surrounding blank lines; inner line breaks are kept.
pub fn extract_text(docblock: &str) -> (String, String) {
    let mut text_lines = Vec::new();
    for line in inner_lines(docblock) {
        if line.trim_start().starts_with('@') {
            break;
        }
        text_lines.push(line);
    }

    while text_lines.first().is_some_and(|l| l.trim().is_empty()) {
        text_lines.remove(0);
    }
    while text_lines.last().is_some_and(|l| l.trim().is_empty()) {
        text_lines.pop();
    }

    let split_at = text_lines
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(text_lines.len());

    let summary = text_lines[..split_at].join("\n");
    let description = text_lines[split_at..]
        .iter()
        .skip_while(|l| l.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    (summary, description)
}

/// Collect every tag in the block as `(tag_name, body)` pairs, joining
/// continuation lines onto the body with a single space.
fn collect_tags(docblock: &str) -> Vec<(String, String)> {
    let mut tags: Vec<(String, String)> = Vec::new();
    for line in inner_lines(docblock) {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            let (name, body) = match rest.find(char::is_whitespace) {
                Some(pos) => (&rest[..pos], rest[pos..].trim()),
                None => (rest, ""),
            };
            tags.push((format!("@{}", name), body.to_string()));
        } else if let Some((_, body)) = tags.last_mut()
            && !trimmed.is_empty()
        {
            if !body.is_empty() {
                body.push(' ');
            }
            body.push_str(trimmed);
        }
    }
    tags
}

/// Extract all `@param` tags in declaration order.
///
/// Handles `@param Type $name desc`, `@param $name desc` and variadic
/// names written as `...$name`.
pub fn extract_param_tags(docblock: &str) -> Vec<ParamTag> {
    collect_tags(docblock)
        .into_iter()
        .filter(|(tag, _)| tag == "@param")
        .filter_map(|(_, body)| {
            let body = body.trim();
            if body.is_empty() {
                return None;
            }

            let (type_str, rest) = if body.starts_with('$') || body.starts_with("...$") {
                ("", body)
            } else {
                split_type_token(body)
            };

            let rest = rest.trim_start();
            let (name_token, description) = match rest.find(char::is_whitespace) {
                Some(pos) => (&rest[..pos], rest[pos..].trim()),
                None => (rest, ""),
            };
            let name = name_token.trim_start_matches("...").trim_start_matches('&');
            if !name.starts_with('$') || name.len() < 2 {
                return None;
            }

            Some(ParamTag {
                name: name.to_string(),
                type_str: type_str.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

/// Extract the first `@return` tag.
///
/// PHPStan conditional return types (`@return ($x is int ? A : B)`) are
/// kept verbatim as the type.
pub fn extract_return_tag(docblock: &str) -> Option<ReturnTag> {
    collect_tags(docblock)
        .into_iter()
        .find(|(tag, _)| tag == "@return")
        .and_then(|(_, body)| {
            let body = body.trim();
            if body.is_empty() {
                return None;
            }
            let (type_str, rest) = split_type_token(body);
            Some(ReturnTag {
                type_str: type_str.to_string(),
                description: rest.trim().to_string(),
            })
        })
}

/// Look up the docblock comment (if any) for an AST node and return its
/// raw text.
///
/// This uses the program's trivia list to find the `/** ... */` comment that
/// immediately precedes the given node.  The `content` parameter is the
/// full source text and is used to verify there is no code between the
/// docblock and the node.
pub fn get_docblock_text_for_node<'a>(
    trivia: &'a [Trivia<'a>],
    content: &str,
    node: &impl HasSpan,
) -> Option<&'a str> {
    let node_start = node.span().start.offset;
    let candidate_idx = trivia.partition_point(|t| t.span.start.offset < node_start);
    if candidate_idx == 0 {
        return None;
    }

    let content_bytes = content.as_bytes();
    let mut covered_from = node_start;

    for i in (0..candidate_idx).rev() {
        let t = &trivia[i];
        let t_end = t.span.end.offset;

        let gap = content_bytes
            .get(t_end as usize..covered_from as usize)
            .unwrap_or(&[]);
        if !gap.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        match t.kind {
            TriviaKind::DocBlockComment => return Some(t.value),
            TriviaKind::WhiteSpace
            | TriviaKind::SingleLineComment
            | TriviaKind::MultiLineComment
            | TriviaKind::HashComment => {
                covered_from = t.span.start.offset;
            }
        }
    }

    None
}
