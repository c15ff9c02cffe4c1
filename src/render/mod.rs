//! Output rendering.
//!
//! Aliases are first grouped by the namespace of their target, then
//! handed to the renderer for the chosen [`Format`].  Renderers are plain
//! functions looked up in a fixed table; both only iterate
//! insertion-ordered collections, so the same input always renders the
//! same bytes.
//!
//! # Submodules
//!
//! - [`php`]: the PHP stub document.
//! - [`json`]: the lightweight JSON index.

mod json;
mod php;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::alias::Alias;
use crate::error::ConfigError;

/// Aliases by target namespace (empty string for the root namespace).
pub type NamespaceGroups<'a> = IndexMap<String, Vec<&'a Alias>>;

/// The output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// PHP stub classes with doc comments and forwarding bodies.
    Php,
    /// A JSON object of alias → member → parameter list.
    Json,
}

impl Format {
    /// File extension of the rendered document.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Php => "php",
            Format::Json => "json",
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "php" => Ok(Format::Php),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extra inputs some formats use.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// PHP code appended in a global `namespace {}` block (`php` only).
    pub helpers: Option<String>,
}

type RenderFn = fn(&NamespaceGroups<'_>, &RenderOptions) -> String;

const RENDERERS: &[(Format, RenderFn)] = &[
    (Format::Php, php::render),
    (Format::Json, json::render),
];

/// Group aliases by the namespace of their target.
///
/// Groups appear in the order their first alias appears, and aliases keep
/// their relative order within a group.  Invalid aliases are left out.
pub fn group<'a>(aliases: impl IntoIterator<Item = &'a Alias>) -> NamespaceGroups<'a> {
    let mut groups = NamespaceGroups::new();
    for alias in aliases.into_iter().filter(|a| a.is_valid()) {
        groups
            .entry(alias.namespace().to_string())
            .or_default()
            .push(alias);
    }
    groups
}

/// Render grouped aliases in `format`.
pub fn render(format: Format, groups: &NamespaceGroups<'_>, options: &RenderOptions) -> String {
    RENDERERS
        .iter()
        .find(|(f, _)| *f == format)
        .map(|(_, renderer)| renderer(groups, options))
        .unwrap_or_default()
}
