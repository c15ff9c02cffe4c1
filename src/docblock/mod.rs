//! PHPDoc block parsing.
//!
//! This module extracts the documentation pieces a stub is rebuilt from:
//! summary and description text, `@param` and `@return` tags, and the
//! virtual members declared with class-level `@method` tags.
//!
//! # Submodules
//!
//! - [`tags`]: docblock lookup for AST nodes, text and tag extraction.
//! - [`virtual_members`]: `@method` tags and parameter-list parsing.
//! - [`types`]: type token splitting and classification helpers.

mod tags;
pub(crate) mod types;
mod virtual_members;

pub use tags::{
    ParamTag, ReturnTag, extract_param_tags, extract_return_tag, extract_text,
    get_docblock_text_for_node,
};

pub use types::is_nullable_type;

pub use virtual_members::{extract_method_tags, parse_param_list};

pub(crate) use virtual_members::split_params;
