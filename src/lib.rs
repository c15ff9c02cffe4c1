//! IDE helper stubs for PHP facades.
//!
//! A PHP alias (facade) such as `DB` forwards static calls to a concrete
//! class through `__callStatic`, which static analysis cannot follow.
//! This crate parses the PHP sources with mago, collects the public
//! methods each alias actually exposes, and renders them either as a PHP
//! stub file full of forwarding `public static function` declarations or
//! as a JSON index.
//!
//! The pieces, leaf to root:
//!
//! - [`registry`]: class lookup by name ([`TypeRegistry`]), backed by
//!   parsed source and Composer PSR-4 autoloading.
//! - [`parameter`] and [`method`]: render-ready parameters and members.
//! - [`alias`]: one facade and its merged, deduplicated members.
//! - [`catalog`]: the aliases to process ([`AliasCatalog`]).
//! - [`generator`] and [`render`]: the run and the output formats.

pub mod alias;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod docblock;
pub mod error;
pub mod generator;
pub mod inheritance;
pub mod logging;
pub mod method;
pub mod parameter;
pub mod parser;
pub mod registry;
pub mod render;
pub mod types;
pub mod util;

pub use alias::{Alias, MagicSpec};
pub use catalog::{AliasCatalog, CatalogEntry, ConfigCatalog, StaticCatalog};
pub use config::Config;
pub use error::{ComposerError, ConfigError, RegistryError, WriteError};
pub use generator::{GenerationReport, Generator, SkippedAlias, write_output};
pub use method::{InterfaceMap, Method, Origin};
pub use parameter::Parameter;
pub use registry::{ClassRegistry, TypeRegistry};
pub use render::{Format, RenderOptions};
