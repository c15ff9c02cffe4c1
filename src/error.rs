//! Error types.
//!
//! Only configuration and output failures ever reach the caller.  Registry
//! errors are caught at the alias boundary and turned into a skipped
//! alias; an unrepresentable default value is not an error at all (see
//! [`crate::parameter::Parameter::render`]).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to introspect a class through a [`crate::registry::TypeRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No source for the class could be found.
    #[error("class `{0}` could not be found")]
    NotFound(String),

    /// A source file for the class exists but could not be read.
    #[error("could not read {path} for class `{class}`")]
    Unreadable {
        class: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The class name resolves to something that cannot provide members
    /// (an interface or trait used as an alias target).
    #[error("`{class}` is {kind}, not an instantiable class")]
    NotAClass { class: String, kind: &'static str },
}

/// Failure to read Composer autoload metadata.
#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Unrecoverable configuration problems; a run never starts with these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown output format `{0}` (expected `php` or `json`)")]
    UnknownFormat(String),

    #[error(transparent)]
    Composer(#[from] ComposerError),
}

/// The rendered document could not be persisted.
#[derive(Debug, Error)]
#[error("the helper file could not be created at {path}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
