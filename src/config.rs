//! Configuration file loading.
//!
//! The generator is configured from a TOML file, by default
//! `phpantom-stubgen.toml` in the project root.  When the project has no
//! such file, `phpantom-stubgen/config.toml` in the user's config
//! directory is tried, and failing that the built-in defaults are used
//! (which produce an empty catalog).
//!
//! ```toml
//! filename = "_ide_helper"
//! format = "php"
//!
//! [aliases]
//! DB = "Illuminate\\Support\\Facades\\DB"
//!
//! [extra]
//! DB = ["Illuminate\\Database\\Connection"]
//!
//! [magic.Log]
//! debug = "Monolog\\Logger::addDebug"
//!
//! [interfaces]
//! "Illuminate\\Database\\ConnectionInterface" = "Illuminate\\Database\\MySqlConnection"
//! ```
//!
//! All tables keep the order in which they appear in the file.

use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::method::InterfaceMap;
use crate::render::Format;
use crate::util::absolute_class_name;

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = "phpantom-stubgen.toml";

/// Default output file stem.
pub const DEFAULT_FILENAME: &str = "_ide_helper";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output file name; a trailing `.php` is dropped and the format's
    /// extension appended.
    pub filename: String,
    /// `php` or `json`.
    pub format: String,
    /// Append the helper files to the `php` output.
    pub include_helpers: bool,
    /// Files appended when helpers are included, relative to the root.
    pub helper_files: Vec<PathBuf>,
    /// Files and directories parsed into the registry, relative to the
    /// root.
    pub sources: Vec<PathBuf>,
    /// Resolve classes not found in `sources` through Composer's PSR-4
    /// autoload mappings.
    pub composer: bool,
    /// Alias name → target class.
    pub aliases: IndexMap<String, String>,
    /// Alias name → extra classes whose members are merged in.
    pub extra: IndexMap<String, Vec<String>>,
    /// Alias name → magic member name → spec.
    pub magic: IndexMap<String, IndexMap<String, String>>,
    /// Interface → concrete class.  Keys are normalised to a leading `\`.
    pub interfaces: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            format: "php".to_string(),
            include_helpers: false,
            helper_files: vec![PathBuf::from(
                "vendor/laravel/framework/src/Illuminate/Support/helpers.php",
            )],
            sources: Vec::new(),
            composer: true,
            aliases: IndexMap::new(),
            extra: IndexMap::new(),
            magic: IndexMap::new(),
            interfaces: IndexMap::new(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text.  The output format is validated
    /// here, so a `Config` always names a known format.
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.output_format()?;
        config.interfaces = config
            .interfaces
            .into_iter()
            .map(|(iface, concrete)| (absolute_class_name(&iface), concrete))
            .collect();
        Ok(config)
    }

    /// Read and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents, path)?;
        tracing::debug!(path = %path.display(), aliases = config.aliases.len(), "loaded config");
        Ok(config)
    }

    /// Find and load the config for a project rooted at `root`.
    ///
    /// Missing files are not an error; a file that exists but cannot be
    /// read or parsed is.
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let project = root.join(CONFIG_FILE_NAME);
        if project.is_file() {
            return Self::load(&project);
        }

        if let Some(user) = user_config_path()
            && user.is_file()
        {
            return Self::load(&user);
        }

        tracing::debug!(root = %root.display(), "no config file found, using defaults");
        Ok(Self::default())
    }

    /// The configured output format.
    pub fn output_format(&self) -> Result<Format, ConfigError> {
        self.format.parse()
    }

    /// The interface substitutions, keyed by absolute interface name.
    pub fn interface_map(&self) -> InterfaceMap {
        self.interfaces
            .iter()
            .map(|(iface, concrete)| (absolute_class_name(iface), concrete.clone()))
            .collect()
    }

    /// The output file name for `format`: the configured (or given) name
    /// with any `.php` suffix removed and the format's extension added.
    pub fn output_filename(&self, name: Option<&str>, format: Format) -> String {
        let name = name.unwrap_or(&self.filename);
        let stem = name.strip_suffix(".php").unwrap_or(name);
        format!("{}.{}", stem, format.extension())
    }
}

/// `phpantom-stubgen/config.toml` in the platform config directory.
fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("phpantom-stubgen").join("config.toml"))
}
