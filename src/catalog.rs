/// Alias catalogs: where the `alias → target` pairs come from.
///
/// The generator never discovers aliases on its own; it is handed a
/// catalog.  [`ConfigCatalog`] reads the `[aliases]`, `[extra]` and
/// `[magic]` tables of the configuration file, and [`StaticCatalog`] is a
/// plain in-memory list for embedding and tests.
use indexmap::IndexMap;

use crate::alias::MagicSpec;
use crate::config::Config;

/// One alias to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub alias: String,
    pub target: String,
    /// Additional types whose members are merged in, in order.
    pub extra: Vec<String>,
    /// Magic member name → spec, in order.
    pub magic: IndexMap<String, MagicSpec>,
}

impl CatalogEntry {
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
            extra: Vec::new(),
            magic: IndexMap::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra.push(extra.into());
        self
    }

    pub fn with_magic(mut self, name: impl Into<String>, spec: &str) -> Self {
        self.magic.insert(name.into(), MagicSpec::parse(spec));
        self
    }
}

/// Capability: list the aliases to process, in a stable order.
pub trait AliasCatalog {
    fn entries(&self) -> Vec<CatalogEntry>;
}

/// A fixed list of entries.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }
}

impl AliasCatalog for StaticCatalog {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }
}

/// The catalog described by a configuration file.
pub struct ConfigCatalog<'c> {
    config: &'c Config,
}

impl<'c> ConfigCatalog<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }
}

impl AliasCatalog for ConfigCatalog<'_> {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.config
            .aliases
            .iter()
            .map(|(alias, target)| CatalogEntry {
                alias: alias.clone(),
                target: target.clone(),
                extra: self.config.extra.get(alias).cloned().unwrap_or_default(),
                magic: self
                    .config
                    .magic
                    .get(alias)
                    .map(|specs| {
                        specs
                            .iter()
                            .map(|(name, spec)| (name.clone(), MagicSpec::parse(spec)))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }
}
