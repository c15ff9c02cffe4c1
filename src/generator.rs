/// The generation run: catalog in, rendered document out.
///
/// A run is sequential and self-contained.  Every alias in the catalog is
/// built from scratch against the registry; an alias that cannot be
/// built is recorded as skipped and the run carries on.  So is an alias
/// whose stub class would clash with one already declared in the same
/// namespace.  Nothing is
/// remembered between runs, so one `Generator` can be run repeatedly.
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::alias::Alias;
use crate::catalog::AliasCatalog;
use crate::config::Config;
use crate::error::{ConfigError, WriteError};
use crate::method::InterfaceMap;
use crate::registry::TypeRegistry;
use crate::render::{self, Format, NamespaceGroups, RenderOptions};

/// An alias that was left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAlias {
    pub alias: String,
    pub target: String,
    pub reason: String,
}

/// The outcome of [`Generator::run`].
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Valid aliases, in catalog order.
    pub aliases: Vec<Alias>,
    /// Aliases that could not be resolved, in catalog order.
    pub skipped: Vec<SkippedAlias>,
}

impl GenerationReport {
    /// The valid aliases grouped by target namespace.
    pub fn namespaces(&self) -> NamespaceGroups<'_> {
        render::group(&self.aliases)
    }
}

pub struct Generator<'r> {
    registry: &'r dyn TypeRegistry,
    interfaces: InterfaceMap,
    format: Format,
    helpers: Option<String>,
}

impl<'r> Generator<'r> {
    pub fn new(registry: &'r dyn TypeRegistry, interfaces: InterfaceMap) -> Self {
        Self {
            registry,
            interfaces,
            format: Format::Php,
            helpers: None,
        }
    }

    /// A generator using the interfaces and format from `config`.
    pub fn from_config(config: &Config, registry: &'r dyn TypeRegistry) -> Result<Self, ConfigError> {
        Ok(Self::new(registry, config.interface_map()).with_format(config.output_format()?))
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// PHP code appended to `php` output.
    pub fn with_helpers(mut self, helpers: Option<String>) -> Self {
        self.helpers = helpers;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Build every alias in `catalog`.
    pub fn run(&self, catalog: &dyn AliasCatalog) -> GenerationReport {
        let mut report = GenerationReport::default();
        // (namespace, short name), lower-cased → alias that declared it.
        let mut declared: HashMap<(String, String), String> = HashMap::new();

        for entry in catalog.entries() {
            let alias = Alias::build(
                &entry.alias,
                &entry.target,
                &entry.extra,
                &entry.magic,
                self.registry,
                &self.interfaces,
            );

            let skip_reason = match alias.skip_reason() {
                Some(reason) => Some(reason.to_string()),
                None => {
                    let key = (
                        alias.namespace().to_ascii_lowercase(),
                        alias.short_name().to_ascii_lowercase(),
                    );
                    match declared.entry(key) {
                        Entry::Occupied(first) => Some(clash_reason(&alias, first.get())),
                        Entry::Vacant(slot) => {
                            slot.insert(entry.alias.clone());
                            None
                        }
                    }
                }
            };

            match skip_reason {
                None => {
                    tracing::debug!(
                        alias = %entry.alias,
                        target = %entry.target,
                        members = alias.member_count(),
                        "built alias"
                    );
                    report.aliases.push(alias);
                }
                Some(reason) => {
                    tracing::warn!(alias = %entry.alias, target = %entry.target, reason = %reason, "skipping alias");
                    report.skipped.push(SkippedAlias {
                        alias: entry.alias,
                        target: entry.target,
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Render a report in this generator's format.
    pub fn render(&self, report: &GenerationReport) -> String {
        let options = RenderOptions {
            helpers: self.helpers.clone(),
        };
        render::render(self.format, &report.namespaces(), &options)
    }

    /// Run and render in one step.
    pub fn generate(&self, catalog: &dyn AliasCatalog) -> (String, GenerationReport) {
        let report = self.run(catalog);
        (self.render(&report), report)
    }
}

fn clash_reason(alias: &Alias, first: &str) -> String {
    let namespace = match alias.namespace() {
        "" => "the global namespace".to_string(),
        ns => format!("namespace `{ns}`"),
    };
    format!(
        "class `{}` is already declared in {} by alias `{}`",
        alias.short_name(),
        namespace,
        first
    )
}

/// Concatenate the helper files that exist, with their `<?php` and `?>`
/// markers removed.  Missing files are skipped.
pub fn load_helpers(root: &Path, files: &[PathBuf]) -> String {
    let mut helpers = String::new();
    for file in files {
        let path = root.join(file);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                helpers.push_str(&content.replace("<?php", "").replace("?>", ""));
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "helper file not readable")
            }
        }
    }
    helpers
}

/// Write `contents` to `path` atomically: the document is written to a
/// temporary file next to `path` and renamed over it.
pub fn write_output(path: &Path, contents: &str) -> Result<(), WriteError> {
    let wrap = |source: std::io::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    file.write_all(contents.as_bytes()).map_err(wrap)?;
    file.persist(path).map_err(|e| wrap(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
