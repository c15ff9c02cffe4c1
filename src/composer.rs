/// Composer autoload support.
///
/// The type registry resolves classes it has not parsed yet through
/// Composer's PSR-4 autoload rules.  Mappings are collected from the
/// project's own `composer.json` (`autoload` and `autoload-dev`) and from
/// every installed package listed in `vendor/composer/installed.json`, so
/// framework classes living under `vendor/` resolve as well.
///
/// # PSR-4 Resolution
///
/// Given a mapping like `"Illuminate\\" => "vendor/laravel/framework/src/Illuminate/"`,
/// a class name like `Illuminate\Support\Facades\DB` is resolved by:
///   1. Stripping the matching prefix (`Illuminate\`) from the class name
///   2. Converting remaining namespace separators to directory separators
///   3. Appending `.php`
///   4. Prepending the mapped base directory
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ComposerError;

/// A single PSR-4 namespace-to-directory mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psr4Mapping {
    /// The namespace prefix, always ending with `\` (empty for a fallback
    /// mapping that matches every class).
    pub prefix: String,
    /// The base directory, relative to the project root, ending with `/`.
    pub base_path: String,
}

/// The PSR-4 autoload table of a Composer project.
#[derive(Debug, Clone, Default)]
pub struct ComposerAutoload {
    root: PathBuf,
    mappings: Vec<Psr4Mapping>,
}

impl ComposerAutoload {
    /// Load the autoload table of the project rooted at `root`.
    ///
    /// A missing `composer.json` is an error; a missing or malformed
    /// `installed.json` only means no vendor mappings are added.
    pub fn load(root: &Path) -> Result<Self, ComposerError> {
        let composer_path = root.join("composer.json");
        let content =
            std::fs::read_to_string(&composer_path).map_err(|source| ComposerError::Read {
                path: composer_path.clone(),
                source,
            })?;
        let json: Value =
            serde_json::from_str(&content).map_err(|source| ComposerError::Parse {
                path: composer_path.clone(),
                source,
            })?;

        let mut mappings = Vec::new();
        collect_autoload_sections(&json, "", &mut mappings);

        let vendor_dir = json
            .get("config")
            .and_then(|c| c.get("vendor-dir"))
            .and_then(Value::as_str)
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| "vendor".to_string());
        collect_installed_packages(root, &vendor_dir, &mut mappings);

        // Longest prefix first so the most specific mapping wins.
        mappings.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        tracing::debug!(
            root = %root.display(),
            mappings = mappings.len(),
            "loaded composer autoload mappings"
        );

        Ok(Self {
            root: root.to_path_buf(),
            mappings,
        })
    }

    pub fn mappings(&self) -> &[Psr4Mapping] {
        &self.mappings
    }

    /// Resolve a class name to the first existing file its PSR-4 mappings
    /// point to.  A leading `\` is ignored.
    pub fn resolve_class_path(&self, class_name: &str) -> Option<PathBuf> {
        let name = class_name.strip_prefix('\\').unwrap_or(class_name);
        if name.is_empty() || crate::docblock::types::is_scalar(name) {
            return None;
        }

        self.mappings.iter().find_map(|mapping| {
            let relative = if mapping.prefix.is_empty() {
                Some(name)
            } else {
                name.strip_prefix(&mapping.prefix)
            }?;
            let file_path = self
                .root
                .join(&mapping.base_path)
                .join(format!("{}.php", relative.replace('\\', "/")));
            file_path.is_file().then_some(file_path)
        })
    }
}

/// Add the `psr-4` entries of both `autoload` and `autoload-dev`, with each
/// path placed under `base` (the package's directory relative to the
/// project root).
fn collect_autoload_sections(json: &Value, base: &str, mappings: &mut Vec<Psr4Mapping>) {
    for section_key in ["autoload", "autoload-dev"] {
        let Some(psr4) = json
            .get(section_key)
            .and_then(|s| s.get("psr-4"))
            .and_then(Value::as_object)
        else {
            continue;
        };
        for (prefix, paths) in psr4 {
            let prefix = normalise_prefix(prefix);
            let paths: Vec<&str> = match paths {
                Value::String(path) => vec![path.as_str()],
                Value::Array(arr) => arr.iter().filter_map(Value::as_str).collect(),
                _ => Vec::new(),
            };
            for path in paths {
                mappings.push(Psr4Mapping {
                    prefix: prefix.clone(),
                    base_path: normalise_path(&format!("{}{}", base, path)),
                });
            }
        }
    }
}

/// Add the `autoload` mappings of every package Composer has installed.
///
/// Handles both the Composer 1 layout (a bare array) and the Composer 2
/// layout (`{"packages": [...]}`), with `install-path` relative to
/// `vendor/composer/` when present and `vendor/<name>/` otherwise.
fn collect_installed_packages(root: &Path, vendor_dir: &str, mappings: &mut Vec<Psr4Mapping>) {
    let installed_path = root.join(vendor_dir).join("composer").join("installed.json");
    let Ok(content) = std::fs::read_to_string(&installed_path) else {
        return;
    };
    let json: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(path = %installed_path.display(), error = %e, "ignoring malformed installed.json");
            return;
        }
    };

    let packages = match &json {
        Value::Array(arr) => arr.as_slice(),
        Value::Object(obj) => obj
            .get("packages")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    for package in packages {
        let base = if let Some(install_path) = package.get("install-path").and_then(Value::as_str)
        {
            format!("{}/composer/{}/", vendor_dir, install_path.trim_end_matches('/'))
        } else if let Some(name) = package.get("name").and_then(Value::as_str) {
            format!("{}/{}/", vendor_dir, name)
        } else {
            continue;
        };
        // Only `autoload` applies to dependencies; their `autoload-dev` is
        // never installed.
        if let Some(psr4) = package
            .get("autoload")
            .and_then(|a| a.get("psr-4"))
            .and_then(Value::as_object)
        {
            let wrapper = serde_json::json!({ "autoload": { "psr-4": psr4 } });
            collect_autoload_sections(&wrapper, &base, mappings);
        }
    }
}

/// Ensure a namespace prefix ends with `\` (an empty prefix stays empty).
fn normalise_prefix(prefix: &str) -> String {
    let prefix = prefix.trim_start_matches('\\');
    if prefix.is_empty() || prefix.ends_with('\\') {
        prefix.to_string()
    } else {
        format!("{}\\", prefix)
    }
}

/// Normalise a directory path: forward slashes, no `./` or `/../`
/// segments relative to a package, trailing `/`.
fn normalise_path(path: &str) -> String {
    let p = path.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();
    for segment in p.split('/') {
        match segment {
            "" | "." => {}
            ".." if parts.last().is_some_and(|last| *last != "..") => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{}/", parts.join("/"))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
