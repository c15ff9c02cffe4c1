/// The type registry: introspectable class descriptors looked up by name.
///
/// The generator never parses anything itself.  It asks a [`TypeRegistry`]
/// whether a class exists and, if so, for its [`ClassInfo`].  The provided
/// [`ClassRegistry`] is backed by PHP source parsed with mago: files and
/// directories are indexed up front, and classes that are not indexed yet
/// are loaded lazily through Composer PSR-4 mappings and cached.
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::composer::ComposerAutoload;
use crate::error::RegistryError;
use crate::parser;
use crate::types::ClassInfo;
use crate::util::normalize_class_name;

/// Capability: given a class name, describe the class.
///
/// Names may be given with or without a leading `\`; PHP class names are
/// case-insensitive, so implementations should match them that way.
pub trait TypeRegistry {
    fn find_class(&self, name: &str) -> Result<Arc<ClassInfo>, RegistryError>;

    fn class_exists(&self, name: &str) -> bool {
        self.find_class(name).is_ok()
    }
}

/// A registry of classes parsed from PHP source.
#[derive(Default)]
pub struct ClassRegistry {
    /// Lower-cased FQN → class.
    classes: RwLock<HashMap<String, Arc<ClassInfo>>>,
    autoload: Option<ComposerAutoload>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that falls back to PSR-4 resolution for unknown classes.
    pub fn with_autoload(autoload: ComposerAutoload) -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            autoload: Some(autoload),
        }
    }

    /// Parse a PHP source string and index every class-like it declares.
    /// Returns the number of classes added.
    pub fn add_source(&self, content: &str) -> usize {
        let classes = parser::parse_php(content);
        let count = classes.len();
        let mut map = self.classes.write();
        for class in classes {
            map.insert(class.fqn().to_ascii_lowercase(), Arc::new(class));
        }
        count
    }

    /// Parse and index a single PHP file.
    pub fn add_file(&self, path: &Path) -> std::io::Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let count = self.add_source(&content);
        tracing::trace!(path = %path.display(), classes = count, "indexed file");
        Ok(count)
    }

    /// Index every `.php` file below `dir`, honouring ignore files.
    ///
    /// Unreadable files are logged and skipped.  Returns the number of
    /// classes added.
    pub fn add_directory(&self, dir: &Path) -> usize {
        let mut total = 0;
        for entry in ignore::WalkBuilder::new(dir).build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            let is_php = entry.file_type().is_some_and(|t| t.is_file())
                && path.extension().is_some_and(|ext| ext == "php");
            if !is_php {
                continue;
            }
            match self.add_file(path) {
                Ok(count) => total += count,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
        }
        tracing::debug!(dir = %dir.display(), classes = total, "indexed directory");
        total
    }

    /// Add an already-built class descriptor.
    pub fn insert(&self, class: ClassInfo) {
        self.classes
            .write()
            .insert(class.fqn().to_ascii_lowercase(), Arc::new(class));
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }

    fn lookup(&self, key: &str) -> Option<Arc<ClassInfo>> {
        self.classes.read().get(key).cloned()
    }
}

impl TypeRegistry for ClassRegistry {
    fn find_class(&self, name: &str) -> Result<Arc<ClassInfo>, RegistryError> {
        let name = normalize_class_name(name);
        let key = name.to_ascii_lowercase();

        if let Some(class) = self.lookup(&key) {
            return Ok(class);
        }

        let path = self
            .autoload
            .as_ref()
            .and_then(|autoload| autoload.resolve_class_path(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        self.add_file(&path)
            .map_err(|source| RegistryError::Unreadable {
                class: name.to_string(),
                path: path.clone(),
                source,
            })?;

        self.lookup(&key)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }
}
