#![allow(dead_code)]

use phpantom_stubgen::composer::ComposerAutoload;
use phpantom_stubgen::{Alias, ClassRegistry, InterfaceMap};
use std::fs;

/// The class from the classic stub generator example: one documented
/// method with a string default.
pub const EXAMPLE_CLASS: &str = concat!(
    "<?php\n",
    "class ExampleClass\n",
    "{\n",
    "    /**\n",
    "     * @param string $last\n",
    "     * @param string $first\n",
    "     */\n",
    "    public function setName($last, $first = 'Barry')\n",
    "    {\n",
    "        return;\n",
    "    }\n",
    "}\n",
);

/// Same shape, but with no docblock and no type hints at all.
pub const BARE_EXAMPLE_CLASS: &str = concat!(
    "<?php\n",
    "class ExampleClass\n",
    "{\n",
    "    public function setName($last, $first = 'Barry')\n",
    "    {\n",
    "        return;\n",
    "    }\n",
    "}\n",
);

/// A registry holding the classes declared in `sources`.
pub fn registry_from(sources: &[&str]) -> ClassRegistry {
    let registry = ClassRegistry::new();
    for source in sources {
        registry.add_source(source);
    }
    registry
}

/// Build an alias with no interface substitutions.
pub fn alias_for(name: &str, target: &str, registry: &ClassRegistry) -> Alias {
    Alias::new(name, target, registry, &InterfaceMap::new())
}

/// Names of an alias's members in discovery order.
pub fn member_names(alias: &Alias) -> Vec<String> {
    alias.members().map(|m| m.name().to_string()).collect()
}

/// Helper: create a temp workspace with a composer.json and PHP files.
pub fn create_workspace(composer_json: &str, files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    fs::write(dir.path().join("composer.json"), composer_json)
        .expect("failed to write composer.json");
    write_files(dir.path(), files);
    dir
}

pub fn write_files(root: &std::path::Path, files: &[(&str, &str)]) {
    for (rel_path, content) in files {
        let full = root.join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write file");
    }
}

/// Helper: a temp workspace plus a registry that autoloads from it.
pub fn create_psr4_workspace(
    composer_json: &str,
    files: &[(&str, &str)],
) -> (ClassRegistry, tempfile::TempDir) {
    let dir = create_workspace(composer_json, files);
    let autoload = ComposerAutoload::load(dir.path()).expect("composer.json should load");
    (ClassRegistry::with_autoload(autoload), dir)
}
