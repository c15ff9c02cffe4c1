mod common;

use std::path::{Path, PathBuf};

use common::write_files;
use phpantom_stubgen::config::{CONFIG_FILE_NAME, DEFAULT_FILENAME};
use phpantom_stubgen::{AliasCatalog, CatalogEntry, Config, ConfigCatalog, ConfigError, Format, MagicSpec};

const FULL_CONFIG: &str = r#"
filename = "_ide_helper.php"
format = "json"
include_helpers = true
helper_files = ["helpers.php"]
sources = ["src"]
composer = false

[aliases]
Zed = "App\\Zed"
DB = "Illuminate\\Support\\Facades\\DB"
Log = "Illuminate\\Support\\Facades\\Log"

[extra]
DB = ["Illuminate\\Database\\Connection", "Illuminate\\Database\\Query\\Builder"]

[magic.Log]
debug = "Monolog\\Logger::addDebug"
info = "$message, array $context = []"

[interfaces]
"Illuminate\\Database\\ConnectionInterface" = "Illuminate\\Database\\MySqlConnection"
"\\Illuminate\\Cache\\Store" = "Illuminate\\Cache\\RedisStore"
"#;

fn parse(contents: &str) -> Result<Config, ConfigError> {
    Config::from_toml_str(contents, Path::new("test.toml"))
}

// ─── Parsing ────────────────────────────────────────────────────────────────

#[test]
fn test_full_config_parses_in_order() {
    let config = parse(FULL_CONFIG).unwrap();

    assert_eq!(config.output_format().unwrap(), Format::Json);
    assert!(config.include_helpers);
    assert!(!config.composer);
    assert_eq!(config.sources, vec![PathBuf::from("src")]);

    let aliases: Vec<&str> = config.aliases.keys().map(String::as_str).collect();
    assert_eq!(aliases, vec!["Zed", "DB", "Log"]);

    let interfaces: Vec<&str> = config.interfaces.keys().map(String::as_str).collect();
    assert_eq!(
        interfaces,
        vec!["\\Illuminate\\Database\\ConnectionInterface", "\\Illuminate\\Cache\\Store"]
    );
}

#[test]
fn test_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.filename, DEFAULT_FILENAME);
    assert_eq!(config.output_format().unwrap(), Format::Php);
    assert!(config.composer);
    assert!(config.aliases.is_empty());
}

#[test]
fn test_unknown_format_is_rejected() {
    match parse("format = \"yaml\"") {
        Err(ConfigError::UnknownFormat(f)) => assert_eq!(f, "yaml"),
        other => panic!("expected UnknownFormat, got {other:?}"),
    }
}

#[test]
fn test_invalid_toml_and_unknown_keys_are_rejected() {
    assert!(matches!(parse("aliases = ["), Err(ConfigError::Parse { .. })));
    assert!(matches!(parse("colour = \"red\""), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_output_filename() {
    let config = parse(FULL_CONFIG).unwrap();
    assert_eq!(config.output_filename(None, Format::Json), "_ide_helper.json");
    assert_eq!(config.output_filename(None, Format::Php), "_ide_helper.php");
    assert_eq!(config.output_filename(Some("stubs.php"), Format::Php), "stubs.php");
    assert_eq!(config.output_filename(Some("stubs"), Format::Json), "stubs.json");
}

// ─── Files ──────────────────────────────────────────────────────────────────

#[test]
fn test_discover_reads_project_file() {
    let dir = tempfile::tempdir().unwrap();
    write_files(dir.path(), &[(CONFIG_FILE_NAME, "[aliases]\nFoo = \"App\\\\Foo\"\n")]);

    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.aliases.get("Foo").map(String::as_str), Some("App\\Foo"));
}

#[test]
fn test_load_missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

// ─── Catalog ────────────────────────────────────────────────────────────────

#[test]
fn test_config_catalog_entries() {
    let config = parse(FULL_CONFIG).unwrap();
    let entries = ConfigCatalog::new(&config).entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], CatalogEntry::new("Zed", "App\\Zed"));
    assert_eq!(
        entries[1].extra,
        vec![
            "Illuminate\\Database\\Connection".to_string(),
            "Illuminate\\Database\\Query\\Builder".to_string()
        ]
    );

    let magic: Vec<(&str, &MagicSpec)> = entries[2]
        .magic
        .iter()
        .map(|(name, spec)| (name.as_str(), spec))
        .collect();
    assert_eq!(magic.len(), 2);
    assert_eq!(magic[0].0, "debug");
    assert!(matches!(magic[0].1, MagicSpec::Forward { method, .. } if method == "addDebug"));
    assert_eq!(
        magic[1],
        ("info", &MagicSpec::Params("$message, array $context = []".to_string()))
    );
}
