use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use phpantom_stubgen::composer::ComposerAutoload;
use phpantom_stubgen::generator::load_helpers;
use phpantom_stubgen::{
    ClassRegistry, Config, ConfigCatalog, ConfigError, Format, Generator, logging, write_output,
};

/// Generate IDE helper stubs for PHP facades.
///
/// Reads the aliases to document from `phpantom-stubgen.toml`, parses the
/// configured PHP sources (and, for classes not found there, Composer's
/// PSR-4 autoload paths) and writes a stub file your IDE can index.
#[derive(Parser)]
#[command(name = "phpantom-stubgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output file name (default from config, `_ide_helper`)
    filename: Option<String>,

    /// Output format: php or json
    #[arg(short, long)]
    format: Option<String>,

    /// Path to the config file (default: <root>/phpantom-stubgen.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root (default: current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Append the helper files to the output
    #[arg(short = 'H', long)]
    helpers: bool,

    /// Extra PHP file or directory to parse (repeatable)
    #[arg(short, long = "source", value_name = "PATH")]
    sources: Vec<PathBuf>,
}

const EXIT_WRITE_FAILED: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, ConfigError> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&root)?,
    };
    let format: Format = match &cli.format {
        Some(f) => f.parse()?,
        None => config.output_format()?,
    };

    let registry = build_registry(&root, &config, &cli.sources)?;

    let helpers = (format == Format::Php && (cli.helpers || config.include_helpers))
        .then(|| load_helpers(&root, &config.helper_files));

    let generator = Generator::from_config(&config, &registry)?
        .with_format(format)
        .with_helpers(helpers);
    let (document, report) = generator.generate(&ConfigCatalog::new(&config));

    for skipped in &report.skipped {
        eprintln!(
            "Skipped alias {} ({}): {}",
            skipped.alias, skipped.target, skipped.reason
        );
    }

    let filename = config.output_filename(cli.filename.as_deref(), format);
    let path = root.join(&filename);
    match write_output(&path, &document) {
        Ok(()) => {
            println!("A new helper file was written to {}", filename);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(path = %e.path.display(), error = %e.source, "write failed");
            eprintln!("The helper file could not be created at {}", filename);
            Ok(ExitCode::from(EXIT_WRITE_FAILED))
        }
    }
}

/// A registry over the configured and command-line sources, with PSR-4
/// fallback when the project has a `composer.json` and `composer` is on.
fn build_registry(
    root: &Path,
    config: &Config,
    extra_sources: &[PathBuf],
) -> Result<ClassRegistry, ConfigError> {
    let registry = if config.composer && root.join("composer.json").is_file() {
        ClassRegistry::with_autoload(ComposerAutoload::load(root)?)
    } else {
        ClassRegistry::new()
    };

    for source in config.sources.iter().chain(extra_sources) {
        let path = root.join(source);
        if path.is_dir() {
            registry.add_directory(&path);
        } else if let Err(e) = registry.add_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "source not readable");
        }
    }

    Ok(registry)
}
