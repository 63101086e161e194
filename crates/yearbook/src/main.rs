//! `yearbook` - manifest builder and gallery server.
//!
//! This binary scans the photo tree into a manifest and serves the gallery
//! from it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use yearbook::cli::{Cli, Command, ConfigCommand, GenerateCommand, ServeCommand, SummaryCommand};
use yearbook::photo::UrlMode;
use yearbook::server::{self, AppState, Site};
use yearbook::{init_logging, Config, Manifest, ManifestBuilder};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Generate(cmd) => handle_generate(&load_config(cli.config)?, cmd),
        Command::Summary(cmd) => handle_summary(&load_config(cli.config)?, cmd),
        Command::Serve(cmd) => handle_serve(load_config(cli.config)?, cmd),
        Command::Config(cmd) => handle_config(cli.config, cmd),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = Config::load_from(path).context("failed to load configuration")?;
    debug!("Configuration loaded: {config:?}");
    Ok(config)
}

fn handle_generate(config: &Config, cmd: GenerateCommand) -> Result<()> {
    let root = cmd.root.unwrap_or_else(|| config.photos.root.clone());
    let output = cmd.output.unwrap_or_else(|| config.manifest.path.clone());

    let manifest = ManifestBuilder::new(root, config.years())
        .with_extensions(&config.photos.extensions)
        .build();
    manifest
        .write_to(&output)
        .with_context(|| format!("failed to write manifest to {}", output.display()))?;

    let summary = manifest.summary();
    println!(
        "Generated manifest: {} years, {} photos",
        summary.years, summary.photos
    );
    println!("Written to: {}", output.display());
    Ok(())
}

fn handle_summary(config: &Config, cmd: SummaryCommand) -> Result<()> {
    let path = cmd.manifest.unwrap_or_else(|| config.manifest.path.clone());
    let manifest = load_manifest(&path)?;

    if cmd.json {
        let years: serde_json::Map<String, serde_json::Value> = manifest
            .years()
            .map(|year| (year.to_string(), manifest.count(year).into()))
            .collect();
        let summary = manifest.summary();
        let report = serde_json::json!({
            "manifest": path,
            "years": summary.years,
            "photos": summary.photos,
            "counts": years,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Manifest: {}", path.display());
        println!("------------------------------");
        for year in manifest.years() {
            println!("  {year}  {:>6} photos", manifest.count(year));
        }
        println!("------------------------------");
        println!(
            "  {} photos across {} years",
            manifest.total_photos(),
            manifest.year_count()
        );
    }
    Ok(())
}

fn handle_serve(mut config: Config, cmd: ServeCommand) -> Result<()> {
    if let Some(root) = cmd.root {
        config.photos.root = root;
    }
    if let Some(bind) = cmd.bind {
        config.server.bind = bind;
    }
    if cmd.dev {
        config.server.mode = UrlMode::Development;
    }
    let manifest_path = cmd
        .manifest
        .unwrap_or_else(|| config.manifest.path.clone());

    let addr = config.bind_addr()?;
    let manifest = load_manifest(&manifest_path)?;
    info!(
        "Loaded manifest {} ({} photos)",
        manifest_path.display(),
        manifest.total_photos()
    );
    let state = AppState::new(Site::from_config(manifest, &config));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(server::serve(state, addr))?;
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Photos]");
                println!("  Root:           {}", config.photos.root.display());
                println!(
                    "  Years:          {}-{}",
                    config.photos.first_year, config.photos.last_year
                );
                println!("  Extensions:     {}", config.photos.extensions.join(", "));
                println!();
                println!("[Manifest]");
                println!("  Path:           {}", config.manifest.path.display());
                println!();
                println!("[Gallery]");
                println!("  Title:          {}", config.gallery.title);
                println!("  Highlights:     {}", config.gallery.highlight_count);
                println!("  Batch size:     {}", config.gallery.batch_size);
                println!();
                println!("[Server]");
                println!("  Bind:           {}", config.server.bind);
                println!("  Mode:           {}", config.server.mode);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::check_file(&path)
                .with_context(|| format!("{} is not a valid configuration", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn load_manifest(path: &std::path::Path) -> Result<Manifest> {
    Manifest::load(path).map_err(|e| {
        if e.is_manifest_missing() {
            anyhow::anyhow!(
                "manifest not found at {}; run `yearbook generate` first",
                path.display()
            )
        } else {
            anyhow::Error::new(e)
        }
    })
}
