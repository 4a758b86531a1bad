//! # autopermit
//!
//! Screen-watching auto-permission tool: polls a target window for known
//! permission buttons and approves, denies or flags them per configuration.
//!
//! ## Architecture
//!
//! This is the top layer - the CLI binary that ties together:
//! - autopermit-core: Core types and configuration
//! - autopermit-matcher: Template matching engine
//! - autopermit-monitor: Decision policy and polling loop

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

use anyhow::Context;
use clap::Parser;

use autopermit_core::MonitorConfig;
use autopermit_matcher::Template;
use autopermit_monitor::{EnigoSink, Monitor, ScreenSource};

#[derive(Debug, Parser)]
#[command(name = "autopermit", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Run a single detection cycle and exit
    #[arg(long)]
    once: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = load_or_create_config(&cli.config)?;

    if cli.show_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let templates = load_templates(&config);
    anyhow::ensure!(
        !templates.is_empty(),
        "no loadable button patterns in {}",
        config.assets_dir.display()
    );

    let source = ScreenSource::new();
    let sink = EnigoSink::new().context("input backend unavailable")?;
    let mut monitor = Monitor::new(config, templates, source, sink);

    if cli.once {
        match monitor.run_once() {
            Some(decision) => println!("{decision}"),
            None => println!("no action"),
        }
        return Ok(());
    }

    // Any line on stdin (or EOF) stops the loop after the current cycle.
    let stop = monitor.stop_handle();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        stop.store(true, Ordering::Relaxed);
    });
    tracing::info!("press Enter to stop");

    monitor.run();
    println!("session stats: {}", monitor.stats());

    Ok(())
}

/// Load the configuration, writing the default file when none exists.
fn load_or_create_config(path: &Path) -> anyhow::Result<MonitorConfig> {
    if !path.exists() {
        let config = MonitorConfig::default();
        std::fs::write(path, config.to_yaml()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote default configuration");
        return Ok(config);
    }
    MonitorConfig::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))
}

/// Load one template per configured button, skipping unreadable patterns.
fn load_templates(config: &MonitorConfig) -> Vec<Template> {
    let mut templates = Vec::new();
    for (name, button) in &config.buttons {
        let path = config.assets_dir.join(&button.image);
        match Template::load(name, &path, button.action, config.button_confidence(button)) {
            Ok(template) => {
                tracing::debug!(button = name, path = %path.display(), "pattern loaded");
                templates.push(template);
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping button for this session");
            }
        }
    }
    templates
}
