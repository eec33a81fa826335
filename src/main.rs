// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! NEXOS CLI entrypoint.
//!
//! By default this runs the interactive TUI at the given address. `--print`
//! and `--json` render one frame to stdout instead.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nexos::model::{builtin_catalog, Catalog, NodeSpec};
use nexos::nav::{Dispatcher, Fragment, MemoryHistory, Router};
use nexos::render::render_text;

const DEFAULT_PRINT_WIDTH: usize = 100;

#[derive(Debug, Parser)]
#[command(name = "nexos", version)]
#[command(about = "Browse the NEXOS pipeline: overview, sections and their items")]
struct Cli {
    /// Address to open, e.g. `ph0` or `ph0/web-scout` (a leading `#` is ignored).
    fragment: Option<String>,

    /// Catalog JSON to load instead of the built-in one.
    #[arg(long, env = "NEXOS_CATALOG", value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Print the frame for FRAGMENT as text and exit.
    #[arg(long, conflicts_with_all = ["json", "catalog_schema"])]
    print: bool,

    /// Print the frame for FRAGMENT as JSON and exit.
    #[arg(long, conflicts_with = "catalog_schema")]
    json: bool,

    /// Print the JSON Schema of the catalog file format and exit.
    #[arg(long)]
    catalog_schema: bool,

    /// Column width for `--print`.
    #[arg(long, default_value_t = DEFAULT_PRINT_WIDTH, requires = "print")]
    width: usize,

    /// Write logs here (the TUI never logs to the terminal).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `nexos::nav=trace`.
    #[arg(long, env = "NEXOS_LOG", default_value = "info", value_name = "FILTER")]
    log_filter: String,
}

impl Cli {
    fn is_interactive(&self) -> bool {
        !(self.print || self.json || self.catalog_schema)
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("nexos: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;

    if cli.catalog_schema {
        let schema = schemars::schema_for!(NodeSpec);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let catalog = Arc::new(load_catalog(cli.catalog.as_deref())?);
    let initial = Fragment::from_address(cli.fragment.as_deref().unwrap_or_default());
    debug!(fragment = initial.as_str(), "initial address");
    let dispatcher = Dispatcher::new(Router::new(catalog, MemoryHistory::new(initial)));

    if cli.print {
        let text = render_text(dispatcher.presentation(), cli.width)
            .context("rendering text frame")?;
        println!("{text}");
        return Ok(());
    }
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(dispatcher.presentation())?
        );
        return Ok(());
    }

    nexos::tui::run(dispatcher)?;
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_new(&cli.log_filter)
        .with_context(|| format!("invalid log filter {:?}", cli.log_filter))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (&cli.log_file, cli.is_interactive()) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, false) => builder.with_writer(std::io::stderr).init(),
        // A raw-mode terminal cannot share stderr with log lines.
        (None, true) => {}
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json_str(&raw)
                .with_context(|| format!("loading catalog {}", path.display()))?
        }
        None => builtin_catalog().context("loading built-in catalog")?,
    };
    info!(
        sections = catalog.section_count(),
        leaves = catalog.leaf_count(),
        custom = path.is_some(),
        "catalog loaded"
    );
    Ok(catalog)
}
