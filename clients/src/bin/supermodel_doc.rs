//! `supermodel-doc`: renders a supermodel to one HTML document.
//!
//! **Usage:**
//! ```text
//! supermodel-doc --model <json> [--out <html>] [--config <toml>] [--no-css] [--strict]
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use supermodel_docs::{generate, RenderOptions};
use tracing_subscriber::EnvFilter;

/// Generate supermodel documentation.
#[derive(Parser)]
#[command(
    name = "supermodel-doc",
    about = "Render a supermodel to a single HTML document"
)]
struct Args {
    /// Supermodel JSON file.
    #[arg(long)]
    model: PathBuf,

    /// Output HTML file.
    #[arg(long, default_value = "supermodel.html")]
    out: PathBuf,

    /// Render options file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Link an external stylesheet instead of inlining it.
    #[arg(long)]
    no_css: bool,

    /// Fail when an internal link has no target.
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => RenderOptions::from_path(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => RenderOptions::default(),
        };
        if self.no_css {
            options.include_css = false;
        }
        if self.strict {
            options.strict_links = true;
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = args.options()?;

    let rendered = generate(&args.model, &args.out, &options)?;

    println!("Documentation generated successfully.");
    println!("  Output: {}", args.out.display());
    println!("  TOC entries: {}", rendered.toc.len());
    if !rendered.links.is_clean() {
        println!(
            "  Link warnings: {} broken, {} duplicate ids",
            rendered.links.broken.len(),
            rendered.links.duplicate_ids.len()
        );
    }

    Ok(())
}
