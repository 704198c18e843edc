//! Support Boost Patcher
//!
//! Rewrites the catalog so every Support card carries an ability string and
//! an explicit boost field.

use card_boosts::catalog::store;
use card_boosts::core::config::EngineConfig;
use card_boosts::core::error::Result;
use card_boosts::maintenance::{apply_support_boosts, patch_catalog_text, PatchReport};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Patch Support cards in the catalog with canonical boosts
#[derive(Parser, Debug)]
#[command(name = "apply_support_boosts")]
#[command(about = "Add explicit boost fields to every Support card in the catalog")]
struct Args {
    /// Config file (defaults to boosts.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file, overriding the configured path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Report what would change without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn print_report(report: &PatchReport) {
    for patched in &report.patched {
        println!("{}: {} -> {}", patched.id, patched.ability, patched.boost);
    }
    for skipped in &report.skipped {
        println!("skipped record at byte {}: {}", skipped.offset, skipped.reason);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = EngineConfig::resolve(args.config.as_deref())?;
    if let Some(catalog) = args.catalog {
        config.catalog_path = catalog;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = if args.dry_run {
        let text = store::read_catalog_text(&config.catalog_path)?;
        patch_catalog_text(&text, &config).report
    } else {
        apply_support_boosts(&config.catalog_path, &config)?
    };

    print_report(&report);
    let verb = if args.dry_run { "Would patch" } else { "Patched" };
    println!(
        "{} {} support cards in {} ({} already up to date)",
        verb,
        report.patched.len(),
        config.catalog_path.display(),
        report.unchanged
    );

    Ok(())
}
