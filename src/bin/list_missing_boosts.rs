//! Support Boost Checker
//!
//! Lists Support cards missing their ability or boost field, or with
//! `--drift`, any Support card the patcher would still rewrite.

use card_boosts::catalog::{Catalog, LineageIndex};
use card_boosts::core::config::EngineConfig;
use card_boosts::core::error::Result;
use card_boosts::maintenance::{find_drift, find_missing};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// List Support cards lacking ability/boost fields
#[derive(Parser, Debug)]
#[command(name = "list_missing_boosts")]
#[command(about = "List Support cards missing ability or boost fields")]
struct Args {
    /// Config file (defaults to boosts.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file, overriding the configured path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also report boosts that differ from the canonical value
    #[arg(long)]
    drift: bool,

    /// Print the findings as one JSON array
    #[arg(long)]
    json: bool,
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

    let catalog = Catalog::load(&config.catalog_path)?.catalog;

    if args.drift {
        let lineage = LineageIndex::build(&catalog);
        let findings = find_drift(&catalog, &lineage);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&findings)?);
        } else if findings.is_empty() {
            println!("All Support cards match their canonical boosts.");
        } else {
            println!("Found {} support cards out of date:", findings.len());
            for finding in &findings {
                println!("{}", serde_json::to_string(finding)?);
            }
        }
        return Ok(());
    }

    let missing = find_missing(&catalog);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&missing)?);
    } else if missing.is_empty() {
        println!("All Support cards have ability and boost fields.");
    } else {
        println!("Found {} support cards missing ability/boost:", missing.len());
        for entry in &missing {
            println!("{}", serde_json::to_string(entry)?);
        }
    }

    Ok(())
}
