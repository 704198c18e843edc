//! Card Boosts - Roster Evaluator
//!
//! Loads the card catalog and prints the team boosts a roster of card ids
//! grants, either as totals or as a per-card breakdown.

use card_boosts::boost::TeamEvaluator;
use card_boosts::catalog::{Catalog, LineageIndex};
use card_boosts::core::config::EngineConfig;
use card_boosts::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Evaluate the team boosts of a roster
#[derive(Parser, Debug)]
#[command(name = "card_boosts")]
#[command(about = "Compute the ATK/HP/SPECIAL boosts a roster grants its team")]
struct Args {
    /// Config file (defaults to boosts.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file, overriding the configured path
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print one line per card as well as the totals
    #[arg(long, short = 'd')]
    detailed: bool,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Card ids making up the roster
    #[arg(required = true)]
    ids: Vec<String>,
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

    let scan = Catalog::load(&config.catalog_path)?;
    if !scan.skipped.is_empty() {
        tracing::warn!(
            "{} catalog records could not be read",
            scan.skipped.len()
        );
    }
    let catalog = scan.catalog;
    let lineage = LineageIndex::build(&catalog);
    let evaluator = TeamEvaluator::new(&catalog, &lineage);

    tracing::info!(
        "Loaded {} cards in {} lineages from {}",
        catalog.len(),
        lineage.len(),
        config.catalog_path.display()
    );

    if args.detailed {
        let report = evaluator.team_boosts_detailed(&args.ids);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for entry in &report.details {
                let reason = entry.reason.map_or("no boost", |r| r.as_str());
                println!(
                    "{:<20} ATK {:>3}  HP {:>3}  SPECIAL {:>3}  ({})",
                    entry.name.as_deref().unwrap_or(&entry.id),
                    entry.atk,
                    entry.hp,
                    entry.special,
                    reason
                );
            }
            println!("Total: {}", report.totals);
        }
    } else {
        let totals = evaluator.team_boosts(&args.ids);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&totals)?);
        } else {
            println!("Total: {}", totals);
        }
    }

    Ok(())
}
