//! packconf - command-line entry point
//!
//! Loads the catalog (built-in or from `--catalog`), then dispatches to the
//! quote, catalog listing, validation or replay commands.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use packconf::cli::{Assignment, Cli, Commands};
use packconf::labels::format_price;
use packconf::{replay, Catalog, Selections, Session};

/// Initialize logging to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    debug!("CLI arguments parsed");

    let loaded;
    let catalog: &Catalog = match &cli.catalog {
        Some(path) => {
            loaded = Catalog::load_from_file(path)?;
            &loaded
        }
        None => Catalog::builtin(),
    };

    match cli.command {
        Some(Commands::Catalog { json }) => print_catalog(catalog, json)?,
        Some(Commands::Quote {
            selections,
            set,
            json,
        }) => run_quote(catalog, selections.as_deref(), &set, json)?,
        Some(Commands::Validate { file }) => validate_catalog(&file),
        Some(Commands::Replay {
            script,
            auto_advance_ms,
            json,
        }) => run_replay(catalog, &script, Duration::from_millis(auto_advance_ms), json)?,
        None => {
            info!("No command specified, quoting default selections");
            run_quote(catalog, None, &[], false)?;
        }
    }

    Ok(())
}

/// Print every section with its options, then the quantity tiers
fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    for section in catalog.sections() {
        let mode = if section.multi_select { " (multi-select)" } else { "" };
        println!("{}. {} [{}]{}", section.step, section.title, section.id, mode);
        for option in section.options() {
            println!("     {:<20} {:<32} {}", option.id, option.label, option.price_badge());
        }
        for sub in section.subsections() {
            let mode = if sub.multi_select { " (multi-select)" } else { "" };
            println!("   - {} [{}]{}", sub.title, sub.id, mode);
            for option in &sub.options {
                println!("       {:<18} {:<32} {}", option.id, option.label, option.price_badge());
            }
        }
    }

    println!();
    println!("Quantity tiers:");
    for tier in catalog.quantity_tiers().iter() {
        println!("   {:>6}  {}/unit", tier.quantity, format_price(tier.price));
    }
    Ok(())
}

fn run_quote(
    catalog: &Catalog,
    preset: Option<&Path>,
    assignments: &[Assignment],
    json: bool,
) -> Result<()> {
    let mut session = match preset {
        Some(path) => {
            info!("Loading selections from {:?}", path);
            Session::with_selections(catalog, Selections::load_from_file(path)?)
        }
        None => Session::new(catalog),
    };

    for assignment in assignments {
        session.select(&assignment.target, &assignment.option);
    }

    let summary = session.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

fn validate_catalog(path: &Path) {
    info!("Validating catalog file: {:?}", path);
    match Catalog::load_from_file(path) {
        Ok(catalog) => {
            println!(
                "✓ Catalog is valid: {} sections, {} quantity tiers",
                catalog.total_steps(),
                catalog.quantity_tiers().len()
            );
        }
        Err(e) => {
            error!("Catalog validation failed: {:#}", e);
            eprintln!("✗ Catalog validation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run_replay(catalog: &Catalog, script: &Path, delay: Duration, json: bool) -> Result<()> {
    let actions = replay::load_script(script)?;
    info!("Replaying {} actions from {:?}", actions.len(), script);
    let report = replay::run(catalog, &actions, delay);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (index, event) in report.events.iter().enumerate() {
        println!(
            "{:>3}. {:<32} step {:<2} total {}",
            index + 1,
            event.action.to_string(),
            event.active_step,
            format_price(event.total)
        );
    }
    println!();
    if report.all_completed {
        println!("All steps completed.");
    }
    println!("{}", report.summary);
    Ok(())
}
