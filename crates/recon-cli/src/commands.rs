use anyhow::{Context, Result};

use recon_cli::pipeline::{compare, map_repositories};
use recon_cli::snapshot::Snapshot;

use crate::cli::{CompareArgs, MapArgs};
use crate::summary::{print_comparison, print_mapping};

pub fn run_map(args: &MapArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let outcome = map_repositories(
        &snapshot,
        args.source.as_deref(),
        args.target.as_deref(),
        args.min_similarity,
    )?;
    if args.json {
        print_json(&outcome)?;
    } else {
        print_mapping(&outcome);
    }
    Ok(())
}

/// Returns true when the run should fail because some rows are not valid.
pub fn run_compare(args: &CompareArgs) -> Result<bool> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let outcome = compare(&snapshot, &args.org_unit, &args.period, args.min_similarity)?;
    if args.json {
        print_json(&outcome)?;
    } else {
        print_comparison(&outcome);
    }
    Ok(args.fail_on_mismatch && outcome.has_problems())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

