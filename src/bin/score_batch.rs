//! Score every household in a member CSV
//!
//! Members are grouped by the `household` column and households are scored
//! in parallel. Writes one CSV row per household.

use anyhow::{Context, Result};
use clap::Parser;
use household_points::household::{aggregate, current_year, EstimateReport, HouseholdParams};
use household_points::loader::load_households;
use household_points::rules::{LegacyRegime, OrdinaryRule, ScoringRules, YearCounting};
use rayon::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "score_batch", about = "Score all households in a member CSV")]
struct Args {
    /// Member CSV with a household column
    #[arg(long)]
    members: PathBuf,

    #[arg(long, default_value = "household_scores.csv")]
    output: PathBuf,

    #[arg(long)]
    stat_year: Option<i32>,

    #[arg(long)]
    family_start_year: Option<i32>,

    #[arg(long, default_value_t = 2)]
    generations: u8,

    #[arg(long)]
    exclude_spouse: bool,

    #[arg(long, value_enum, default_value = "inclusive")]
    counting: YearCounting,

    #[arg(long, value_enum, default_value = "round-based")]
    ordinary: OrdinaryRule,

    #[arg(long, value_enum, default_value = "half-capped")]
    legacy: LegacyRegime,
}

/// One output row per household
#[derive(Debug, serde::Serialize)]
struct HouseholdRow {
    household: String,
    members: usize,
    ok: bool,
    total: u32,
    formula: String,
    message: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let households = load_households(&args.members)
        .with_context(|| format!("failed to load {}", args.members.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    let mut params = HouseholdParams::new(
        args.stat_year.unwrap_or_else(current_year),
        args.generations,
        !args.exclude_spouse,
    );
    params.family_apply_start_year = args.family_start_year;

    let rules = ScoringRules::default()
        .with_year_counting(args.counting)
        .with_ordinary_rule(args.ordinary)
        .with_legacy_regime(args.legacy);

    let score_start = Instant::now();
    let rows: Vec<HouseholdRow> = households
        .par_iter()
        .map(|(household, members)| {
            let report = EstimateReport::from(aggregate(members, &params, &rules));
            HouseholdRow {
                household: household.clone(),
                members: members.len(),
                ok: report.ok,
                total: report.total,
                formula: report.formula_text,
                message: report.message,
            }
        })
        .collect();
    println!("Scored in {:?}", score_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    let failed = rows.iter().filter(|row| !row.ok).count();
    if failed > 0 {
        log::warn!("{} household(s) failed validation", failed);
    }
    if let Some(top) = rows.iter().filter(|row| row.ok).max_by_key(|row| row.total) {
        println!("\nHighest total: {} ({})", top.total, top.household);
    }
    println!("Failed validation: {}", failed);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
