//! Estimate one household's total priority score
//!
//! Reads either a JSON request document or a member CSV plus flags, and
//! prints the per-member breakdown, the formula, and the score forecast.

use anyhow::{bail, Context, Result};
use clap::Parser;
use household_points::household::HouseholdParams;
use household_points::loader::{load_history, load_household_request, load_members};
use household_points::rules::{LegacyRegime, OrdinaryRule, ScoringRules, YearCounting};
use household_points::{Generations, HouseholdRequest};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "estimate", about = "Estimate a household's total priority score")]
struct Args {
    /// Member CSV (id,name,role,... columns)
    #[arg(long, conflicts_with = "request", required_unless_present = "request")]
    members: Option<PathBuf>,

    /// JSON request with params, members, history, and rules
    #[arg(long)]
    request: Option<PathBuf>,

    /// History CSV (year,score) used for the forecast
    #[arg(long)]
    history: Option<PathBuf>,

    /// Year of reckoning (default: current year)
    #[arg(long)]
    stat_year: Option<i32>,

    /// First year of the family-level application
    #[arg(long)]
    family_start_year: Option<i32>,

    /// Family generations among applicants (1-3)
    #[arg(long)]
    generations: Option<u8>,

    /// Leave the spouse out of the application
    #[arg(long)]
    exclude_spouse: bool,

    /// JSON rule set; flags below override individual rules
    #[arg(long)]
    rules: Option<PathBuf>,

    #[arg(long, value_enum)]
    counting: Option<YearCounting>,

    #[arg(long, value_enum)]
    ordinary: Option<OrdinaryRule>,

    #[arg(long, value_enum)]
    legacy: Option<LegacyRegime>,

    /// Years to forecast past the latest history year
    #[arg(long)]
    forecast_years: Option<usize>,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

fn build_request(args: &Args) -> Result<HouseholdRequest> {
    let mut request = match (&args.request, &args.members) {
        (Some(path), _) => load_household_request(path)
            .with_context(|| format!("failed to load request {}", path.display()))?,
        (None, Some(path)) => HouseholdRequest {
            params: HouseholdParams::default(),
            members: load_members(path)
                .with_context(|| format!("failed to load members {}", path.display()))?,
            history: Vec::new(),
            rules: ScoringRules::default(),
            forecast_years: household_points::forecast::DEFAULT_HORIZON,
        },
        (None, None) => bail!("either --members or --request is required"),
    };

    if let Some(path) = &args.rules {
        let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        request.rules = ScoringRules::from_json_reader(file)
            .with_context(|| format!("invalid rules file {}", path.display()))?;
    }
    if let Some(counting) = args.counting {
        request.rules.year_counting = counting;
    }
    if let Some(ordinary) = args.ordinary {
        request.rules.ordinary_rule = ordinary;
    }
    if let Some(legacy) = args.legacy {
        request.rules.legacy_regime = legacy;
    }

    if let Some(year) = args.stat_year {
        request.params.stat_year = year;
    }
    if let Some(year) = args.family_start_year {
        request.params.family_apply_start_year = Some(year);
    }
    if let Some(generations) = args.generations {
        request.params.generations = Generations::new(generations);
    }
    if args.exclude_spouse {
        request.params.include_spouse = false;
    }

    if let Some(path) = &args.history {
        request.history = load_history(path)
            .with_context(|| format!("failed to load history {}", path.display()))?;
    }
    if let Some(years) = args.forecast_years {
        request.forecast_years = years;
    }

    Ok(request)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let request = build_request(&args)?;
    log::info!(
        "estimating {} member(s) for stat year {}",
        request.members.len(),
        request.params.stat_year
    );
    let response = request.evaluate();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let report = &response.estimate;
    if !report.ok {
        bail!("{}", report.message);
    }

    println!("Stat year {}", request.params.stat_year);
    for member in &report.detail {
        println!(
            "  {:<16} {:<15} {}",
            member.name,
            member.role.label(),
            member.summary_line()
        );
    }
    println!();
    println!("Household total: {}", report.total);
    println!("{}", report.formula_text);

    if !response.forecast.is_empty() {
        println!();
        println!("{:<6} {:<10}", "Year", "Forecast");
        for prediction in &response.forecast {
            match prediction.score {
                Some(score) => println!("{:<6} {:<10.1}", prediction.year, score),
                None => println!("{:<6} {:<10}", prediction.year, "-"),
            }
        }
    }

    println!();
    println!("Estimate only; the official system's figures govern.");
    Ok(())
}
