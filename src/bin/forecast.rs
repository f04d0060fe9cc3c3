//! Project minimum qualifying scores from a history CSV

use anyhow::{Context, Result};
use clap::Parser;
use household_points::forecast::{fit_trend, next_years, predict, DEFAULT_HORIZON};
use household_points::loader::load_history;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "forecast", about = "Forecast minimum qualifying scores")]
struct Args {
    /// History CSV with year,score columns
    #[arg(long)]
    history: PathBuf,

    /// Number of years to project
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    years: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let history = load_history(&args.history)
        .with_context(|| format!("failed to load history {}", args.history.display()))?;
    log::info!("loaded {} history point(s)", history.len());

    match fit_trend(&history) {
        Some(line) => println!("Trend: {:+.2} per year", line.slope),
        None => println!("Not enough known history for a trend"),
    }

    println!("{:<6} {:<10} {:<10}", "Year", "Actual", "Forecast");
    for point in &history {
        let actual = point
            .score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<10} {:<10}", point.year, actual, "");
    }

    let years = next_years(&history, args.years);
    for prediction in predict(&history, &years) {
        let forecast = prediction
            .score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<10} {:<10}", prediction.year, "", forecast);
    }

    Ok(())
}
