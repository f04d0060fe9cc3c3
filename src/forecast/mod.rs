//! Minimum qualifying score trend forecasting
//!
//! Fits an ordinary least-squares line through the known (year, score)
//! observations and projects it forward. Too little data is a normal state,
//! not an error: every requested year then comes back unset.

use serde::{Deserialize, Serialize};

/// Only the most recent observations feed the fit
pub const MAX_HISTORY_POINTS: usize = 5;

/// Default number of years projected, also the longest horizon served
pub const DEFAULT_HORIZON: usize = 5;

/// Historical qualifying score; `None` when unknown for that year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub year: i32,
    #[serde(default)]
    pub score: Option<f64>,
}

impl HistoryPoint {
    pub fn known(year: i32, score: f64) -> Self {
        Self { year, score: Some(score) }
    }

    pub fn unknown(year: i32) -> Self {
        Self { year, score: None }
    }
}

/// Projected score; `None` when the history cannot support a fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub year: i32,
    pub score: Option<f64>,
}

/// Fitted `score = slope * year + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn at(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Latest `MAX_HISTORY_POINTS` entries by year, ascending
fn recent(history: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let mut points = history.to_vec();
    points.sort_by_key(|p| p.year);
    let skip = points.len().saturating_sub(MAX_HISTORY_POINTS);
    points.split_off(skip)
}

/// Least-squares fit over the known points.
/// Returns None with fewer than two known points or when all years coincide.
pub fn fit_trend(history: &[HistoryPoint]) -> Option<TrendLine> {
    let known: Vec<(f64, f64)> = recent(history)
        .into_iter()
        .filter_map(|p| p.score.filter(|s| s.is_finite()).map(|s| (p.year as f64, s)))
        .collect();

    if known.len() < 2 {
        return None;
    }

    let n = known.len() as f64;
    let sum_x: f64 = known.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = known.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = known.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = known.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(TrendLine { slope, intercept })
}

/// Round to one decimal place and floor at zero
fn clean_score(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    rounded.max(0.0)
}

/// Project one score per requested year, in the order requested
pub fn predict(history: &[HistoryPoint], future_years: &[i32]) -> Vec<Prediction> {
    let line = fit_trend(history);
    if line.is_none() {
        log::debug!("insufficient history for trend fit ({} points)", history.len());
    }

    future_years
        .iter()
        .map(|&year| Prediction {
            year,
            score: line.map(|l| clean_score(l.at(year))),
        })
        .collect()
}

/// Up to `count` years following the latest history year.
/// The horizon is capped at `DEFAULT_HORIZON` and stops at the last representable year.
pub fn next_years(history: &[HistoryPoint], count: usize) -> Vec<i32> {
    let Some(last) = history.iter().map(|p| p.year).max() else {
        return Vec::new();
    };
    if count > DEFAULT_HORIZON {
        log::warn!("forecast horizon {} capped at {}", count, DEFAULT_HORIZON);
    }
    (1..=count.min(DEFAULT_HORIZON) as i32)
        .map_while(|offset| last.checked_add(offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_history() -> Vec<HistoryPoint> {
        vec![
            HistoryPoint::known(2020, 30.0),
            HistoryPoint::known(2021, 32.0),
            HistoryPoint::unknown(2022),
            HistoryPoint::known(2023, 36.0),
            HistoryPoint::known(2024, 38.0),
        ]
    }

    #[test]
    fn test_fit_exact_line() {
        let line = fit_trend(&sample_history()).expect("fits");
        assert_abs_diff_eq!(line.slope, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(line.at(2022), 34.0, epsilon = 1e-6);
    }

    #[test]
    fn test_predict_next_years() {
        let history = sample_history();
        let years = next_years(&history, DEFAULT_HORIZON);
        assert_eq!(years, vec![2025, 2026, 2027, 2028, 2029]);

        let predictions = predict(&history, &years);
        let scores: Vec<Option<f64>> = predictions.iter().map(|p| p.score).collect();
        assert_eq!(
            scores,
            vec![Some(40.0), Some(42.0), Some(44.0), Some(46.0), Some(48.0)]
        );
    }

    #[test]
    fn test_next_years_horizon_capped() {
        let years = next_years(&sample_history(), 40);
        assert_eq!(years, vec![2025, 2026, 2027, 2028, 2029]);
        assert_eq!(next_years(&sample_history(), 2), vec![2025, 2026]);
        assert!(next_years(&sample_history(), 0).is_empty());
        assert!(next_years(&[], 3).is_empty());
    }

    #[test]
    fn test_next_years_stops_at_last_year() {
        let history = vec![HistoryPoint::known(i32::MAX - 1, 1.0)];
        assert_eq!(next_years(&history, DEFAULT_HORIZON), vec![i32::MAX]);
        assert!(next_years(&[HistoryPoint::unknown(i32::MAX)], 3).is_empty());
    }

    #[test]
    fn test_insufficient_history_is_unset() {
        let history = vec![HistoryPoint::known(2024, 40.0), HistoryPoint::unknown(2023)];
        let predictions = predict(&history, &[2025, 2026]);

        assert_eq!(predictions.len(), 2);
        assert!(predictions.iter().all(|p| p.score.is_none()));
        assert!(predict(&[], &[2025]).iter().all(|p| p.score.is_none()));
    }

    #[test]
    fn test_same_year_is_degenerate() {
        let history = vec![HistoryPoint::known(2024, 40.0), HistoryPoint::known(2024, 44.0)];
        assert!(fit_trend(&history).is_none());
        assert_eq!(predict(&history, &[2025])[0].score, None);
    }

    #[test]
    fn test_never_negative() {
        let history = vec![
            HistoryPoint::known(2020, 20.0),
            HistoryPoint::known(2021, 10.0),
            HistoryPoint::known(2022, 1.0),
        ];
        let predictions = predict(&history, &[2023, 2024, 2030]);
        assert!(predictions.iter().all(|p| p.score == Some(0.0)));
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let history = vec![
            HistoryPoint::known(2022, 30.0),
            HistoryPoint::known(2023, 31.0),
            HistoryPoint::known(2024, 31.5),
        ];
        // slope 0.75, mean (2023, 30.8333)
        let predicted = predict(&history, &[2025])[0].score.expect("predicted");
        assert_abs_diff_eq!(predicted, 32.3, epsilon = 1e-9);
    }

    #[test]
    fn test_order_independent() {
        let mut shuffled = sample_history();
        shuffled.reverse();
        assert_eq!(predict(&shuffled, &[2027]), predict(&sample_history(), &[2027]));
    }

    #[test]
    fn test_refit_on_own_output_is_stable() {
        let history = vec![
            HistoryPoint::known(2020, 41.0),
            HistoryPoint::known(2021, 43.5),
            HistoryPoint::known(2022, 44.0),
            HistoryPoint::known(2023, 47.5),
        ];
        let years = [2024, 2025, 2026, 2027, 2028];
        let first = fit_trend(&history).expect("fits");

        let fed_back: Vec<HistoryPoint> = years
            .iter()
            .map(|&year| HistoryPoint::known(year, first.at(year)))
            .collect();
        let second = fit_trend(&fed_back).expect("fits");

        assert_abs_diff_eq!(first.slope, second.slope, epsilon = 1e-6);
        assert_abs_diff_eq!(first.at(2030), second.at(2030), epsilon = 1e-6);
        assert_eq!(predict(&fed_back, &years), predict(&history, &years));
    }

    #[test]
    fn test_only_latest_five_points_used() {
        let mut history = vec![HistoryPoint::known(2010, 500.0)];
        history.extend(sample_history());
        assert_eq!(fit_trend(&history), fit_trend(&sample_history()));
    }
}
