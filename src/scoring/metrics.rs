use clap::ValueEnum;

use super::engine::OptionSummary;

/// Equality fuzz for win/lose/tie classification.
///
/// Applied uniformly to every metric regardless of scale, matching the
/// original comparison rule. Near-ties on currency-scale metrics can still
/// classify as decisive; see DESIGN.md before changing this.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Whether a larger value of a metric is the better one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// The six derived metrics of an option summary.
///
/// A closed enum with an exhaustive polarity match: adding a metric without
/// declaring its polarity is a compile error, not a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    PreferenceScore,
    ConversionUplift,
    NewIntent,
    Cost,
    RevenuePerUnit,
    NetPerUnit,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::PreferenceScore,
        Metric::ConversionUplift,
        Metric::NewIntent,
        Metric::Cost,
        Metric::RevenuePerUnit,
        Metric::NetPerUnit,
    ];

    /// Cost is the only metric where lower is better.
    pub fn polarity(self) -> Polarity {
        match self {
            Metric::PreferenceScore
            | Metric::ConversionUplift
            | Metric::NewIntent
            | Metric::RevenuePerUnit
            | Metric::NetPerUnit => Polarity::HigherIsBetter,
            Metric::Cost => Polarity::LowerIsBetter,
        }
    }

    /// Extract this metric's display value from a summary. Uplift and intent
    /// are surfaced in percentage points / percent, the rest as-is.
    pub fn value(self, summary: &OptionSummary) -> f64 {
        match self {
            Metric::PreferenceScore => summary.adjusted_score,
            Metric::ConversionUplift => summary.intent_uplift * 100.0,
            Metric::NewIntent => summary.new_intent * 100.0,
            Metric::Cost => summary.cost,
            Metric::RevenuePerUnit => summary.revenue_per_unit,
            Metric::NetPerUnit => summary.net_per_unit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::PreferenceScore => "Preference score",
            Metric::ConversionUplift => "Conversion uplift (p.p.)",
            Metric::NewIntent => "New intent (%)",
            Metric::Cost => "Cost",
            Metric::RevenuePerUnit => "Revenue +/unit",
            Metric::NetPerUnit => "Net result +/unit",
        }
    }

    /// True for metrics displayed as currency amounts.
    pub fn is_currency(self) -> bool {
        matches!(
            self,
            Metric::Cost | Metric::RevenuePerUnit | Metric::NetPerUnit
        )
    }
}

/// Per-option comparison outcome for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

/// Classify a pair of metric values: tie within tolerance, otherwise the
/// value favored by the polarity wins.
pub fn compare(value_a: f64, value_b: f64, polarity: Polarity) -> (Outcome, Outcome) {
    if (value_a - value_b).abs() < TIE_TOLERANCE {
        return (Outcome::Tie, Outcome::Tie);
    }
    let a_wins = match polarity {
        Polarity::HigherIsBetter => value_a > value_b,
        Polarity::LowerIsBetter => value_a < value_b,
    };
    if a_wins {
        (Outcome::Win, Outcome::Lose)
    } else {
        (Outcome::Lose, Outcome::Win)
    }
}

/// Classify any number of values at once: options within tolerance of the
/// best value win, the rest lose; everything within tolerance of everything
/// else is a full tie. For two values this agrees with [`compare`].
pub fn classify(values: &[f64], polarity: Polarity) -> Vec<Outcome> {
    if values.is_empty() {
        return Vec::new();
    }
    let best = match polarity {
        Polarity::HigherIsBetter => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Polarity::LowerIsBetter => values.iter().copied().fold(f64::INFINITY, f64::min),
    };
    let all_tied = values.iter().all(|v| (v - best).abs() < TIE_TOLERANCE);
    values
        .iter()
        .map(|v| {
            if all_tied {
                Outcome::Tie
            } else if (v - best).abs() < TIE_TOLERANCE {
                Outcome::Win
            } else {
                Outcome::Lose
            }
        })
        .collect()
}

/// Summaries ordered by a metric: best first per its polarity. The sort is
/// stable, so equal values keep their input order. The returned iterator is
/// `Clone`, making the sequence restartable.
pub fn rank<'a>(
    summaries: &'a [OptionSummary],
    metric: Metric,
) -> impl Iterator<Item = &'a OptionSummary> + Clone {
    let mut ordered: Vec<&OptionSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| {
        let (x, y) = (metric.value(a), metric.value(b));
        let cmp = match metric.polarity() {
            Polarity::HigherIsBetter => y.partial_cmp(&x),
            Polarity::LowerIsBetter => x.partial_cmp(&y),
        };
        cmp.unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, adjusted_score: f64, cost: f64) -> OptionSummary {
        OptionSummary {
            name: name.to_string(),
            raw_score: adjusted_score,
            adjusted_score,
            intent_uplift: adjusted_score * 0.25,
            new_intent: 0.3,
            cost,
            revenue_per_unit: 0.0,
            net_per_unit: 0.0,
        }
    }

    #[test]
    fn test_every_metric_has_expected_polarity() {
        for metric in Metric::ALL {
            let expected = if metric == Metric::Cost {
                Polarity::LowerIsBetter
            } else {
                Polarity::HigherIsBetter
            };
            assert_eq!(metric.polarity(), expected);
        }
    }

    #[test]
    fn test_compare_equal_values_tie_any_polarity() {
        for x in [0.0, -0.08, 123_456.789] {
            for polarity in [Polarity::HigherIsBetter, Polarity::LowerIsBetter] {
                assert_eq!(compare(x, x, polarity), (Outcome::Tie, Outcome::Tie));
            }
        }
    }

    #[test]
    fn test_compare_within_tolerance_is_tie() {
        let (a, b) = compare(0.1, 0.1 + 1e-10, Polarity::HigherIsBetter);
        assert_eq!((a, b), (Outcome::Tie, Outcome::Tie));
    }

    #[test]
    fn test_compare_higher_better() {
        assert_eq!(
            compare(0.32, -0.08, Polarity::HigherIsBetter),
            (Outcome::Win, Outcome::Lose)
        );
    }

    #[test]
    fn test_compare_lower_better_for_cost() {
        assert_eq!(
            compare(11_500.0, 0.0, Polarity::LowerIsBetter),
            (Outcome::Lose, Outcome::Win)
        );
    }

    #[test]
    fn test_compare_antisymmetric() {
        let cases = [(0.32, -0.08), (100.0, 200.0), (-5.0, 3.0)];
        for polarity in [Polarity::HigherIsBetter, Polarity::LowerIsBetter] {
            for (a, b) in cases {
                let (ra, rb) = compare(a, b, polarity);
                let (sb, sa) = compare(b, a, polarity);
                assert_eq!((ra, rb), (sa, sb));
            }
        }
    }

    #[test]
    fn test_classify_matches_pairwise_compare() {
        let (a, b) = compare(0.32, -0.08, Polarity::HigherIsBetter);
        assert_eq!(
            classify(&[0.32, -0.08], Polarity::HigherIsBetter),
            vec![a, b]
        );
    }

    #[test]
    fn test_classify_three_way() {
        let outcomes = classify(&[0.32, -0.08, 0.11], Polarity::HigherIsBetter);
        assert_eq!(outcomes, vec![Outcome::Win, Outcome::Lose, Outcome::Lose]);
    }

    #[test]
    fn test_classify_all_equal_is_full_tie() {
        let outcomes = classify(&[5.0, 5.0, 5.0], Polarity::LowerIsBetter);
        assert_eq!(outcomes, vec![Outcome::Tie; 3]);
    }

    #[test]
    fn test_rank_descending_for_higher_better() {
        let summaries = vec![
            summary("A", -0.08, 0.0),
            summary("B", 0.32, 11_500.0),
            summary("C", 0.11, 6_500.0),
        ];
        let names: Vec<&str> = rank(&summaries, Metric::PreferenceScore)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_ascending_for_cost() {
        let summaries = vec![
            summary("A", -0.08, 15_000.0),
            summary("B", 0.32, 0.0),
            summary("C", 0.11, 6_500.0),
        ];
        let names: Vec<&str> = rank(&summaries, Metric::Cost)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let summaries = vec![
            summary("A", 0.11, 0.0),
            summary("B", 0.11, 0.0),
            summary("C", 0.11, 0.0),
        ];
        let names: Vec<&str> = rank(&summaries, Metric::PreferenceScore)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rank_is_restartable() {
        let summaries = vec![summary("A", 0.1, 0.0), summary("B", 0.2, 0.0)];
        let ranked = rank(&summaries, Metric::PreferenceScore);
        let first: Vec<&str> = ranked.clone().map(|s| s.name.as_str()).collect();
        let second: Vec<&str> = ranked.map(|s| s.name.as_str()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_metric_value_scales_fractions_to_percent() {
        let s = summary("A", -0.08, 0.0);
        assert!((Metric::ConversionUplift.value(&s) - (-2.0)).abs() < 1e-9);
        assert!((Metric::NewIntent.value(&s) - 30.0).abs() < 1e-9);
    }
}
