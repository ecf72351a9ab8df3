use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{classify, Metric, OptionSummary, Outcome, Polarity, SimParams};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Group an already-rounded value into thousands: 400000 -> "400,000".
/// The sign stays in front of the grouped digits.
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Currency amount with prefix: "R$ 11,500", "R$ -8,000".
pub fn format_currency(value: f64, currency: &str) -> String {
    format!("{} {}", currency, group_thousands(value))
}

/// Display format for one metric value, per the fixed contract:
/// score 2 decimals, uplift 1 decimal, intent integer percent, currency
/// metrics thousands-grouped integers.
pub fn format_metric_value(metric: Metric, value: f64, currency: &str) -> String {
    match metric {
        Metric::PreferenceScore => format!("{:.2}", value),
        Metric::ConversionUplift => format!("{:.1}", value),
        Metric::NewIntent => format!("{:.0}%", value),
        Metric::Cost | Metric::RevenuePerUnit | Metric::NetPerUnit => {
            format_currency(value, currency)
        }
    }
}

fn paint(text: &str, outcome: Outcome, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match outcome {
        Outcome::Win => format!("{}", text.green().bold()),
        Outcome::Lose => format!("{}", text.red()),
        Outcome::Tie => text.to_string(),
    }
}

/// Per-metric win/lose/tie outcomes across all summaries, in metric order.
fn metric_outcomes(summaries: &[OptionSummary]) -> Vec<(Metric, Vec<Outcome>)> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = summaries.iter().map(|s| metric.value(s)).collect();
            (metric, classify(&values, metric.polarity()))
        })
        .collect()
}

/// One card per option: the six metrics with winners in green and losers in
/// red, judged against every other option.
pub fn format_cards(summaries: &[OptionSummary], currency: &str, use_colors: bool) -> String {
    if summaries.is_empty() {
        return "No options configured.".to_string();
    }

    let outcomes = metric_outcomes(summaries);
    let label_width = Metric::ALL
        .iter()
        .map(|m| m.label().len())
        .max()
        .unwrap_or(0);

    summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let header = format!("Option {}", summary.name);
            let header = if use_colors {
                format!("{}", header.bold().underline())
            } else {
                header
            };
            let lines: Vec<String> = outcomes
                .iter()
                .map(|(metric, per_option)| {
                    let value = format_metric_value(*metric, metric.value(summary), currency);
                    format!(
                        "  {:<width$}  {}",
                        metric.label(),
                        paint(&value, per_option[i], use_colors),
                        width = label_width
                    )
                })
                .collect();
            format!("{}\n{}", header, lines.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Metrics as rows, options as columns, values right-aligned. Colors are
/// applied after padding so alignment survives them.
pub fn format_table(summaries: &[OptionSummary], currency: &str, use_colors: bool) -> String {
    if summaries.is_empty() {
        return "No options configured.".to_string();
    }

    let outcomes = metric_outcomes(summaries);
    let label_width = Metric::ALL
        .iter()
        .map(|m| m.label().len())
        .max()
        .unwrap_or(0);

    // Column width per option: widest value or the option name.
    let cells: Vec<Vec<String>> = outcomes
        .iter()
        .map(|(metric, _)| {
            summaries
                .iter()
                .map(|s| format_metric_value(*metric, metric.value(s), currency))
                .collect()
        })
        .collect();
    let col_widths: Vec<usize> = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(s.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::new();
    let header: Vec<String> = summaries
        .iter()
        .zip(&col_widths)
        .map(|(s, w)| format!("{:>width$}", s.name, width = w))
        .collect();
    lines.push(format!(
        "{:<width$}  {}",
        "Metric",
        header.join("  "),
        width = label_width
    ));

    for (row_idx, (metric, per_option)) in outcomes.iter().enumerate() {
        let row: Vec<String> = cells[row_idx]
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let padded = format!("{:>width$}", value, width = col_widths[i]);
                paint(&padded, per_option[i], use_colors)
            })
            .collect();
        lines.push(format!(
            "{:<width$}  {}",
            metric.label(),
            row.join("  "),
            width = label_width
        ));
    }

    lines.join("\n")
}

/// Horizontal bar chart for one metric, scaled to the widest value and the
/// terminal width. Bars for negative values render to the same scale.
pub fn format_bars(summaries: &[OptionSummary], metric: Metric, currency: &str) -> String {
    if summaries.is_empty() {
        return "No options configured.".to_string();
    }

    let values: Vec<f64> = summaries.iter().map(|s| metric.value(s)).collect();
    let max_abs = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

    let name_width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(1);
    let max_bar = get_terminal_width()
        .map(|w| w.saturating_sub(name_width + 20).clamp(10, 60))
        .unwrap_or(40);

    let mut lines = vec![metric.label().to_string()];
    for (summary, value) in summaries.iter().zip(&values) {
        let len = if max_abs > 0.0 {
            ((value.abs() / max_abs) * max_bar as f64).round() as usize
        } else {
            0
        };
        let bar: String = "\u{2588}".repeat(len.max(usize::from(*value != 0.0)));
        lines.push(format!(
            "  {:<nw$}  {} {}",
            summary.name,
            format_metric_value(metric, *value, currency),
            bar,
            nw = name_width
        ));
    }
    lines.join("\n")
}

/// Softmax choice shares, one line per option with a percentage bar.
pub fn format_shares(names: &[String], probabilities: &[f64], use_colors: bool) -> String {
    if names.is_empty() {
        return "No options configured.".to_string();
    }

    // Same tie semantics as the cards and table: an even split is a tie,
    // not a field of winners.
    let outcomes = classify(probabilities, Polarity::HigherIsBetter);
    let name_width = names.iter().map(String::len).max().unwrap_or(1);

    names
        .iter()
        .zip(probabilities)
        .zip(&outcomes)
        .map(|((name, p), outcome)| {
            let bar: String = "\u{2588}".repeat((p * 40.0).round() as usize);
            let line = format!("{:<nw$}  {:>5.1}%  {}", name, p * 100.0, bar, nw = name_width);
            if use_colors && *outcome == Outcome::Win {
                format!("{}", line.green().bold())
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Projected totals for a cohort: per-option revenue and net scaled by the
/// configured cohort size.
pub fn format_cohort(summaries: &[OptionSummary], params: &SimParams, currency: &str) -> String {
    let units = params.cohort_size as f64;
    let mut lines = vec![format!("Projected over {} units:", params.cohort_size)];
    for summary in summaries {
        lines.push(format!(
            "  {}: revenue {}, net {}",
            summary.name,
            format_currency(summary.revenue_per_unit * units, currency),
            format_currency(summary.net_per_unit * units, currency),
        ));
    }
    lines.join("\n")
}

/// Tab-separated values for scripting: one row per option, six metric
/// columns after the name (no headers, no colors, no grouping).
pub fn format_tsv(summaries: &[OptionSummary]) -> String {
    summaries
        .iter()
        .map(|s| {
            format!(
                "{}\t{:.2}\t{:.1}\t{:.0}\t{:.0}\t{:.0}\t{:.0}",
                s.name,
                Metric::PreferenceScore.value(s),
                Metric::ConversionUplift.value(s),
                Metric::NewIntent.value(s),
                s.cost,
                s.revenue_per_unit,
                s.net_per_unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty JSON array of the raw summaries.
pub fn format_json(summaries: &[OptionSummary]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, adjusted_score: f64, cost: f64) -> OptionSummary {
        let intent_uplift = adjusted_score * 0.25;
        let revenue_per_unit = intent_uplift * 400_000.0;
        OptionSummary {
            name: name.to_string(),
            raw_score: adjusted_score,
            adjusted_score,
            intent_uplift,
            new_intent: (0.30 + intent_uplift).clamp(0.0, 1.0),
            cost,
            revenue_per_unit,
            net_per_unit: revenue_per_unit - cost,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(11_500.0), "11,500");
        assert_eq!(group_thousands(400_000.0), "400,000");
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
        assert_eq!(group_thousands(-8_000.0), "-8,000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(11_500.0, "R$"), "R$ 11,500");
        assert_eq!(format_currency(-8_000.4, "R$"), "R$ -8,000");
    }

    #[test]
    fn test_metric_value_formats() {
        assert_eq!(
            format_metric_value(Metric::PreferenceScore, -0.08, "R$"),
            "-0.08"
        );
        assert_eq!(
            format_metric_value(Metric::ConversionUplift, -2.0, "R$"),
            "-2.0"
        );
        assert_eq!(format_metric_value(Metric::NewIntent, 28.0, "R$"), "28%");
        assert_eq!(
            format_metric_value(Metric::Cost, 11_500.0, "R$"),
            "R$ 11,500"
        );
    }

    #[test]
    fn test_format_cards_plain() {
        let summaries = vec![summary("A", -0.08, 0.0), summary("B", 0.32, 11_500.0)];
        let result = format_cards(&summaries, "R$", false);
        assert!(result.contains("Option A"));
        assert!(result.contains("Option B"));
        assert!(result.contains("Preference score"));
        assert!(result.contains("-0.08"));
        assert!(result.contains("0.32"));
        assert!(result.contains("R$ 11,500"));
    }

    #[test]
    fn test_format_cards_empty() {
        assert_eq!(format_cards(&[], "R$", false), "No options configured.");
    }

    #[test]
    fn test_format_table_header_and_rows() {
        let summaries = vec![summary("A", -0.08, 0.0), summary("B", 0.32, 11_500.0)];
        let result = format_table(&summaries, "R$", false);
        let lines: Vec<&str> = result.lines().collect();
        // Header plus one row per metric.
        assert_eq!(lines.len(), 1 + Metric::ALL.len());
        assert!(lines[0].contains("Metric"));
        assert!(lines[1].contains("Preference score"));
        assert!(result.contains("Net result +/unit"));
    }

    #[test]
    fn test_format_bars_scales_to_largest() {
        let summaries = vec![summary("A", -0.08, 0.0), summary("B", 0.32, 0.0)];
        let result = format_bars(&summaries, Metric::PreferenceScore, "R$");
        assert!(result.starts_with("Preference score"));
        let bar_a = result.lines().nth(1).unwrap().matches('\u{2588}').count();
        let bar_b = result.lines().nth(2).unwrap().matches('\u{2588}').count();
        assert!(bar_b > bar_a);
        // Negative values still draw a bar.
        assert!(bar_a >= 1);
    }

    #[test]
    fn test_format_shares_percentages() {
        let names = vec!["A".to_string(), "B".to_string()];
        let result = format_shares(&names, &[0.25, 0.75], false);
        assert!(result.contains("25.0%"));
        assert!(result.contains("75.0%"));
    }

    #[test]
    fn test_format_shares_highlights_only_winners() {
        let names = vec!["A".to_string(), "B".to_string()];
        // Distinct shares: exactly the winning line is colored.
        let result = format_shares(&names, &[0.25, 0.75], true);
        let lines: Vec<&str> = result.lines().collect();
        assert!(!lines[0].contains('\u{1b}'));
        assert!(lines[1].contains('\u{1b}'));
        // An even split is a tie, so nothing gets the winner color.
        let result = format_shares(&names, &[0.5, 0.5], true);
        assert!(!result.contains('\u{1b}'));
    }

    #[test]
    fn test_format_cohort_totals() {
        let summaries = vec![summary("A", -0.08, 0.0)];
        let params = SimParams::default();
        let result = format_cohort(&summaries, &params, "R$");
        assert!(result.contains("100 units"));
        // -0.02 * 400000 * 100 = -800,000
        assert!(result.contains("R$ -800,000"));
    }

    #[test]
    fn test_format_tsv_columns() {
        let summaries = vec![summary("A", -0.08, 0.0), summary("B", 0.32, 11_500.0)];
        let result = format_tsv(&summaries);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), 7);
        assert!(lines[0].starts_with("A\t-0.08\t-2.0\t28\t0\t-8000\t-8000"));
    }

    #[test]
    fn test_format_json_is_valid() {
        let summaries = vec![summary("A", -0.08, 0.0)];
        let json = format_json(&summaries).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "A");
    }
}
