pub mod formatter;

pub use formatter::{
    format_bars, format_cards, format_cohort, format_currency, format_json, format_metric_value,
    format_shares, format_table, format_tsv, should_use_colors,
};
