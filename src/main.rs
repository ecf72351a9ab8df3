use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use conjoint_sim::catalog::segment_multiplier;
use conjoint_sim::config::Preset;
use conjoint_sim::output;
use conjoint_sim::scoring::{self, Metric, OptionSummary};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare the configured options: cards, table, and bar charts (default if no subcommand)
    Compare {
        /// Emit tab-separated values instead of the styled report
        #[arg(long)]
        tsv: bool,

        /// Emit the raw summaries as JSON
        #[arg(long, conflicts_with = "tsv")]
        json: bool,
    },
    /// Order the options by one metric
    Rank {
        /// Metric to rank by
        #[arg(long = "by", value_enum, default_value = "preference-score")]
        by: Metric,
    },
    /// Softmax choice shares across the options
    Shares,
    /// List the attribute catalog with weights and costs
    Catalog,
    /// Write a preset config file to disk
    Init {
        /// Which built-in catalog to write
        #[arg(long, value_enum, default_value = "housing")]
        preset: Preset,

        /// Where to write the config (defaults to ~/.config/conjoint-sim/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "conjoint-sim")]
#[command(about = "Conjoint-style preference simulator for competing product options", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/conjoint-sim/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Income bracket filter tag (repeatable); overrides the config default
    #[arg(long, global = true)]
    income: Vec<String>,

    /// Region filter tag (repeatable); overrides the config default
    #[arg(long, global = true)]
    region: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Check CLI-supplied filter tags against the segment tables, listing the
/// valid choices when one is unknown.
fn check_filter_tags(
    category: &str,
    tags: &[String],
    table: &std::collections::BTreeMap<String, f64>,
) -> Result<(), String> {
    for tag in tags {
        if !table.contains_key(tag) {
            let valid: Vec<&str> = table.keys().map(String::as_str).collect();
            return Err(format!(
                "Unknown {} tag '{}'. Valid tags: {}",
                category,
                tag,
                valid.join(", ")
            ));
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Compare {
        tsv: false,
        json: false,
    });
    let start_time = Instant::now();

    // Init never reads an existing config
    if let Commands::Init { preset, path } = &command {
        let path = path.clone().or_else(|| cli.config.clone());
        if let Err(e) = conjoint_sim::config::run_init(*preset, path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match conjoint_sim::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the whole config at startup, surfacing every problem at once
    if let Err(errors) = scoring::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // CLI filter tags override the config defaults when given
    let income_sel = if cli.income.is_empty() {
        config.filters.income.clone()
    } else {
        cli.income
    };
    let region_sel = if cli.region.is_empty() {
        config.filters.region.clone()
    } else {
        cli.region
    };
    for (category, tags, table) in [
        ("income", &income_sel, &config.segments.income),
        ("region", &region_sel, &config.segments.region),
    ] {
        if let Err(e) = check_filter_tags(category, tags, table) {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }

    let seg_mult = segment_multiplier(&income_sel, &region_sel, &config.segments);

    if cli.verbose {
        eprintln!(
            "Segment multiplier {:.2} (income: {:?}, region: {:?})",
            seg_mult, income_sel, region_sel
        );
        eprintln!(
            "Catalog: {} attributes, {} options",
            config.catalog().attributes.len(),
            config.options.len()
        );
    }

    // Recomputed from scratch on every run; the catalog is read-only
    let summaries: Result<Vec<OptionSummary>, _> = config
        .options
        .iter()
        .map(|option| scoring::summarize(option, config.catalog(), seg_mult, &config.params))
        .collect();
    let summaries = match summaries {
        Ok(s) => s,
        Err(e) => {
            // Unreachable after validation; a hit here is a configuration bug
            eprintln!("Scoring error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = output::should_use_colors();

    match command {
        Commands::Compare { tsv, json } => {
            if tsv {
                println!("{}", output::format_tsv(&summaries));
            } else if json {
                match output::format_json(&summaries) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Failed to serialize summaries: {}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                }
            } else {
                println!(
                    "{}",
                    output::format_cards(&summaries, &config.currency, use_colors)
                );
                println!();
                println!(
                    "{}",
                    output::format_table(&summaries, &config.currency, use_colors)
                );
                println!();
                println!(
                    "{}",
                    output::format_bars(&summaries, Metric::PreferenceScore, &config.currency)
                );
                println!();
                println!(
                    "{}",
                    output::format_bars(&summaries, Metric::NetPerUnit, &config.currency)
                );
                println!();
                println!(
                    "{}",
                    output::format_cohort(&summaries, &config.params, &config.currency)
                );
            }
        }
        Commands::Rank { by } => {
            for (idx, summary) in scoring::rank(&summaries, by).enumerate() {
                println!(
                    "{:>2}. {}  {}",
                    idx + 1,
                    summary.name,
                    output::format_metric_value(by, by.value(summary), &config.currency)
                );
            }
        }
        Commands::Shares => {
            let scores: Vec<f64> = summaries.iter().map(|s| s.adjusted_score).collect();
            let probabilities = scoring::choice_probabilities(&scores);
            let names: Vec<String> = summaries.iter().map(|s| s.name.clone()).collect();
            println!(
                "{}",
                output::format_shares(&names, &probabilities, use_colors)
            );
        }
        Commands::Catalog => {
            for attribute in &config.catalog().attributes {
                println!("{}", attribute.name);
                for level in &attribute.levels {
                    println!(
                        "  {} ({:+.2})  cost {}",
                        level.label,
                        level.weight,
                        output::format_currency(level.cost, &config.currency)
                    );
                }
            }
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    }

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Evaluated {} options in {:?}",
            summaries.len(),
            start_time.elapsed()
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
