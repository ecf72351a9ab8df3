pub mod engine;
pub mod metrics;
pub mod params;
pub mod validation;

pub use engine::{choice_probabilities, score_and_cost, summarize, OptionSummary, ScoreError};
pub use metrics::{classify, compare, rank, Metric, Outcome, Polarity, TIE_TOLERANCE};
pub use params::SimParams;
pub use validation::validate_config;
