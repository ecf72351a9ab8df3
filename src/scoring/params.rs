use serde::{Deserialize, Serialize};

/// Simulation constants applied on top of the raw preference score.
///
/// An explicit value passed into the engine rather than module globals, so
/// different catalogs (housing, pharma) can carry different constants and be
/// tested independently.
///
/// Example YAML:
/// ```yaml
/// params:
///   base_intent: 0.30
///   intent_scale: 0.25
///   unit_price: 400000
///   cohort_size: 100
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SimParams {
    /// Purchase-intent fraction before any uplift (0..=1).
    pub base_intent: f64,

    /// How strongly the adjusted score moves intent. The uplift is a signed
    /// fraction, not a percentage.
    pub intent_scale: f64,

    /// Average sale price of one unit, in currency units.
    pub unit_price: f64,

    /// Units sold per cohort, used for the projected totals line.
    pub cohort_size: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            base_intent: 0.30,
            intent_scale: 0.25,
            unit_price: 400_000.0,
            cohort_size: 100,
        }
    }
}
