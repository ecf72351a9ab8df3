use serde::Serialize;
use thiserror::Error;

use super::params::SimParams;
use crate::catalog::{AttributeCatalog, OptionSelection};

/// A selection that cannot be scored against the catalog.
///
/// Any of these indicate a configuration bug, not user input to tolerate: a
/// UI built from the same catalog can never produce them, so they are
/// surfaced loudly instead of being defaulted away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("option '{option}' selects unknown attribute '{attribute}'")]
    UnknownAttribute { option: String, attribute: String },

    #[error("option '{option}' selects unknown level '{level}' for attribute '{attribute}'")]
    UnknownLevel {
        option: String,
        attribute: String,
        level: String,
    },

    #[error("option '{option}' is missing a level for attribute '{attribute}'")]
    MissingSelection { option: String, attribute: String },
}

/// Derived, read-only result for one option. Recomputed from scratch on
/// every evaluation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OptionSummary {
    pub name: String,
    /// Sum of the selected level weights, before any segment adjustment.
    pub raw_score: f64,
    /// Raw score scaled by the segment multiplier.
    pub adjusted_score: f64,
    /// Signed change in intent probability (a fraction, not a percentage).
    pub intent_uplift: f64,
    /// Base intent plus uplift, clamped to [0, 1].
    pub new_intent: f64,
    /// Sum of the selected level costs.
    pub cost: f64,
    /// Uplift converted to incremental revenue for one unit.
    pub revenue_per_unit: f64,
    /// Revenue per unit minus cost.
    pub net_per_unit: f64,
}

/// Sum the selected level weights and costs for one option.
///
/// Walks the catalog in attribute order so every catalog attribute must be
/// covered; extra entries in the selection are rejected afterwards.
pub fn score_and_cost(
    option: &OptionSelection,
    catalog: &AttributeCatalog,
) -> Result<(f64, f64), ScoreError> {
    let mut score = 0.0;
    let mut cost = 0.0;

    for attribute in &catalog.attributes {
        let label = option.level_for(&attribute.name).ok_or_else(|| {
            ScoreError::MissingSelection {
                option: option.name.clone(),
                attribute: attribute.name.clone(),
            }
        })?;
        let level = attribute
            .level(label)
            .ok_or_else(|| ScoreError::UnknownLevel {
                option: option.name.clone(),
                attribute: attribute.name.clone(),
                level: label.to_string(),
            })?;
        score += level.weight;
        cost += level.cost;
    }

    if let Some(extra) = option
        .selection
        .keys()
        .find(|name| catalog.attribute(name.as_str()).is_none())
    {
        return Err(ScoreError::UnknownAttribute {
            option: option.name.clone(),
            attribute: extra.clone(),
        });
    }

    Ok((score, cost))
}

/// Compute the full summary for one option under the given segment
/// multiplier and simulation constants.
///
/// The intent clamp saturates: once `base_intent + uplift` leaves [0, 1],
/// `new_intent` pins at the bound while the uplift and the revenue derived
/// from it keep moving unclamped.
pub fn summarize(
    option: &OptionSelection,
    catalog: &AttributeCatalog,
    segment_multiplier: f64,
    params: &SimParams,
) -> Result<OptionSummary, ScoreError> {
    let (raw_score, cost) = score_and_cost(option, catalog)?;
    let adjusted_score = raw_score * segment_multiplier;
    let intent_uplift = adjusted_score * params.intent_scale;
    let new_intent = (params.base_intent + intent_uplift).clamp(0.0, 1.0);
    let revenue_per_unit = intent_uplift * params.unit_price;
    let net_per_unit = revenue_per_unit - cost;

    Ok(OptionSummary {
        name: option.name.clone(),
        raw_score,
        adjusted_score,
        intent_uplift,
        new_intent,
        cost,
        revenue_per_unit,
        net_per_unit,
    })
}

/// Softmax over raw utility scores: probability that a chooser picks each
/// option. The maximum score is subtracted before exponentiating so large
/// utilities cannot overflow.
pub fn choice_probabilities(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
