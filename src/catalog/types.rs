use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single selectable level of an attribute.
///
/// `weight` is the signed utility coefficient the level contributes to the
/// preference score. `cost` is the non-negative incremental cost (per unit)
/// of building the option with this level.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Level {
    pub label: String,
    pub weight: f64,
    #[serde(default)]
    pub cost: f64,
}

/// A product attribute with its closed list of levels.
///
/// Every option must select exactly one level per attribute. Keeping weight
/// and cost on the same `Level` struct guarantees the two tables can never
/// fall out of sync for a given label.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Attribute {
    pub name: String,
    pub levels: Vec<Level>,
}

impl Attribute {
    /// Look up a level by its label.
    pub fn level(&self, label: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.label == label)
    }
}

/// The full attribute catalog, in display order.
///
/// Immutable after load: the engine only ever reads from it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct AttributeCatalog {
    pub attributes: Vec<Attribute>,
}

impl AttributeCatalog {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One named option: a complete selection of one level label per attribute.
///
/// Ephemeral form state. The engine validates every entry against the
/// catalog; nothing here is trusted on its own.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionSelection {
    pub name: String,
    pub selection: BTreeMap<String, String>,
}

impl OptionSelection {
    pub fn level_for(&self, attribute: &str) -> Option<&str> {
        self.selection.get(attribute).map(String::as_str)
    }
}

/// Segment multiplier tables: income bracket and region tags, each mapping
/// to a positive scalar applied to the raw preference score.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SegmentConfig {
    #[serde(default)]
    pub income: BTreeMap<String, f64>,

    #[serde(default)]
    pub region: BTreeMap<String, f64>,
}
