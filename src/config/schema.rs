use serde::{Deserialize, Serialize};

use crate::catalog::{AttributeCatalog, OptionSelection, SegmentConfig};
use crate::scoring::SimParams;

fn default_currency() -> String {
    "R$".to_string()
}

/// Default segment filter tags applied when the CLI passes none.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterDefaults {
    #[serde(default)]
    pub income: Vec<String>,

    #[serde(default)]
    pub region: Vec<String>,
}

/// Full simulator configuration: constants, catalog, segment tables, default
/// filters, and the competing options to evaluate.
///
/// Example YAML:
/// ```yaml
/// params:
///   base_intent: 0.30
///   intent_scale: 0.25
///   unit_price: 400000
/// currency: "R$"
/// attributes:
///   - name: Flooring
///     levels:
///       - { label: "No floor finish", weight: -0.12 }
///       - { label: "Laminate flooring", weight: 0.15, cost: 8000 }
/// segments:
///   income: { "5k-6k": 1.0 }
///   region: { "SP and interior": 1.1 }
/// options:
///   - name: A
///     selection:
///       Flooring: "No floor finish"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub params: SimParams,

    /// Prefix used when formatting currency metrics.
    #[serde(default = "default_currency")]
    pub currency: String,

    pub attributes: AttributeCatalog,

    #[serde(default)]
    pub segments: SegmentConfig,

    #[serde(default)]
    pub filters: FilterDefaults,

    pub options: Vec<OptionSelection>,
}

impl Config {
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parse() {
        let yaml = r#"
attributes:
  - name: Flooring
    levels:
      - { label: "No floor finish", weight: -0.12 }
      - { label: "Laminate flooring", weight: 0.15, cost: 8000 }
options:
  - name: A
    selection:
      Flooring: "No floor finish"
  - name: B
    selection:
      Flooring: "Laminate flooring"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.params, SimParams::default());
        assert_eq!(config.currency, "R$");
        assert_eq!(config.catalog().attributes.len(), 1);
        assert_eq!(config.options.len(), 2);
        assert!(config.filters.income.is_empty());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::housing();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
attributes: []
options: []
typo_field: 1
"#;
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
