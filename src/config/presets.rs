use std::collections::BTreeMap;

use super::schema::{Config, FilterDefaults};
use crate::catalog::{Attribute, AttributeCatalog, Level, OptionSelection, SegmentConfig};
use crate::scoring::SimParams;

fn level(label: &str, weight: f64, cost: f64) -> Level {
    Level {
        label: label.to_string(),
        weight,
        cost,
    }
}

fn attribute(name: &str, levels: Vec<Level>) -> Attribute {
    Attribute {
        name: name.to_string(),
        levels,
    }
}

fn option(name: &str, pairs: &[(&str, &str)]) -> OptionSelection {
    OptionSelection {
        name: name.to_string(),
        selection: pairs
            .iter()
            .map(|(a, l)| (a.to_string(), l.to_string()))
            .collect(),
    }
}

fn multipliers(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Config {
    /// Residential development catalog: six finish/amenity attributes with
    /// two levels each, segment multipliers by income bracket and region.
    pub fn housing() -> Self {
        Config {
            params: SimParams {
                base_intent: 0.30,
                intent_scale: 0.25,
                unit_price: 400_000.0,
                cohort_size: 100,
            },
            currency: "R$".to_string(),
            attributes: AttributeCatalog {
                attributes: vec![
                    attribute(
                        "Wall finish",
                        vec![
                            level("Only ceramic above counter", -0.05, 0.0),
                            level("Ceramic to 150cm", 0.08, 3_500.0),
                        ],
                    ),
                    attribute(
                        "Flooring",
                        vec![
                            level("No floor finish", -0.12, 0.0),
                            level("Laminate flooring", 0.15, 8_000.0),
                        ],
                    ),
                    attribute(
                        "Countertop",
                        vec![
                            level("Standard sink unit", -0.06, 0.0),
                            level("Granite", 0.14, 6_500.0),
                        ],
                    ),
                    attribute(
                        "Sports amenities",
                        vec![
                            level("Mini recreational court", 0.05, 15_000.0),
                            level("Swimming pool", 0.18, 50_000.0),
                        ],
                    ),
                    attribute(
                        "Social amenities",
                        vec![
                            level("Pizza space", 0.04, 4_000.0),
                            level("Barbecue area", 0.09, 12_000.0),
                        ],
                    ),
                    attribute(
                        "Facilities",
                        vec![
                            level("Laundry", 0.06, 5_000.0),
                            level("Pet care", 0.03, 2_500.0),
                        ],
                    ),
                ],
            },
            segments: SegmentConfig {
                income: multipliers(&[
                    ("4k-5k", 0.9),
                    ("5k-6k", 1.0),
                    ("6k-7k", 1.05),
                    ("7k-8k", 1.1),
                ]),
                region: multipliers(&[
                    ("BH metro", 1.0),
                    ("SP and interior", 1.1),
                    ("RJ", 1.05),
                    ("MG", 0.98),
                    ("ES", 0.97),
                    ("South", 1.02),
                    ("Northeast", 0.95),
                    ("Midwest/North", 0.93),
                ]),
            },
            filters: FilterDefaults {
                income: vec!["5k-6k".to_string()],
                region: vec!["SP and interior".to_string()],
            },
            options: vec![
                option(
                    "A",
                    &[
                        ("Wall finish", "Only ceramic above counter"),
                        ("Flooring", "No floor finish"),
                        ("Countertop", "Standard sink unit"),
                        ("Sports amenities", "Mini recreational court"),
                        ("Social amenities", "Pizza space"),
                        ("Facilities", "Laundry"),
                    ],
                ),
                option(
                    "B",
                    &[
                        ("Wall finish", "Ceramic to 150cm"),
                        ("Flooring", "Laminate flooring"),
                        ("Countertop", "Granite"),
                        ("Sports amenities", "Swimming pool"),
                        ("Social amenities", "Barbecue area"),
                        ("Facilities", "Pet care"),
                    ],
                ),
            ],
        }
    }

    /// Pharmaceutical pricing catalog: three competing pack configurations,
    /// meant to be viewed with the softmax `shares` command.
    pub fn pharma() -> Self {
        Config {
            params: SimParams {
                base_intent: 0.30,
                intent_scale: 0.25,
                unit_price: 85.0,
                cohort_size: 1_000,
            },
            currency: "R$".to_string(),
            attributes: AttributeCatalog {
                attributes: vec![
                    attribute(
                        "Brand",
                        vec![
                            level("Generic label", -0.10, 0.0),
                            level("Established brand", 0.12, 6.0),
                        ],
                    ),
                    attribute(
                        "Dosage",
                        vec![
                            level("Twice daily", -0.06, 0.0),
                            level("Once daily", 0.08, 3.0),
                        ],
                    ),
                    attribute(
                        "Price tier",
                        vec![
                            level("Premium price", -0.14, 0.0),
                            level("Competitive price", 0.10, 4.0),
                        ],
                    ),
                    attribute(
                        "Pack size",
                        vec![
                            level("10 tablets", -0.04, 0.0),
                            level("30 tablets", 0.07, 5.0),
                        ],
                    ),
                ],
            },
            segments: SegmentConfig {
                income: multipliers(&[("Low income", 0.92), ("Mid income", 1.0), ("High income", 1.08)]),
                region: multipliers(&[("Capital", 1.05), ("Interior", 0.97)]),
            },
            filters: FilterDefaults::default(),
            options: vec![
                option(
                    "A",
                    &[
                        ("Brand", "Generic label"),
                        ("Dosage", "Twice daily"),
                        ("Price tier", "Premium price"),
                        ("Pack size", "10 tablets"),
                    ],
                ),
                option(
                    "B",
                    &[
                        ("Brand", "Established brand"),
                        ("Dosage", "Once daily"),
                        ("Price tier", "Competitive price"),
                        ("Pack size", "30 tablets"),
                    ],
                ),
                option(
                    "C",
                    &[
                        ("Brand", "Established brand"),
                        ("Dosage", "Twice daily"),
                        ("Price tier", "Competitive price"),
                        ("Pack size", "10 tablets"),
                    ],
                ),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::housing()
    }
}
