use std::collections::HashSet;

use crate::config::Config;

/// Validate the full configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let params = &config.params;
    if !(0.0..=1.0).contains(&params.base_intent) || !params.base_intent.is_finite() {
        errors.push("params.base_intent: must be within [0, 1]".to_string());
    }
    if !params.intent_scale.is_finite() {
        errors.push("params.intent_scale: must be finite".to_string());
    }
    if !params.unit_price.is_finite() || params.unit_price < 0.0 {
        errors.push("params.unit_price: must be non-negative".to_string());
    }
    if params.cohort_size == 0 {
        errors.push("params.cohort_size: must be at least 1".to_string());
    }

    let catalog = config.catalog();
    if catalog.is_empty() {
        errors.push("attributes: at least one attribute is required".to_string());
    }

    let mut attr_names = HashSet::new();
    for (i, attribute) in catalog.attributes.iter().enumerate() {
        if !attr_names.insert(attribute.name.as_str()) {
            errors.push(format!(
                "attributes[{}]: duplicate attribute name '{}'",
                i, attribute.name
            ));
        }
        if attribute.levels.is_empty() {
            errors.push(format!(
                "attributes[{}] ('{}'): at least one level is required",
                i, attribute.name
            ));
        }
        let mut level_labels = HashSet::new();
        for (j, level) in attribute.levels.iter().enumerate() {
            if !level_labels.insert(level.label.as_str()) {
                errors.push(format!(
                    "attributes[{}].levels[{}]: duplicate level label '{}'",
                    i, j, level.label
                ));
            }
            if !level.weight.is_finite() {
                errors.push(format!(
                    "attributes[{}].levels[{}] ('{}'): weight must be finite",
                    i, j, level.label
                ));
            }
            if !level.cost.is_finite() || level.cost < 0.0 {
                errors.push(format!(
                    "attributes[{}].levels[{}] ('{}'): cost must be non-negative",
                    i, j, level.label
                ));
            }
        }
    }

    for (category, table) in [
        ("income", &config.segments.income),
        ("region", &config.segments.region),
    ] {
        for (tag, mult) in table {
            if !mult.is_finite() || *mult <= 0.0 {
                errors.push(format!(
                    "segments.{}['{}']: multiplier must be positive",
                    category, tag
                ));
            }
        }
    }

    for (category, selected, table) in [
        ("income", &config.filters.income, &config.segments.income),
        ("region", &config.filters.region, &config.segments.region),
    ] {
        for tag in selected {
            if !table.contains_key(tag) {
                errors.push(format!(
                    "filters.{}: unknown tag '{}' (not in segments.{})",
                    category, tag, category
                ));
            }
        }
    }

    if config.options.len() < 2 {
        errors.push("options: at least two options are required to compare".to_string());
    }
    let mut option_names = HashSet::new();
    for (i, option) in config.options.iter().enumerate() {
        if !option_names.insert(option.name.as_str()) {
            errors.push(format!(
                "options[{}]: duplicate option name '{}'",
                i, option.name
            ));
        }
        for attribute in &catalog.attributes {
            match option.level_for(&attribute.name) {
                None => errors.push(format!(
                    "options[{}] ('{}'): missing selection for attribute '{}'",
                    i, option.name, attribute.name
                )),
                Some(label) if attribute.level(label).is_none() => errors.push(format!(
                    "options[{}] ('{}'): unknown level '{}' for attribute '{}'",
                    i, option.name, label, attribute.name
                )),
                Some(_) => {}
            }
        }
        for selected_attr in option.selection.keys() {
            if catalog.attribute(selected_attr).is_none() {
                errors.push(format!(
                    "options[{}] ('{}'): unknown attribute '{}'",
                    i, option.name, selected_attr
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
