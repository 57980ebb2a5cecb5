use crate::evaluation::EvaluationData;
use std::collections::HashSet;

/// Validate an evaluation before scoring or submission.
/// Returns all validation errors at once (not just the first).
pub fn validate_evaluation(data: &EvaluationData) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut kpi_ids = HashSet::new();
    for (i, item) in data.part1.iter().enumerate() {
        if item.id.trim().is_empty() {
            errors.push(format!("part1[{}].id: must not be empty", i));
        } else if !kpi_ids.insert(item.id.as_str()) {
            errors.push(format!("part1[{}].id: duplicate id '{}'", i, item.id));
        }
        if item.score > 5 {
            errors.push(format!(
                "part1[{}].score: {} is outside the 0-5 scale",
                i, item.score
            ));
        }
        if item.weight <= 0.0 {
            errors.push(format!("part1[{}].weight: must be positive", i));
        }
    }

    let mut section_ids = HashSet::new();
    for (i, section) in data.part2.iter().enumerate() {
        if section.id.trim().is_empty() {
            errors.push(format!("part2[{}].id: must not be empty", i));
        } else if !section_ids.insert(section.id.as_str()) {
            errors.push(format!("part2[{}].id: duplicate id '{}'", i, section.id));
        }
        if section.weight <= 0.0 {
            errors.push(format!("part2[{}].weight: must be positive", i));
        }
        for (j, item) in section.items.iter().enumerate() {
            if item.score > 5 {
                errors.push(format!(
                    "part2[{}].items[{}].score: {} is outside the 0-5 scale",
                    i, j, item.score
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

/// Advisory check only: both catalogs are expected to carry weights summing
/// to 100. The engine never renormalizes, so an off-total catalog shifts the
/// final score instead of failing. Callers print these and move on.
pub fn weight_warnings(data: &EvaluationData) -> Vec<String> {
    let mut warnings = Vec::new();

    let part1_total: f64 = data.part1.iter().map(|item| item.weight).sum();
    if !data.part1.is_empty() && (part1_total - 100.0).abs() > 1e-9 {
        warnings.push(format!(
            "part1 weights sum to {} (expected 100); totals will be off scale",
            part1_total
        ));
    }

    let part2_total: f64 = data.part2.iter().map(|section| section.weight).sum();
    if !data.part2.is_empty() && (part2_total - 100.0).abs() > 1e-9 {
        warnings.push(format!(
            "part2 weights sum to {} (expected 100); totals will be off scale",
            part2_total
        ));
    }

    warnings
}
