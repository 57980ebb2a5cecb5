use super::level::EvaluationLevel;
use crate::evaluation::{CompetencySection, KpiItem};

/// Each item is rated on a 0-5 scale.
const MAX_ITEM_SCORE: f64 = 5.0;

/// Part 1 carries 80 of the 100 total points, part 2 the remaining 20.
const PART1_SCALE: f64 = 0.8;
const PART2_SCALE: f64 = 0.2;

/// Derived score snapshot. Never stored or edited independently; recompute
/// from the source collections whenever they change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    /// Sum of weighted KPI contributions (0-100 when weights sum to 100).
    pub part1_raw: f64,
    /// Part 1 scaled to its 80-point share.
    pub part1_weighted: f64,
    /// Sum of weighted section contributions (0-100 when weights sum to 100).
    pub part2_raw: f64,
    /// Part 2 scaled to its 20-point share.
    pub part2_weighted: f64,
    pub total_score: f64,
    pub level: EvaluationLevel,
}

/// Compute the full score summary from the current rubric collections.
///
/// Pure and deterministic: no I/O, no side effects, safe to call on every
/// mutation. Empty collections and zero scores produce zeros, never errors.
/// Weight totals are taken as-is; nothing renormalizes a catalog whose
/// weights do not sum to 100.
pub fn compute_summary(items: &[KpiItem], sections: &[CompetencySection]) -> ScoreSummary {
    let part1_raw: f64 = items
        .iter()
        .map(|item| (f64::from(item.score) / MAX_ITEM_SCORE) * item.weight)
        .sum();
    let part1_weighted = part1_raw * PART1_SCALE;

    let part2_raw: f64 = sections.iter().map(section_weighted).sum();
    let part2_weighted = part2_raw * PART2_SCALE;

    let total_score = part1_weighted + part2_weighted;

    ScoreSummary {
        part1_raw,
        part1_weighted,
        part2_raw,
        part2_weighted,
        total_score,
        level: EvaluationLevel::from_total(total_score),
    }
}

/// Weighted contribution of one section on the 0-100 scale.
/// A section with no items contributes 0 rather than dividing by zero.
fn section_weighted(section: &CompetencySection) -> f64 {
    let max = f64::from(section.max_score());
    if max == 0.0 {
        return 0.0;
    }
    (f64::from(section.raw_score()) / max) * section.weight
}
