pub mod rubric;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity block for one evaluation instance.
/// Set once before scoring and carried through to submission unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeInfo {
    pub evaluation_round: String,
    pub period_start: String,
    pub period_end: String,
    pub prefix: String,
    pub name: String,
    pub position: String,
    pub group: String,
    pub department: String,
    pub evaluator_name: String,
    pub evaluator_position: String,
}

/// A single measurable achievement indicator with a weight and a 0-5 rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KpiItem {
    pub id: String,
    pub category: String,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub score: u8,
}

/// One behavioral rating statement inside a competency section.
/// A score of 0 is a valid "not applicable" rating, not absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompetencyItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub score: u8,
}

/// A grouped set of rating statements sharing one aggregate weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompetencySection {
    pub id: String,
    pub name: String,
    pub definition: String,
    pub weight: f64,
    pub items: Vec<CompetencyItem>,
}

impl CompetencySection {
    /// Raw section score: plain sum of item ratings, no weighting applied.
    pub fn raw_score(&self) -> u32 {
        self.items.iter().map(|item| u32::from(item.score)).sum()
    }

    /// Highest raw score the section can reach (5 per item).
    pub fn max_score(&self) -> u32 {
        self.items.len() as u32 * 5
    }
}

/// Everything one submission carries: identity plus both rubrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationData {
    pub info: EmployeeInfo,
    pub part1: Vec<KpiItem>,
    pub part2: Vec<CompetencySection>,
}

impl EvaluationData {
    /// Fresh evaluation pre-filled with the built-in rubric catalogs and
    /// blank identity fields. This is what `init` writes as a template.
    pub fn template() -> Self {
        Self {
            info: rubric::default_info(),
            part1: rubric::default_kpi_items(),
            part2: rubric::default_competency_sections(),
        }
    }
}

/// Load an evaluation from a YAML file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or does not
/// parse as an evaluation document.
pub fn load_evaluation(path: &Path) -> Result<EvaluationData> {
    if !path.exists() {
        anyhow::bail!(
            "Evaluation file not found at {}. Run `scoresheet init` to create a template.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read evaluation file at {}", path.display()))?;

    let data: EvaluationData = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse evaluation: invalid YAML in {}", path.display()))?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_raw_score_sums_items() {
        let section = CompetencySection {
            id: "c1".to_string(),
            name: "Teamwork".to_string(),
            definition: String::new(),
            weight: 10.0,
            items: vec![
                CompetencyItem {
                    id: "c1.1".to_string(),
                    text: "Shares information".to_string(),
                    score: 4,
                },
                CompetencyItem {
                    id: "c1.2".to_string(),
                    text: "Supports colleagues".to_string(),
                    score: 3,
                },
            ],
        };
        assert_eq!(section.raw_score(), 7);
        assert_eq!(section.max_score(), 10);
    }

    #[test]
    fn test_empty_section_scores_zero() {
        let section = CompetencySection {
            id: "c1".to_string(),
            name: "Empty".to_string(),
            definition: String::new(),
            weight: 10.0,
            items: vec![],
        };
        assert_eq!(section.raw_score(), 0);
        assert_eq!(section.max_score(), 0);
    }

    #[test]
    fn test_template_yaml_roundtrip() {
        let template = EvaluationData::template();
        let yaml = serde_saphyr::to_string(&template).unwrap();
        let parsed: EvaluationData = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(template, parsed);
    }

    #[test]
    fn test_scores_default_to_zero() {
        let yaml = r#"
info:
  evaluationRound: "1"
  periodStart: "2025-10-01"
  periodEnd: "2026-03-31"
  prefix: "Ms."
  name: "Jane Doe"
  position: "Officer"
  group: "Operations"
  department: "Head Office"
  evaluatorName: "John Smith"
  evaluatorPosition: "Director"
part1:
  - id: k1
    category: Work Results
    name: Output volume
    weight: 50
part2:
  - id: c1
    name: Teamwork
    definition: Works well with others
    weight: 100
    items:
      - id: c1.1
        text: Shares information
"#;
        let data: EvaluationData = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(data.part1[0].score, 0);
        assert_eq!(data.part2[0].items[0].score, 0);
    }
}
