use super::{CompetencyItem, CompetencySection, EmployeeInfo, KpiItem};

/// Blank identity block for a new evaluation. Round defaults to the first
/// appraisal round of the year.
pub fn default_info() -> EmployeeInfo {
    EmployeeInfo {
        evaluation_round: "1".to_string(),
        period_start: String::new(),
        period_end: String::new(),
        prefix: String::new(),
        name: String::new(),
        position: String::new(),
        group: String::new(),
        department: String::new(),
        evaluator_name: String::new(),
        evaluator_position: String::new(),
    }
}

fn kpi(id: &str, category: &str, name: &str, weight: f64) -> KpiItem {
    KpiItem {
        id: id.to_string(),
        category: category.to_string(),
        name: name.to_string(),
        weight,
        score: 0,
    }
}

/// Built-in achievement rubric: 7 indicators, weights summing to 100.
pub fn default_kpi_items() -> Vec<KpiItem> {
    vec![
        kpi("k1", "Work Results", "Volume of completed work against plan", 15.0),
        kpi("k2", "Work Results", "Quality and accuracy of deliverables", 15.0),
        kpi("k3", "Work Results", "Timeliness of assigned tasks", 15.0),
        kpi("k4", "Work Results", "Economical use of resources", 15.0),
        kpi("k5", "Work Results", "Achievement of assigned objectives", 20.0),
        kpi("k6", "Work Behavior", "Initiative and problem solving", 10.0),
        kpi("k7", "Work Behavior", "Cooperation with colleagues and units", 10.0),
    ]
}

fn statement(id: &str, text: &str) -> CompetencyItem {
    CompetencyItem {
        id: id.to_string(),
        text: text.to_string(),
        score: 0,
    }
}

fn section(
    id: &str,
    name: &str,
    definition: &str,
    weight: f64,
    items: Vec<CompetencyItem>,
) -> CompetencySection {
    CompetencySection {
        id: id.to_string(),
        name: name.to_string(),
        definition: definition.to_string(),
        weight,
        items,
    }
}

/// Built-in competency rubric: 7 sections, weights summing to 100,
/// three rating statements each.
pub fn default_competency_sections() -> Vec<CompetencySection> {
    vec![
        section(
            "c1",
            "Achievement orientation",
            "Strives to perform work well and beyond the set standard.",
            20.0,
            vec![
                statement("c1.1", "Delivers work that meets or exceeds the agreed standard"),
                statement("c1.2", "Sets challenging goals and follows through on them"),
                statement("c1.3", "Improves working methods to raise results"),
            ],
        ),
        section(
            "c2",
            "Service mindedness",
            "Intends to serve internal and external service recipients well.",
            10.0,
            vec![
                statement("c2.1", "Responds to service requests willingly and promptly"),
                statement("c2.2", "Listens to recipients and acts on their needs"),
                statement("c2.3", "Keeps recipients informed of progress and outcomes"),
            ],
        ),
        section(
            "c3",
            "Professional expertise",
            "Maintains and applies the knowledge the position requires.",
            20.0,
            vec![
                statement("c3.1", "Keeps professional knowledge current"),
                statement("c3.2", "Applies expertise correctly to assigned work"),
                statement("c3.3", "Shares knowledge with the team"),
            ],
        ),
        section(
            "c4",
            "Integrity",
            "Performs duties honestly, transparently, and accountably.",
            20.0,
            vec![
                statement("c4.1", "Acts in line with rules and professional ethics"),
                statement("c4.2", "Takes responsibility for own decisions and mistakes"),
                statement("c4.3", "Handles information and assets transparently"),
            ],
        ),
        section(
            "c5",
            "Teamwork",
            "Works as a committed member of the unit toward shared goals.",
            10.0,
            vec![
                statement("c5.1", "Supports colleagues and shares the workload"),
                statement("c5.2", "Respects differing opinions within the team"),
                statement("c5.3", "Contributes to team decisions and follows them"),
            ],
        ),
        section(
            "c6",
            "Communication",
            "Conveys information clearly and appropriately to the audience.",
            10.0,
            vec![
                statement("c6.1", "Explains work matters clearly, spoken and written"),
                statement("c6.2", "Chooses the appropriate channel and tone"),
                statement("c6.3", "Checks that the message was understood"),
            ],
        ),
        section(
            "c7",
            "Self development",
            "Continuously develops own knowledge and capability.",
            10.0,
            vec![
                statement("c7.1", "Seeks out training and learning opportunities"),
                statement("c7.2", "Accepts feedback and acts on it"),
                statement("c7.3", "Applies new knowledge to current work"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_kpi_weights_sum_to_100() {
        let total: f64 = default_kpi_items().iter().map(|item| item.weight).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_section_weights_sum_to_100() {
        let total: f64 = default_competency_sections()
            .iter()
            .map(|section| section.weight)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_kpi_ids_unique() {
        let items = default_kpi_items();
        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_default_sections_have_items() {
        for section in default_competency_sections() {
            assert!(!section.items.is_empty(), "section {} has no items", section.id);
            for item in &section.items {
                assert!(item.id.starts_with(&section.id));
            }
        }
    }

    #[test]
    fn test_default_scores_start_at_zero() {
        assert!(default_kpi_items().iter().all(|item| item.score == 0));
        assert!(default_competency_sections()
            .iter()
            .flat_map(|section| &section.items)
            .all(|item| item.score == 0));
    }
}
