use crate::evaluation::EvaluationData;
use crate::scoring::ScoreSummary;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Flat key/value payload for one append to the remote store.
///
/// Built once when submission starts; later edits to the evaluation do not
/// leak into an in-flight request. Field order matches the store's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    fields: Vec<(&'static str, String)>,
}

impl Payload {
    pub fn build(
        data: &EvaluationData,
        score: &ScoreSummary,
        timestamp: DateTime<Utc>,
    ) -> Payload {
        let info = &data.info;
        let fields = vec![
            ("evaluationRound", info.evaluation_round.clone()),
            ("periodStart", info.period_start.clone()),
            ("periodEnd", info.period_end.clone()),
            ("prefix", info.prefix.clone()),
            ("name", info.name.clone()),
            ("position", info.position.clone()),
            ("group", info.group.clone()),
            ("department", info.department.clone()),
            ("evaluatorName", info.evaluator_name.clone()),
            ("evaluatorPosition", info.evaluator_position.clone()),
            ("part1Score", format!("{:.2}", score.part1_weighted)),
            ("part2Score", format!("{:.2}", score.part2_weighted)),
            ("totalScore", format!("{:.2}", score.total_score)),
            ("level", score.level.as_str().to_string()),
            (
                "timestamp",
                timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            ("details", details_json(data)),
        ];
        Payload { fields }
    }

    /// Ordered key/value pairs, ready for query-string or form encoding.
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Serialize)]
struct DetailEntry {
    id: String,
    score: u32,
}

#[derive(Serialize)]
struct Details {
    part1: Vec<DetailEntry>,
    part2: Vec<DetailEntry>,
}

/// Compact audit trail the store keeps beyond the summary columns: every
/// KPI item's rating, and every section's raw sum (not further weighted).
fn details_json(data: &EvaluationData) -> String {
    let details = Details {
        part1: data
            .part1
            .iter()
            .map(|item| DetailEntry {
                id: item.id.clone(),
                score: u32::from(item.score),
            })
            .collect(),
        part2: data
            .part2
            .iter()
            .map(|section| DetailEntry {
                id: section.id.clone(),
                score: section.raw_score(),
            })
            .collect(),
    };
    serde_json::to_string(&details).expect("details serialization cannot fail")
}
