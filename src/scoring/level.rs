use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete qualitative tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationLevel {
    Outstanding,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl EvaluationLevel {
    /// Map a total score to its tier. Inclusive lower bounds, checked
    /// highest first, so a boundary value lands in the higher tier.
    pub fn from_total(total: f64) -> Self {
        if total >= 95.0 {
            EvaluationLevel::Outstanding
        } else if total >= 85.0 {
            EvaluationLevel::VeryGood
        } else if total >= 75.0 {
            EvaluationLevel::Good
        } else if total >= 65.0 {
            EvaluationLevel::Fair
        } else {
            EvaluationLevel::NeedsImprovement
        }
    }

    /// Display string, as the remote store's level column expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationLevel::Outstanding => "Outstanding",
            EvaluationLevel::VeryGood => "Very Good",
            EvaluationLevel::Good => "Good",
            EvaluationLevel::Fair => "Fair",
            EvaluationLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
