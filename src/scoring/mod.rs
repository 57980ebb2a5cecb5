pub mod engine;
pub mod level;
pub mod validation;

pub use engine::{compute_summary, ScoreSummary};
pub use level::EvaluationLevel;
pub use validation::{validate_evaluation, weight_warnings};
