//! Companion evaluation app: evaluator rosters, weighted scoring, and progress statistics.

pub mod domain;
pub mod roster;
pub mod router;
pub mod scoring;
pub mod stats;
pub mod support;

#[cfg(test)]
mod tests;

pub use domain::{
    Evaluatee, Evaluation, EvaluationStatus, EvaluationUpdate, Project, ProjectClass,
    ProjectData, DEFAULT_GRADE,
};
pub use roster::{build_roster, open_evaluations, open_evaluations_with_result};
pub use router::{evaluation_router, period_for, ScoredEvaluation};
pub use scoring::{calculate_final_score, weighted_score, ScoreWeights, DEFAULT_WEIGHTS};
pub use stats::EvaluationStats;
pub use support::{
    standard_categories, suggest_growth_score, AchievementTier, GrowthCategory,
    ScoreSuggestion, TierScores,
};
