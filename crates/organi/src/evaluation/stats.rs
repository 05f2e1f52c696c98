use serde::{Deserialize, Serialize};

use super::domain::{Evaluation, EvaluationStatus};

/// Progress summary over an evaluator's evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Whole percent of completed evaluations; 0 when there are none.
    pub completion_rate: u32,
}

impl EvaluationStats {
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let mut stats = Self {
            total: evaluations.len(),
            ..Self::default()
        };

        for evaluation in evaluations {
            match evaluation.status {
                EvaluationStatus::Completed => stats.completed += 1,
                EvaluationStatus::InProgress => stats.in_progress += 1,
                EvaluationStatus::Pending => stats.pending += 1,
            }
        }

        if stats.total > 0 {
            let completed = stats.completed as u64;
            let total = stats.total as u64;
            stats.completion_rate = ((200 * completed + total) / (2 * total)) as u32;
        }

        stats
    }
}
