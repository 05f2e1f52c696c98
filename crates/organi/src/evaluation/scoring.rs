use serde::{Deserialize, Serialize};

use super::domain::Evaluation;

/// Relative weights of the result, process, and growth parts. They need not sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub result: u32,
    pub process: u32,
    pub growth: u32,
}

pub const DEFAULT_WEIGHTS: ScoreWeights = ScoreWeights {
    result: 30,
    process: 40,
    growth: 30,
};

impl ScoreWeights {
    pub fn total(&self) -> u64 {
        u64::from(self.result) + u64::from(self.process) + u64::from(self.growth)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Weighted mean of the three scores, rounded half up.
///
/// `None` while any score is missing, or when every weight is zero.
pub fn weighted_score(scores: [Option<u32>; 3], weights: ScoreWeights) -> Option<u32> {
    let [Some(result), Some(process), Some(growth)] = scores else {
        return None;
    };

    let total = weights.total();
    if total == 0 {
        return None;
    }

    let numerator = u64::from(result) * u64::from(weights.result)
        + u64::from(process) * u64::from(weights.process)
        + u64::from(growth) * u64::from(weights.growth);

    // round(n / t) for non-negative integers, halves rounding up
    u32::try_from((2 * numerator + total) / (2 * total)).ok()
}

/// Final score of an evaluation using its evaluatee's weights.
pub fn calculate_final_score(evaluation: &Evaluation) -> Option<u32> {
    weighted_score(evaluation.scores(), evaluation.evaluatee.weights())
}
