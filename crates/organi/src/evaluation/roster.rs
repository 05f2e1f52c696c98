use chrono::{DateTime, Utc};

use crate::organization::{get_direct_reports, EmployeeId, Organization};

use super::domain::{Evaluatee, Evaluation};

/// Evaluatees of `evaluator_id`, taken from the resolved evaluation map.
pub fn build_roster(evaluator_id: &EmployeeId, organization: &Organization) -> Vec<Evaluatee> {
    get_direct_reports(evaluator_id, organization)
        .into_iter()
        .map(Evaluatee::from_employee)
        .collect()
}

/// Blank evaluations for every evaluatee of `evaluator_id` in a period.
pub fn open_evaluations(
    evaluator_id: &EmployeeId,
    organization: &Organization,
    period: &str,
    now: DateTime<Utc>,
) -> Vec<Evaluation> {
    open_evaluations_with_result(evaluator_id, organization, period, None, now)
}

/// Like [`open_evaluations`], seeding every evaluation with a fixed result score.
pub fn open_evaluations_with_result(
    evaluator_id: &EmployeeId,
    organization: &Organization,
    period: &str,
    result_score: Option<u32>,
    now: DateTime<Utc>,
) -> Vec<Evaluation> {
    build_roster(evaluator_id, organization)
        .into_iter()
        .map(|evaluatee| {
            Evaluation::open(evaluator_id, evaluatee, period, now).with_result_score(result_score)
        })
        .collect()
}
