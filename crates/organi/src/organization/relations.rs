use std::collections::HashMap;

use serde::Serialize;

use super::domain::{Employee, EmployeeId, Organization};
use super::hierarchy::{EvaluatorSource, HierarchyIndex};

/// Per-employee slot of the evaluation map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationEntry<'a> {
    pub evaluator: Option<&'a Employee>,
    pub source: Option<EvaluatorSource>,
    pub evaluatee_count: usize,
}

impl Default for EvaluationEntry<'_> {
    fn default() -> Self {
        Self {
            evaluator: None,
            source: None,
            evaluatee_count: 0,
        }
    }
}

/// Evaluator and evaluatee-count for every employee, derived from one snapshot.
#[derive(Debug)]
pub struct EvaluationMap<'a> {
    employees: &'a [Employee],
    entries: HashMap<&'a EmployeeId, EvaluationEntry<'a>>,
}

impl<'a> EvaluationMap<'a> {
    /// Resolve every employee once against a prebuilt index and tally evaluatees in one pass.
    pub fn from_index(organization: &'a Organization, index: &HierarchyIndex<'a>) -> Self {
        let mut entries: HashMap<&'a EmployeeId, EvaluationEntry<'a>> = organization
            .employees
            .iter()
            .map(|employee| (&employee.id, EvaluationEntry::default()))
            .collect();

        for employee in &organization.employees {
            let resolution = index.resolve(employee);
            let evaluator = resolution
                .as_ref()
                .and_then(|resolution| index.employee(&resolution.evaluator_id));

            if let Some(entry) = entries.get_mut(&employee.id) {
                entry.evaluator = evaluator;
                entry.source = resolution.map(|resolution| resolution.source);
            }

            if let Some(evaluator) = evaluator {
                if let Some(entry) = entries.get_mut(&evaluator.id) {
                    entry.evaluatee_count += 1;
                }
            }
        }

        Self {
            employees: &organization.employees,
            entries,
        }
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&EvaluationEntry<'a>> {
        self.entries.get(id)
    }

    pub fn evaluator_of(&self, id: &EmployeeId) -> Option<&'a Employee> {
        self.entries.get(id).and_then(|entry| entry.evaluator)
    }

    pub fn evaluatee_count(&self, id: &EmployeeId) -> usize {
        self.entries
            .get(id)
            .map(|entry| entry.evaluatee_count)
            .unwrap_or(0)
    }

    /// Employees whose resolved evaluator is `evaluator_id`, in organization order.
    pub fn evaluatees_of(&self, evaluator_id: &EmployeeId) -> Vec<&'a Employee> {
        self.employees
            .iter()
            .filter(|employee| {
                self.evaluator_of(&employee.id)
                    .is_some_and(|evaluator| &evaluator.id == evaluator_id)
            })
            .collect()
    }

    /// Employees left without an evaluator.
    pub fn unresolved(&self) -> Vec<&'a Employee> {
        self.employees
            .iter()
            .filter(|employee| self.evaluator_of(&employee.id).is_none())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Employee, EvaluationEntry<'a>)> + '_ {
        self.employees.iter().map(|employee| {
            let entry = self.entries.get(&employee.id).copied().unwrap_or_default();
            (employee, entry)
        })
    }

    /// Owned rows for reporting and HTTP responses.
    pub fn views(&self) -> Vec<EvaluationRelationView> {
        self.iter()
            .map(|(employee, entry)| EvaluationRelationView {
                employee_id: employee.id.clone(),
                employee_name: employee.name.clone(),
                placement: employee.placement.to_string(),
                evaluator_id: entry.evaluator.map(|evaluator| evaluator.id.clone()),
                evaluator_name: entry.evaluator.map(|evaluator| evaluator.name.clone()),
                source: entry.source,
                source_label: entry.source.map(EvaluatorSource::label),
                evaluatee_count: entry.evaluatee_count,
            })
            .collect()
    }
}

/// Flattened evaluator relationship for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRelationView {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub placement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluator_id: Option<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<EvaluatorSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_label: Option<&'static str>,
    pub evaluatee_count: usize,
}

pub fn build_evaluation_map(organization: &Organization) -> EvaluationMap<'_> {
    let index = HierarchyIndex::new(organization);
    EvaluationMap::from_index(organization, &index)
}

/// Employees evaluated by `evaluator_id`, filtered from the evaluation map.
pub fn get_direct_reports<'a>(
    evaluator_id: &EmployeeId,
    organization: &'a Organization,
) -> Vec<&'a Employee> {
    build_evaluation_map(organization).evaluatees_of(evaluator_id)
}

/// Employees eligible to be picked as an evaluator override.
///
/// An explicit `isEvaluator` flag decides; without one, managing any unit qualifies.
pub fn evaluator_candidates(organization: &Organization) -> Vec<&Employee> {
    let index = HierarchyIndex::new(organization);
    organization
        .employees
        .iter()
        .filter(|employee| {
            employee
                .is_evaluator
                .unwrap_or_else(|| index.manages_any(&employee.id))
        })
        .collect()
}
