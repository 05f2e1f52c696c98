use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::analytics::OrganizationAnalytics;
use super::domain::{Employee, EmployeeId, Organization, Placement};
use super::mutation::{self, MoveRejection, MutationError};
use super::relations::{self, EvaluationRelationView};
use super::repository::{OrganizationStore, StoreError};
use super::search::{self, EmployeeFilter, PageRequest, SearchResults, SortOrder};

/// Drop target supplied by the chart editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub employee_id: EmployeeId,
    pub department: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub course: Option<String>,
}

impl MoveRequest {
    pub fn target(&self) -> Placement {
        Placement::from_parts(&self.department, &self.section, self.course.as_deref())
    }
}

/// Result of a move request; ignored moves report why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub applied: bool,
    pub employee: Employee,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_reason: Option<String>,
}

/// Service loading snapshots from the injected store, applying pure edits, and saving the result.
///
/// Writers are serialised so a load-edit-save cycle never interleaves with another.
pub struct OrganizationService<S> {
    store: Arc<S>,
    write_lock: Mutex<()>,
}

impl<S> OrganizationService<S>
where
    S: OrganizationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn commit(&self, organization: &Organization) -> Result<(), OrganizationServiceError> {
        self.store.save(organization)?;
        info!(
            organization = %organization.id,
            employees = organization.employees.len(),
            "organization snapshot saved"
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Organization, OrganizationServiceError> {
        Ok(self.store.load()?)
    }

    /// Replace the whole document, as an import or full-page save does.
    ///
    /// Evaluator display names are recomputed before the snapshot is stored.
    pub fn replace(&self, organization: Organization) -> Result<(), OrganizationServiceError> {
        let _writer = self.writer();
        self.commit(&mutation::refresh_evaluator_names(&organization))
    }

    pub fn evaluation_relations(
        &self,
    ) -> Result<Vec<EvaluationRelationView>, OrganizationServiceError> {
        let organization = self.snapshot()?;
        Ok(relations::build_evaluation_map(&organization).views())
    }

    pub fn direct_reports(
        &self,
        evaluator_id: &EmployeeId,
    ) -> Result<Vec<Employee>, OrganizationServiceError> {
        let organization = self.snapshot()?;
        Ok(relations::get_direct_reports(evaluator_id, &organization)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn evaluator_candidates(&self) -> Result<Vec<Employee>, OrganizationServiceError> {
        let organization = self.snapshot()?;
        Ok(relations::evaluator_candidates(&organization)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn search(
        &self,
        filter: &EmployeeFilter,
        sort: Option<SortOrder>,
        page: PageRequest,
    ) -> Result<SearchResults, OrganizationServiceError> {
        let organization = self.snapshot()?;
        Ok(search::search_employees(&organization, filter, sort, page).into())
    }

    pub fn analytics(
        &self,
        today: NaiveDate,
    ) -> Result<OrganizationAnalytics, OrganizationServiceError> {
        let organization = self.snapshot()?;
        Ok(OrganizationAnalytics::compute(&organization, today))
    }

    /// Apply a drag-and-drop move. Ignored moves are not errors and leave the store untouched.
    pub fn move_employee(
        &self,
        request: &MoveRequest,
    ) -> Result<MoveOutcome, OrganizationServiceError> {
        let _writer = self.writer();
        let organization = self.snapshot()?;
        let employee = organization
            .employee(&request.employee_id)
            .cloned()
            .ok_or_else(|| OrganizationServiceError::UnknownEmployee(request.employee_id.clone()))?;

        match mutation::try_move_employee(&employee, &request.target(), &organization) {
            Ok(next) => {
                self.commit(&next)?;
                let moved = next
                    .employee(&employee.id)
                    .cloned()
                    .unwrap_or(employee);
                Ok(MoveOutcome {
                    applied: true,
                    employee: moved,
                    ignored_reason: None,
                })
            }
            Err(MoveRejection::UnknownEmployee(id)) => {
                Err(OrganizationServiceError::UnknownEmployee(id))
            }
            Err(rejection) => {
                debug!(employee = %employee.id, %rejection, "move ignored");
                Ok(MoveOutcome {
                    applied: false,
                    employee,
                    ignored_reason: Some(rejection.to_string()),
                })
            }
        }
    }

    /// Set or clear an evaluator override.
    pub fn set_evaluator(
        &self,
        employee_id: &EmployeeId,
        evaluator_id: Option<&EmployeeId>,
    ) -> Result<Employee, OrganizationServiceError> {
        self.edit(employee_id, |organization| match evaluator_id {
            Some(evaluator_id) => {
                mutation::set_evaluator_override(organization, employee_id, evaluator_id)
            }
            None => mutation::clear_evaluator_override(organization, employee_id),
        })
    }

    pub fn set_evaluator_flag(
        &self,
        employee_id: &EmployeeId,
        is_evaluator: bool,
    ) -> Result<Employee, OrganizationServiceError> {
        self.edit(employee_id, |organization| {
            mutation::set_evaluator_flag(organization, employee_id, is_evaluator)
        })
    }

    pub fn update_employee(&self, employee: Employee) -> Result<Employee, OrganizationServiceError> {
        let employee_id = employee.id.clone();
        self.edit(&employee_id, move |organization| {
            mutation::update_employee(organization, employee)
        })
    }

    fn edit<F>(
        &self,
        employee_id: &EmployeeId,
        apply: F,
    ) -> Result<Employee, OrganizationServiceError>
    where
        F: FnOnce(&Organization) -> Result<Organization, MutationError>,
    {
        let _writer = self.writer();
        let organization = self.snapshot()?;
        let next = apply(&organization)?;
        self.commit(&next)?;
        next.employee(employee_id)
            .cloned()
            .ok_or_else(|| OrganizationServiceError::UnknownEmployee(employee_id.clone()))
    }
}

/// Error raised by the organization service.
#[derive(Debug, thiserror::Error)]
pub enum OrganizationServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Mutation(#[from] MutationError),
    #[error("employee {0} is not part of the organization")]
    UnknownEmployee(EmployeeId),
}
