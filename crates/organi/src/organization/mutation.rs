//! Copy-on-write edits to an organization snapshot.
//!
//! Every function takes the current snapshot by reference and hands back a fresh one; unit
//! manager assignments are never touched here.

use tracing::{debug, info, warn};

use super::domain::{Employee, EmployeeId, Organization, Placement};
use super::hierarchy::HierarchyIndex;

/// Reasons a drag-and-drop move leaves the organization unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("employee {0} is not part of the organization")]
    UnknownEmployee(EmployeeId),
    #[error("employee {employee} is already placed in {placement}")]
    SamePlacement {
        employee: EmployeeId,
        placement: Placement,
    },
    #[error("employee {employee} manages {placement} and cannot be placed inside it")]
    ManagerOfTarget {
        employee: EmployeeId,
        placement: Placement,
    },
    #[error("target {0} does not exist in the organization")]
    UnknownTarget(Placement),
}

/// Errors raised by evaluator and employee edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("employee {0} is not part of the organization")]
    UnknownEmployee(EmployeeId),
    #[error("evaluator {0} is not part of the organization")]
    UnknownEvaluator(EmployeeId),
    #[error("employee {0} cannot evaluate themselves")]
    SelfEvaluation(EmployeeId),
    #[error(transparent)]
    Move(#[from] MoveRejection),
}

/// Move an employee to the `(department, section, course)` drop target.
///
/// Rejected moves are logged and return an unchanged copy of `organization`.
pub fn move_employee(
    employee: &Employee,
    target_department: &str,
    target_section: &str,
    target_course: Option<&str>,
    organization: &Organization,
) -> Organization {
    let target = Placement::from_parts(target_department, target_section, target_course);
    match try_move_employee(employee, &target, organization) {
        Ok(next) => next,
        Err(rejection) => {
            match &rejection {
                MoveRejection::SamePlacement { .. } | MoveRejection::ManagerOfTarget { .. } => {
                    debug!(employee = %employee.id, %rejection, "move ignored");
                }
                MoveRejection::UnknownEmployee(_) | MoveRejection::UnknownTarget(_) => {
                    warn!(employee = %employee.id, %rejection, "move ignored");
                }
            }
            organization.clone()
        }
    }
}

/// Move an employee, reporting why nothing changed when the move is rejected.
///
/// A successful move drops any evaluator override and refreshes the evaluator display name from
/// the new placement.
pub fn try_move_employee(
    employee: &Employee,
    target: &Placement,
    organization: &Organization,
) -> Result<Organization, MoveRejection> {
    let index = HierarchyIndex::new(organization);
    let current = index
        .employee(&employee.id)
        .ok_or_else(|| MoveRejection::UnknownEmployee(employee.id.clone()))?;

    if current.placement == *target {
        return Err(MoveRejection::SamePlacement {
            employee: current.id.clone(),
            placement: target.clone(),
        });
    }

    if !index.contains_unit(target) {
        return Err(MoveRejection::UnknownTarget(target.clone()));
    }

    if index.unit_manager(target) == Some(&current.id) {
        return Err(MoveRejection::ManagerOfTarget {
            employee: current.id.clone(),
            placement: target.clone(),
        });
    }

    let mut moved = current.clone();
    moved.placement = target.clone();
    moved.evaluator_id = None;
    moved.evaluator = index
        .evaluator_of(&moved)
        .map(|evaluator| evaluator.name.clone());

    info!(
        employee = %moved.id,
        from = %current.placement,
        to = %moved.placement,
        "employee moved"
    );

    Ok(replace_employee(organization, moved))
}

/// Pin an explicit evaluator on an employee.
pub fn set_evaluator_override(
    organization: &Organization,
    employee_id: &EmployeeId,
    evaluator_id: &EmployeeId,
) -> Result<Organization, MutationError> {
    if employee_id == evaluator_id {
        return Err(MutationError::SelfEvaluation(employee_id.clone()));
    }

    let index = HierarchyIndex::new(organization);
    let employee = index
        .employee(employee_id)
        .ok_or_else(|| MutationError::UnknownEmployee(employee_id.clone()))?;
    let evaluator = index
        .employee(evaluator_id)
        .ok_or_else(|| MutationError::UnknownEvaluator(evaluator_id.clone()))?;

    let mut updated = employee.clone();
    updated.evaluator_id = Some(evaluator.id.clone());
    updated.evaluator = Some(evaluator.name.clone());

    Ok(replace_employee(organization, updated))
}

/// Drop an evaluator override so positional inheritance applies again.
pub fn clear_evaluator_override(
    organization: &Organization,
    employee_id: &EmployeeId,
) -> Result<Organization, MutationError> {
    let index = HierarchyIndex::new(organization);
    let employee = index
        .employee(employee_id)
        .ok_or_else(|| MutationError::UnknownEmployee(employee_id.clone()))?;

    let mut updated = employee.clone();
    updated.evaluator_id = None;
    updated.evaluator = index
        .evaluator_of(&updated)
        .map(|evaluator| evaluator.name.clone());

    Ok(replace_employee(organization, updated))
}

/// Mark an employee as eligible (or not) to be chosen as an evaluator.
pub fn set_evaluator_flag(
    organization: &Organization,
    employee_id: &EmployeeId,
    is_evaluator: bool,
) -> Result<Organization, MutationError> {
    let employee = organization
        .employee(employee_id)
        .ok_or_else(|| MutationError::UnknownEmployee(employee_id.clone()))?;

    let mut updated = employee.clone();
    updated.is_evaluator = Some(is_evaluator);

    Ok(replace_employee(organization, updated))
}

/// Replace an employee record wholesale, as the detail editor does.
///
/// A changed placement goes through the move rules first and, unless the edit also names a new
/// override, drops the old one. Evaluator display names are recomputed for the whole snapshot
/// so a rename reaches the evaluatees too.
pub fn update_employee(
    organization: &Organization,
    mut updated: Employee,
) -> Result<Organization, MutationError> {
    let index = HierarchyIndex::new(organization);
    let current = index
        .employee(&updated.id)
        .ok_or_else(|| MutationError::UnknownEmployee(updated.id.clone()))?;

    if let Some(evaluator_id) = &updated.evaluator_id {
        if *evaluator_id == updated.id {
            return Err(MutationError::SelfEvaluation(updated.id));
        }
        if index.employee(evaluator_id).is_none() {
            return Err(MutationError::UnknownEvaluator(evaluator_id.clone()));
        }
    }

    let base = if current.placement == updated.placement {
        organization.clone()
    } else {
        if updated.evaluator_id == current.evaluator_id {
            updated.evaluator_id = None;
        }
        try_move_employee(current, &updated.placement, organization)?
    };

    Ok(refresh_evaluator_names(&replace_employee(&base, updated)))
}

/// Recompute every employee's evaluator display name from the resolver.
pub fn refresh_evaluator_names(organization: &Organization) -> Organization {
    let index = HierarchyIndex::new(organization);
    let names: Vec<Option<String>> = organization
        .employees
        .iter()
        .map(|employee| {
            index
                .evaluator_of(employee)
                .map(|evaluator| evaluator.name.clone())
        })
        .collect();

    let mut next = organization.clone();
    for (employee, name) in next.employees.iter_mut().zip(names) {
        employee.evaluator = name;
    }
    next
}

fn replace_employee(organization: &Organization, updated: Employee) -> Organization {
    let mut next = organization.clone();
    if let Some(slot) = next
        .employees
        .iter_mut()
        .find(|employee| employee.id == updated.id)
    {
        *slot = updated;
    }
    next
}
