//! Organization chart: hierarchy model, evaluator resolution, relationship views, and the
//! copy-on-write mutation engine, plus the service and HTTP surface built on them.

pub mod access;
pub mod analytics;
pub mod domain;
pub mod hierarchy;
pub mod mutation;
pub mod relations;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::{AccessGrant, AccessRole, Permission, ROLE_HEADER};
pub use analytics::OrganizationAnalytics;
pub use domain::{
    Course, Department, Employee, EmployeeId, Organization, Placement, QualificationGrade,
    Section, UnitLevel,
};
pub use hierarchy::{resolve_evaluator, EvaluatorSource, HierarchyIndex, Resolution};
pub use mutation::{
    clear_evaluator_override, move_employee, refresh_evaluator_names, set_evaluator_flag,
    set_evaluator_override, try_move_employee, update_employee, MoveRejection, MutationError,
};
pub use relations::{
    build_evaluation_map, evaluator_candidates, get_direct_reports, EvaluationEntry,
    EvaluationMap, EvaluationRelationView,
};
pub use repository::{OrganizationStore, StoreError};
pub use router::organization_router;
pub use search::{
    search_employees, EmployeeFilter, PageRequest, SearchPage, SearchResults, SortDirection,
    SortField, SortOrder,
};
pub use service::{MoveOutcome, MoveRequest, OrganizationService, OrganizationServiceError};
