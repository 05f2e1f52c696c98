use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

use super::access::AccessGrant;
use super::domain::{Employee, EmployeeId, Organization};
use super::repository::OrganizationStore;
use super::search::{EmployeeFilter, PageRequest, SortOrder};
use super::service::{MoveRequest, OrganizationService, OrganizationServiceError};

type SharedService<S> = Arc<OrganizationService<S>>;

/// Search request body; every part is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub filter: EmployeeFilter,
    pub sort: Option<SortOrder>,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorAssignment {
    #[serde(default)]
    pub evaluator_id: Option<EmployeeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorFlag {
    pub is_evaluator: bool,
}

/// Router builder exposing the organization chart, evaluator views, and edits.
pub fn organization_router<S>(service: SharedService<S>) -> Router
where
    S: OrganizationStore + 'static,
{
    Router::new()
        .route(
            "/api/organization",
            get(snapshot_handler::<S>).put(replace_handler::<S>),
        )
        .route(
            "/api/organization/evaluations",
            get(evaluations_handler::<S>),
        )
        .route(
            "/api/organization/evaluators",
            get(candidates_handler::<S>),
        )
        .route(
            "/api/organization/evaluators/:evaluator_id/reports",
            get(direct_reports_handler::<S>),
        )
        .route(
            "/api/organization/employees/search",
            post(search_handler::<S>),
        )
        .route(
            "/api/organization/employees/:employee_id",
            put(update_employee_handler::<S>),
        )
        .route(
            "/api/organization/employees/:employee_id/evaluator",
            put(evaluator_handler::<S>),
        )
        .route(
            "/api/organization/employees/:employee_id/evaluator-flag",
            put(evaluator_flag_handler::<S>),
        )
        .route("/api/organization/moves", post(move_handler::<S>))
        .route("/api/organization/analytics", get(analytics_handler::<S>))
        .with_state(service)
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

fn forbidden(grant: &AccessGrant) -> Response {
    error_body(
        StatusCode::FORBIDDEN,
        format!("role {} may not modify the organization", grant.role.label()),
    )
}

pub(crate) fn service_error_response(error: OrganizationServiceError) -> Response {
    AppError::from(error).into_response()
}

fn respond<T: Serialize>(result: Result<T, OrganizationServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, axum::Json(body)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn snapshot_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.snapshot())
}

pub(crate) async fn replace_handler<S>(
    State(service): State<SharedService<S>>,
    headers: HeaderMap,
    axum::Json(organization): axum::Json<Organization>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let grant = AccessGrant::from_headers(&headers);
    if !grant.can_write() {
        return forbidden(&grant);
    }

    match service.replace(organization) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "success": true }))).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn evaluations_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.evaluation_relations())
}

pub(crate) async fn candidates_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.evaluator_candidates())
}

pub(crate) async fn direct_reports_handler<S>(
    State(service): State<SharedService<S>>,
    Path(evaluator_id): Path<String>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.direct_reports(&EmployeeId(evaluator_id)))
}

pub(crate) async fn search_handler<S>(
    State(service): State<SharedService<S>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.search(&request.filter, request.sort, request.page))
}

pub(crate) async fn update_employee_handler<S>(
    State(service): State<SharedService<S>>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
    axum::Json(employee): axum::Json<Employee>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let grant = AccessGrant::from_headers(&headers);
    if !grant.can_write() {
        return forbidden(&grant);
    }

    if employee.id.as_str() != employee_id {
        return error_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "employee id {} in body does not match path {}",
                employee.id, employee_id
            ),
        );
    }

    respond(service.update_employee(employee))
}

pub(crate) async fn evaluator_handler<S>(
    State(service): State<SharedService<S>>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
    axum::Json(assignment): axum::Json<EvaluatorAssignment>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let grant = AccessGrant::from_headers(&headers);
    if !grant.can_write() {
        return forbidden(&grant);
    }

    respond(service.set_evaluator(
        &EmployeeId(employee_id),
        assignment.evaluator_id.as_ref(),
    ))
}

pub(crate) async fn evaluator_flag_handler<S>(
    State(service): State<SharedService<S>>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
    axum::Json(flag): axum::Json<EvaluatorFlag>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let grant = AccessGrant::from_headers(&headers);
    if !grant.can_write() {
        return forbidden(&grant);
    }

    respond(service.set_evaluator_flag(&EmployeeId(employee_id), flag.is_evaluator))
}

pub(crate) async fn move_handler<S>(
    State(service): State<SharedService<S>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<MoveRequest>,
) -> Response
where
    S: OrganizationStore + 'static,
{
    let grant = AccessGrant::from_headers(&headers);
    if !grant.can_write() {
        return forbidden(&grant);
    }

    respond(service.move_employee(&request))
}

pub(crate) async fn analytics_handler<S>(State(service): State<SharedService<S>>) -> Response
where
    S: OrganizationStore + 'static,
{
    respond(service.analytics(Local::now().date_naive()))
}
