use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::organization::access::ROLE_HEADER;
use crate::organization::router::{organization_router, snapshot_handler};
use crate::organization::service::OrganizationService;

fn json_request(method: &str, uri: &str, role: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(role) = role {
        builder = builder.header(ROLE_HEADER, role);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn direct_reports_route_lists_resolved_reports() {
    let (service, _) = service();

    let response = organization_router(service)
        .oneshot(get("/api/organization/evaluators/m2/reports"))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|employee| employee["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["m3", "e1", "e3"]);
}

#[tokio::test]
async fn evaluations_route_reports_every_employee() {
    let (service, _) = service();

    let response = organization_router(service)
        .oneshot(get("/api/organization/evaluations"))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["employeeId"], "m1");
    assert!(rows[0].get("evaluatorId").is_none());
    assert_eq!(rows[0]["evaluateeCount"], 3);
}

#[tokio::test]
async fn move_requires_write_role() {
    let (service, store) = service();
    let body = json!({ "employeeId": "e1", "department": "Tech", "section": "" });

    let response = organization_router(service)
        .oneshot(json_request("POST", "/api/organization/moves", None, body))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("VIEWER")));
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn editor_move_is_applied_and_saved() {
    let (service, store) = service();
    let body = json!({ "employeeId": "e1", "department": "Tech", "section": "" });

    let response = organization_router(service)
        .oneshot(json_request("POST", "/api/organization/moves", Some("editor"), body))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], true);
    assert_eq!(body["employee"]["department"], "Tech");
    assert_eq!(body["employee"]["evaluator"], "Tech Head");
    assert_eq!(store.saves(), 1);
    assert_eq!(
        store
            .current()
            .employee(&id("e1"))
            .map(|employee| employee.placement.to_string()),
        Some("Tech".to_string())
    );
}

#[tokio::test]
async fn ignored_move_reports_reason_without_saving() {
    let (service, store) = service();
    let body = json!({ "employeeId": "e1", "department": "Sales", "section": "SalesSec" });

    let response = organization_router(service)
        .oneshot(json_request("POST", "/api/organization/moves", Some("ADMIN"), body))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], false);
    assert!(body["ignoredReason"].is_string());
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn move_of_unknown_employee_is_not_found() {
    let (service, _) = service();
    let body = json!({ "employeeId": "ghost", "department": "Tech" });

    let response = organization_router(service)
        .oneshot(json_request("POST", "/api/organization/moves", Some("editor"), body))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn self_evaluator_assignment_is_unprocessable() {
    let (service, _) = service();

    let response = organization_router(service)
        .oneshot(json_request(
            "PUT",
            "/api/organization/employees/e1/evaluator",
            Some("editor"),
            json!({ "evaluatorId": "e1" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn evaluator_assignment_round_trip() {
    let (service, store) = service();
    let router = organization_router(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/organization/employees/e2/evaluator",
            Some("editor"),
            json!({ "evaluatorId": "m5" }),
        ))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["evaluatorId"], "m5");
    assert_eq!(body["evaluator"], "Tech Head");

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/organization/employees/e2/evaluator",
            Some("editor"),
            json!({}),
        ))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("evaluatorId").is_none());
    assert_eq!(body["evaluator"], "Course Lead");
    assert_eq!(store.saves(), 2);
}

#[tokio::test]
async fn search_route_paginates() {
    let (service, _) = service();

    let response = organization_router(service)
        .oneshot(json_request(
            "POST",
            "/api/organization/employees/search",
            None,
            json!({
                "filter": { "department": "Sales" },
                "sort": { "field": "name", "direction": "descending" },
                "page": { "page": 1, "perPage": 3 }
            }),
        ))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalMatches"], 8);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["employees"][0]["id"], "m4");
}

#[tokio::test]
async fn mismatched_employee_update_is_rejected() {
    let (service, store) = service();
    let record = serde_json::to_value(
        store
            .current()
            .employee(&id("e4"))
            .cloned()
            .expect("e4 present"),
    )
    .expect("employee serializes");

    let response = organization_router(service)
        .oneshot(json_request(
            "PUT",
            "/api/organization/employees/e5",
            Some("admin"),
            record,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.saves(), 0);
}

#[tokio::test]
async fn snapshot_handler_returns_internal_error_when_store_fails() {
    let service = Arc::new(OrganizationService::new(Arc::new(UnavailableStore)));

    let response = snapshot_handler::<UnavailableStore>(State(service)).await;
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analytics_route_counts_units() {
    let (service, _) = service();

    let response = organization_router(service)
        .oneshot(get("/api/organization/analytics"))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departmentCount"], 2);
    assert_eq!(body["courseCount"], 1);
}
