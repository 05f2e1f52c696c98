use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::evaluation::router::{evaluation_router, period_for};

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = evaluation_router(service())
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[test]
fn period_labels_quarters() {
    assert_eq!(period_for(now()), "2025Q1");
}

#[tokio::test]
async fn roster_route_opens_evaluations_for_period() {
    let request = Request::builder()
        .uri("/api/evaluation/evaluators/m2/roster?period=2024Q4")
        .body(Body::empty())
        .expect("request builds");

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["period"], "2024Q4");
    assert_eq!(rows[0]["status"], "PENDING");
    assert_eq!(rows[0]["evaluatee"]["weight2"], 40);
    assert!(rows[0]["finalScore"].is_null());
}

#[tokio::test]
async fn roster_route_seeds_result_score_so_updates_complete() {
    let request = Request::builder()
        .uri("/api/evaluation/evaluators/m2/roster?period=2025Q1&resultScore=80")
        .body(Body::empty())
        .expect("request builds");

    let (status, rows) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["score1"], 80);

    let mut opened = rows[0].clone();
    if let Some(fields) = opened.as_object_mut() {
        fields.remove("finalScore");
    }
    let (status, body) = send(post(
        "/api/evaluation/updates",
        json!({ "evaluation": opened, "update": { "score2": 70, "score3": 90 } }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["finalScore"], 79);
}

#[tokio::test]
async fn score_support_route_suggests_capped_score() {
    let (status, body) = send(post(
        "/api/evaluation/score-support",
        json!({ "category": "leadership", "tier": "T3" }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["baseScore"], 120);
    assert_eq!(body["score"], 100);
}

#[tokio::test]
async fn score_support_route_rejects_unknown_category() {
    let (status, body) = send(post(
        "/api/evaluation/score-support",
        json!({ "category": "charisma", "tier": "T1" }),
    ))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn categories_route_lists_table() {
    let request = Request::builder()
        .uri("/api/evaluation/categories")
        .body(Body::empty())
        .expect("request builds");

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["tiers"][0]["level"], "T4");
}

#[tokio::test]
async fn final_score_route_uses_evaluatee_weights() {
    let evaluation = json!({
        "id": "evaluation-e1",
        "evaluatorId": "m2",
        "evaluateeId": "e1",
        "status": "COMPLETED",
        "period": "2025Q1",
        "score1": 80,
        "score2": 70,
        "score3": 90,
        "createdAt": "2025-02-10T09:00:00Z",
        "updatedAt": "2025-02-10T09:00:00Z",
        "evaluatee": {
            "id": "e1",
            "name": "Aiko Sato",
            "email": "e1@example.com",
            "image": null,
            "position": "Associate",
            "grade": "S2",
            "weight1": 30,
            "weight2": 40,
            "weight3": 30
        }
    });

    let (status, body) = send(post("/api/evaluation/final-score", evaluation.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalScore"], 79);

    let (status, body) = send(post("/api/evaluation/stats", json!([evaluation]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], 1);
    assert_eq!(body["completionRate"], 100);
}
