use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::candidates::router::{candidate_router, get_handler};
use crate::candidates::CandidateId;
use crate::session::PlacementSession;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn add_route_creates_candidates() {
    let session = shared_session(Vec::new());
    let router = candidate_router(session.clone());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates",
            serde_json::to_value(alice()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["name"], "Alice");
    assert!(session.lock().unwrap().store.get(CandidateId(1)).is_some());
}

#[tokio::test]
async fn add_route_returns_conflict_on_duplicate_id() {
    let router = candidate_router(shared_session(vec![alice()]));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates",
            serde_json::to_value(alice()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn add_route_returns_internal_error_when_storage_fails() {
    let persistence = SwitchablePersistence::default();
    let session = PlacementSession::open(persistence).expect("opens");
    session.store.persistence().go_offline();
    let router = candidate_router(session.shared());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates",
            serde_json::to_value(bob()).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("database offline"));
}

#[tokio::test]
async fn get_handler_reports_missing_candidates() {
    let session = shared_session(vec![alice()]);

    let found = get_handler(State(session.clone()), Path(1)).await;
    assert_eq!(found.status(), StatusCode::OK);

    let missing = get_handler(State(session), Path(42)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sorted_route_lists_by_gpa() {
    let router = candidate_router(shared_session(cohort()));

    let response = router
        .oneshot(get_request("/api/v1/candidates/sorted"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let names: Vec<&str> = payload
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Yuki", "Marco", "Omar", "Lena", "Tomas", "Priya"]);
}

#[tokio::test]
async fn gpa_route_returns_the_exact_bucket() {
    let router = candidate_router(shared_session(vec![alice(), bob()]));

    let response = router
        .oneshot(get_request("/api/v1/candidates/gpa/3.8"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(2));
    assert_eq!(payload[0]["name"], "Alice");
}

#[tokio::test]
async fn shortlist_route_accepts_criteria() {
    let router = candidate_router(shared_session(vec![alice(), bob()]));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates/shortlist",
            json!({
                "min_gpa": 3.5,
                "required_skills": ["Python"],
                "min_experience": 2,
                "min_coding_marks": 70.0,
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!([serde_json::to_value(alice()).unwrap()]));
}

#[tokio::test]
async fn coding_route_filters_by_query_threshold() {
    let router = candidate_router(shared_session(vec![alice(), bob()]));

    let response = router
        .oneshot(get_request("/api/v1/candidates/coding?min_marks=75"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
    assert_eq!(payload[0]["id"], 1);
}

#[tokio::test]
async fn delete_route_removes_and_then_reports_not_found() {
    let session = shared_session(vec![alice()]);
    let router = candidate_router(session.clone());

    let request = || {
        Request::delete("/api/v1/candidates/1")
            .body(Body::empty())
            .unwrap()
    };

    let first = router
        .clone()
        .oneshot(request())
        .await
        .expect("route executes");
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = router.oneshot(request()).await.expect("route executes");
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert!(session.lock().unwrap().store.is_empty());
}

#[tokio::test]
async fn report_route_serializes_counts() {
    let router = candidate_router(shared_session(cohort()));

    let response = router
        .oneshot(get_request("/api/v1/report"))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["total_candidates"], 6);
    assert_eq!(payload["shortlisted_candidates"], 2);
    assert_eq!(payload["candidates"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn schedule_routes_book_and_list_slots() {
    let router = candidate_router(shared_session(vec![alice(), bob()]));

    let booked = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/schedule",
            json!({ "time": "10:00", "candidate_id": 1 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(booked.status(), StatusCode::OK);

    let same_time = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/schedule",
            json!({ "time": "10:00", "candidate_id": 2 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(same_time.status(), StatusCode::OK);

    let unknown = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/schedule",
            json!({ "time": "11:00", "candidate_id": 77 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let listing = router
        .oneshot(get_request("/api/v1/schedule"))
        .await
        .expect("route executes");
    let payload = read_json_body(listing).await;
    assert_eq!(
        payload,
        json!([
            { "time": "10:00", "candidate": "Alice" },
            { "time": "10:00", "candidate": "Bob" },
        ])
    );
}

#[tokio::test]
async fn write_routes_report_a_poisoned_session() {
    let session = shared_session(vec![alice()]);
    let holder = session.clone();
    let _ = std::thread::spawn(move || {
        let _guard = holder.lock().unwrap();
        panic!("session lock poisoned while held");
    })
    .join();
    let router = candidate_router(session);

    let response = router
        .oneshot(
            Request::delete("/api/v1/candidates/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "candidate session unavailable");
}
