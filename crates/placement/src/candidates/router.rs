use std::sync::MutexGuard;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Candidate, CandidateId};
use super::persistence::PersistenceAdapter;
use super::query::ShortlistCriteria;
use super::store::StoreError;
use crate::session::{PlacementSession, SharedSession};

/// Router builder exposing candidate and interview endpoints.
pub fn candidate_router<P>(session: SharedSession<P>) -> Router
where
    P: PersistenceAdapter + 'static,
{
    Router::new()
        .route("/api/v1/candidates", post(add_handler::<P>))
        .route("/api/v1/candidates/sorted", get(sorted_handler::<P>))
        .route("/api/v1/candidates/coding", get(coding_handler::<P>))
        .route("/api/v1/candidates/shortlist", post(shortlist_handler::<P>))
        .route("/api/v1/candidates/gpa/:gpa", get(gpa_handler::<P>))
        .route(
            "/api/v1/candidates/:candidate_id",
            get(get_handler::<P>).delete(delete_handler::<P>),
        )
        .route("/api/v1/report", get(report_handler::<P>))
        .route(
            "/api/v1/schedule",
            get(schedule_listing_handler::<P>).post(schedule_handler::<P>),
        )
        .with_state(session)
}

#[derive(Debug, Deserialize)]
pub struct CodingMarksFilter {
    pub min_marks: f64,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub time: String,
    pub candidate_id: CandidateId,
}

pub(crate) async fn add_handler<P>(
    State(session): State<SharedSession<P>>,
    Json(candidate): Json<Candidate>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let created = candidate.clone();
    match with_storage(session, move |session| session.store.add(candidate)).await {
        Ok(Ok(())) => (StatusCode::CREATED, Json(created)).into_response(),
        Ok(Err(error)) => store_error_response(error),
        Err(response) => response,
    }
}

pub(crate) async fn get_handler<P>(
    State(session): State<SharedSession<P>>,
    Path(candidate_id): Path<u64>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    let id = CandidateId(candidate_id);
    match session.store.get(id) {
        Some(candidate) => (StatusCode::OK, Json(candidate.clone())).into_response(),
        None => store_error_response(StoreError::NotFound(id)),
    }
}

pub(crate) async fn delete_handler<P>(
    State(session): State<SharedSession<P>>,
    Path(candidate_id): Path<u64>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let id = CandidateId(candidate_id);
    match with_storage(session, move |session| session.store.delete(id)).await {
        Ok(Ok(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Err(error)) => store_error_response(error),
        Err(response) => response,
    }
}

pub(crate) async fn sorted_handler<P>(State(session): State<SharedSession<P>>) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => candidates_response(session.store.sort_by_gpa()),
        Err(response) => response,
    }
}

pub(crate) async fn gpa_handler<P>(
    State(session): State<SharedSession<P>>,
    Path(gpa): Path<f64>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => candidates_response(session.store.search_by_gpa(gpa)),
        Err(response) => response,
    }
}

pub(crate) async fn shortlist_handler<P>(
    State(session): State<SharedSession<P>>,
    Json(criteria): Json<ShortlistCriteria>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => candidates_response(session.store.shortlist(&criteria)),
        Err(response) => response,
    }
}

pub(crate) async fn coding_handler<P>(
    State(session): State<SharedSession<P>>,
    Query(filter): Query<CodingMarksFilter>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => {
            candidates_response(session.store.filter_by_coding_marks(filter.min_marks))
        }
        Err(response) => response,
    }
}

pub(crate) async fn report_handler<P>(State(session): State<SharedSession<P>>) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => (StatusCode::OK, Json(session.store.report())).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn schedule_handler<P>(
    State(session): State<SharedSession<P>>,
    Json(request): Json<ScheduleRequest>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    let mut session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };

    match session.schedule_interview(&request.time, request.candidate_id) {
        Ok(candidate) => {
            let payload = json!({
                "time": request.time,
                "candidate_id": candidate.id,
                "candidate": candidate.name,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => store_error_response(error),
    }
}

pub(crate) async fn schedule_listing_handler<P>(
    State(session): State<SharedSession<P>>,
) -> Response
where
    P: PersistenceAdapter + 'static,
{
    match lock(&session) {
        Ok(session) => (StatusCode::OK, Json(session.scheduler.list_schedule())).into_response(),
        Err(response) => response,
    }
}

fn lock<P>(session: &SharedSession<P>) -> Result<MutexGuard<'_, PlacementSession<P>>, Response> {
    session
        .lock()
        .map_err(|_| internal_error("candidate session unavailable"))
}

/// Runs `command` under the session lock on the blocking pool. Commands here
/// write through the persistence adapter.
async fn with_storage<P, T, F>(session: SharedSession<P>, command: F) -> Result<T, Response>
where
    P: PersistenceAdapter + 'static,
    T: Send + 'static,
    F: FnOnce(&mut PlacementSession<P>) -> T + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || -> Result<T, Response> {
        let mut guard = lock(&session)?;
        Ok(command(&mut guard))
    })
    .await;

    match joined {
        Ok(outcome) => outcome,
        Err(_) => Err(internal_error("candidate storage task failed")),
    }
}

fn internal_error(message: &str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

fn candidates_response(candidates: Vec<&Candidate>) -> Response {
    let body: Vec<Candidate> = candidates.into_iter().cloned().collect();
    (StatusCode::OK, Json(body)).into_response()
}

fn store_error_response(error: StoreError) -> Response {
    let status = match error {
        StoreError::DuplicateId(_) => StatusCode::CONFLICT,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
