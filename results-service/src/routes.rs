use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::config::AppState;
use crate::records::{StudyResult, SusSubmission};

#[derive(Serialize, Deserialize)]
pub struct SessionStartRequest {
    #[serde(rename = "participantId")]
    participant_id: String,
    #[serde(rename = "counterbalanceArm", default)]
    counterbalance_arm: i64,
    #[serde(rename = "startedAt")]
    started_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionStartResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// POST /metrics (and the legacy /log alias).
///
/// The elapsed duration is always recomputed here; whatever the client sent
/// for `timeTaken_ms` is discarded.
pub async fn post_metrics(
    State(state): State<AppState>,
    Json(mut result): Json<StudyResult>,
) -> impl IntoResponse {
    result.time_taken_ms = (result.ended_at - result.started_at).num_milliseconds();

    info!(
        session = %result.session_id,
        task = %result.task_name,
        method = %result.selection_method,
        time_ms = result.time_taken_ms,
        accuracy = result.accuracy_score,
        "received study result"
    );

    // Durability failures are deliberately invisible to the client; the
    // operator log is the only place they surface.
    if let Err(e) = state.results.append(&result) {
        error!(error = ?e, "failed to persist study result");
    }

    (StatusCode::CREATED, Json(json!({})))
}

/// POST /sessions/start. Pure: derives the identifier and stores nothing.
pub async fn post_session_start(
    Json(req): Json<SessionStartRequest>,
) -> impl IntoResponse {
    let session_id =
        study_utils::session::session_id(&req.participant_id, req.started_at.timestamp());

    info!(
        session = %session_id,
        participant = %req.participant_id,
        arm = req.counterbalance_arm,
        "session started"
    );

    (StatusCode::OK, Json(SessionStartResponse { session_id }))
}

/// POST /sus. The derived total score is stored with the row, not returned.
pub async fn post_sus(
    State(state): State<AppState>,
    Json(submission): Json<SusSubmission>,
) -> impl IntoResponse {
    info!(
        session = %submission.session_id,
        score = study_utils::sus::sus_score(&submission.responses),
        "received SUS submission"
    );

    if let Err(e) = state.sus.append(&submission) {
        error!(error = ?e, "failed to persist SUS submission");
    }

    (StatusCode::CREATED, Json(json!({})))
}

/// GET /api/metrics. Loads the whole backing file on every call.
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.results.read_all())
}

/// GET /api/sus.
pub async fn get_sus(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.sus.read_all())
}

pub async fn get_status_ping() -> impl IntoResponse {
    StatusCode::OK
}
