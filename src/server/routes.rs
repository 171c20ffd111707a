use crate::{
    core::{SessionInfo, TripPlanner, TripRequest},
    error::PlannerError,
    types::itinerary::Itinerary,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone, Debug)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    #[serde(default)]
    user_id: Option<String>,
}

struct ApiError(PlannerError);

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "request rejected");
        }

        (status, Json(self.0.to_error_payload())).into_response()
    }
}

fn status_for(err: &PlannerError) -> StatusCode {
    match err {
        _ if err.is_reply_error() => StatusCode::BAD_REQUEST,
        PlannerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        PlannerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        PlannerError::Upstream(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/sessions", post(create_session))
        .route(
            "/sessions/:user_id/:session_id",
            get(get_session).delete(delete_session),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn query(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| PlannerError::InvalidRequest(rejection.body_text()))?;
    info!(locations = ?request.locations, days = request.days, "query received");

    let outcome = state.planner.plan(&request).await?;
    let commentary = outcome.commentary.trim();

    Ok(Json(QueryResponse {
        commentary: (!commentary.is_empty()).then(|| commentary.to_string()),
        itinerary: outcome.itinerary,
        session_id: outcome.session_id,
    }))
}

async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionInfo>), ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let session = state
        .planner
        .create_session(request.user_id.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    State(state): State<AppState>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Result<Json<SessionInfo>, ApiError> {
    let session = state.planner.get_session(&user_id, &session_id).await?;
    Ok(Json(session))
}

async fn delete_session(
    State(state): State<AppState>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.planner.delete_session(&user_id, &session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
