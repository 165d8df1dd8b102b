//! HTTP Binding
//!
//! Maps the hunt operations onto the classic REST paths. Routing is strict
//! about trailing slashes; the slash-less collection paths redirect.
//! Status codes are decided here and nowhere else.

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use crate::game::claim::{ClaimError, ClaimRequest};
use crate::game::diamond::DiamondId;
use crate::network::admin::AdminError;
use crate::network::protocol::{diamond_list, ClaimReply};
use crate::network::service::HuntService;

/// Build the router for a service.
pub fn router(service: Arc<HuntService>) -> Router {
    Router::new()
        .route("/api/diamonds/", get(list_diamonds))
        .route("/api/diamonds/:id", delete(claim_diamond))
        .route("/api/diamonds", get(add_trailing_slash))
        .route("/api/scores/", get(list_scores))
        .route("/api/scores/reset", get(reset))
        .route("/api/scores/stop", get(stop_spawning))
        .route("/api/scores/start", get(start_spawning))
        .route("/api/scores", get(add_trailing_slash))
        .route("/healthz", get(healthz))
        .with_state(service)
}

/// Claim query parameters.
#[derive(Debug, Deserialize)]
struct ClaimParams {
    user: String,
    pwd: String,
    name: Option<String>,
}

impl IntoResponse for ClaimError {
    fn into_response(self) -> Response {
        match self {
            ClaimError::Gone(_) => (StatusCode::GONE, self.to_string()).into_response(),
            ClaimError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ClaimError::WrongCredential { .. } => {
                (StatusCode::UNAUTHORIZED, Json(ClaimReply::wrong_password())).into_response()
            }
            ClaimError::Banned { score, .. } => {
                (StatusCode::FORBIDDEN, Json(ClaimReply::banned(score))).into_response()
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, self.to_string()).into_response()
    }
}

fn referer(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::REFERER).and_then(|v| v.to_str().ok())
}

async fn list_diamonds(State(service): State<Arc<HuntService>>) -> Response {
    let pending = service.list_diamonds().await;
    match pending.await {
        Ok(snapshot) => Json(diamond_list(&snapshot)).into_response(),
        // Sender dropped without a flush: the state went away
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "server shutting down").into_response(),
    }
}

async fn claim_diamond(
    State(service): State<Arc<HuntService>>,
    Path(id): Path<String>,
    Query(params): Query<ClaimParams>,
) -> Response {
    let Ok(diamond_id) = id.parse::<DiamondId>() else {
        return (StatusCode::NOT_FOUND, format!("diamond not found: {}", id)).into_response();
    };

    let request = ClaimRequest {
        diamond_id,
        player_id: params.user,
        credential: params.pwd,
        display_name: params.name,
    };

    match service.claim(&request).await {
        Ok(outcome) => Json(ClaimReply::accepted(outcome.diamond_id, outcome.score)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_scores(State(service): State<Arc<HuntService>>) -> Response {
    Json(service.leaderboard().await).into_response()
}

async fn reset(State(service): State<Arc<HuntService>>, headers: HeaderMap) -> Result<&'static str, AdminError> {
    service.reset(referer(&headers)).await?;
    Ok("reset and creating diamonds")
}

async fn stop_spawning(State(service): State<Arc<HuntService>>, headers: HeaderMap) -> Result<&'static str, AdminError> {
    service.stop_spawning(referer(&headers)).await?;
    Ok("stopped creating diamonds")
}

async fn start_spawning(State(service): State<Arc<HuntService>>, headers: HeaderMap) -> Result<&'static str, AdminError> {
    service.start_spawning(referer(&headers)).await?;
    Ok("restarted creating diamonds")
}

/// 302 to the same path with a trailing slash, query kept.
async fn add_trailing_slash(uri: Uri) -> Response {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}
