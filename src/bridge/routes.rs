use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::BridgeState;
use crate::platform::{Tab, TabId, TabMessage, WindowId};
use crate::router::{Request, handle_request};
use crate::settings::Settings;

#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct PasteRequest {
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct TabAnnouncement {
    #[serde(flatten)]
    pub tab: Tab,
    #[serde(default)]
    pub focused: bool,
}

pub async fn post_message(
    State(state): State<BridgeState>,
    Json(request): Json<Request>,
) -> Result<Response, ApiError> {
    let mut background = state.background.lock().await;
    let reply = handle_request(&mut background, &request).await?;

    Ok(match reply {
        Some(settings) => Json(settings).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn post_paste(
    State(state): State<BridgeState>,
    Json(request): Json<PasteRequest>,
) -> Result<StatusCode, ApiError> {
    let mut background = state.background.lock().await;
    background.paste(&request.data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn put_tab(
    State(state): State<BridgeState>,
    Json(announcement): Json<TabAnnouncement>,
) -> Result<StatusCode, ApiError> {
    state.tabs.upsert(announcement.tab, announcement.focused)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_tab(
    State(state): State<BridgeState>,
    Path(tab_id): Path<TabId>,
) -> Result<StatusCode, ApiError> {
    Ok(match state.tabs.remove(tab_id)? {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    })
}

pub async fn get_messages(
    State(state): State<BridgeState>,
    Path(tab_id): Path<TabId>,
) -> Result<Json<Vec<TabMessage>>, ApiError> {
    let messages = state.tabs.drain(tab_id)?;
    if !messages.is_empty() {
        debug!(tab_id, count = messages.len(), "Delivering queued messages");
    }
    Ok(Json(messages))
}

pub async fn put_option(
    State(state): State<BridgeState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Settings>, ApiError> {
    let mut background = state.background.lock().await;
    let settings = background.set_option(&key, &value).await?;
    info!(key = %key, "Option updated");
    Ok(Json(settings))
}

pub async fn get_history(State(state): State<BridgeState>) -> Json<Vec<String>> {
    let background = state.background.lock().await;
    Json(background.cache().entries().to_vec())
}

pub async fn post_window_removed(
    State(state): State<BridgeState>,
    Path(window_id): Path<WindowId>,
) -> Result<StatusCode, ApiError> {
    let closed = state.tabs.remove_window(window_id)?;
    debug!(window_id, closed, "Window removed");

    let mut background = state.background.lock().await;
    background.on_window_removed()?;
    Ok(StatusCode::NO_CONTENT)
}
