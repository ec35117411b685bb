use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use lexicon_store::{normalize_word, Dictionary, Entries, Entry, StoreResult};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Body of `POST /add`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(alias = "mot")]
    pub word: String,
    pub definition: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddResponse {
    pub word: String,
    pub persisted: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResponse {
    pub word: String,
    /// `None` when the save failed and the prior presence is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    pub persisted: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
}

fn normalized(raw: &str) -> ServerResult<String> {
    normalize_word(raw).ok_or_else(|| ServerError::MalformedInput("word must not be empty".into()))
}

/// Split a mutation result into "applied and saved" / "applied, save failed".
/// Persistence failures are logged here and nowhere else.
fn save_outcome<T>(result: StoreResult<T>, word: &str) -> ServerResult<(Option<T>, bool)> {
    match result {
        Ok(value) => Ok((Some(value), true)),
        Err(e) if e.is_persistence() => {
            warn!(word, error = %e, "change applied in memory but not persisted");
            Ok((None, false))
        }
        Err(e) => Err(e.into()),
    }
}

/// Run a mutation on the blocking pool. Saves hold the store's write lock
/// across `sync_all`.
async fn mutate<T, F>(state: &AppState, op: F) -> ServerResult<StoreResult<T>>
where
    T: Send + 'static,
    F: FnOnce(&dyn Dictionary) -> StoreResult<T> + Send + 'static,
{
    let dictionary = Arc::clone(&state.dictionary);
    tokio::task::spawn_blocking(move || op(dictionary.as_ref()))
        .await
        .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))
}

/// `POST /add`
pub async fn add_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> ServerResult<Json<AddResponse>> {
    let Json(request) = payload.map_err(|e| ServerError::MalformedInput(e.body_text()))?;
    let word = normalized(&request.word)?;

    let (key, definition) = (word.clone(), request.definition);
    let result = mutate(&state, move |d| d.add(&key, &definition)).await?;
    let (_, persisted) = save_outcome(result, &word)?;
    info!(word = %word, persisted, "word added");

    Ok(Json(AddResponse {
        word,
        persisted,
        message: "Word added successfully!".into(),
    }))
}

/// `GET /define/:word`
pub async fn define_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> ServerResult<Json<Entry>> {
    let word = normalized(&word)?;
    let entry = state.dictionary.get(&word)?;
    info!(word = %word, "definition served");
    Ok(Json(entry))
}

/// `DELETE /remove/:word`
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> ServerResult<Json<RemoveResponse>> {
    let word = normalized(&word)?;

    let key = word.clone();
    let result = mutate(&state, move |d| d.remove(&key)).await?;
    let (removed, persisted) = save_outcome(result, &word)?;
    info!(word = %word, ?removed, persisted, "word removed");

    Ok(Json(RemoveResponse {
        word,
        removed,
        persisted,
        message: "Word removed successfully!".into(),
    }))
}

/// `GET /list`
pub async fn list_handler(State(state): State<AppState>) -> Json<Entries> {
    Json(state.dictionary.list())
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        entries: state.dictionary.len(),
    })
}

/// `POST /exit`
pub async fn exit_handler(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    info!("exit requested");
    state.request_shutdown();
    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "message": "Shutting down" })),
    )
}

