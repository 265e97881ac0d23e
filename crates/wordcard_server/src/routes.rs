use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use wordcard_core::{WordDraft, WordId, WordPatch, WordRecord};

use super::{error::ApiError, state::SharedState};

pub async fn list_words_handler(
    State(state): State<SharedState>,
) -> Result<Json<Vec<WordRecord>>, ApiError> {
    Ok(Json(state.words()?.list_words()?))
}

pub async fn get_word_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<WordRecord>, ApiError> {
    let id = parse_id(&id)?;
    state
        .words()?
        .get_word(id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_word_handler(
    State(state): State<SharedState>,
    Json(draft): Json<WordDraft>,
) -> Result<(StatusCode, Json<WordRecord>), ApiError> {
    let created = state.words()?.create_word(&draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_word_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<WordPatch>,
) -> Result<Json<WordRecord>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.words()?.update_word(id, &patch)?))
}

pub async fn delete_word_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.words()?.delete_word(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// A path segment that is not an id cannot name an existing word.
fn parse_id(raw: &str) -> Result<WordId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}
