//! API endpoint handlers

use super::extractors::{ClientIdentity, JsonExtractor, RawJson};
use super::types::*;
use crate::error::ServerError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use flashgen_core::{Deck, GenerateResponse};
use flashgen_repository::{export_decks, import_decks, RepositoryError};
use tracing::info;

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generation_enabled: state.generation.generator().is_configured(),
    })
}

/// Card generation endpoint
pub(super) async fn generate(
    State(state): State<AppState>,
    ClientIdentity(identity): ClientIdentity,
    RawJson(payload): RawJson,
) -> Result<Json<GenerateResponse>, ServerError> {
    let response = state.generation.generate(&payload, &identity).await?;
    Ok(Json(response))
}

/// List saved decks
pub(super) async fn list_decks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deck>>, ServerError> {
    Ok(Json(state.decks.load_all().await?))
}

/// Fetch one deck
pub(super) async fn get_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deck>, ServerError> {
    state
        .decks
        .load_all()
        .await?
        .into_iter()
        .find(|deck| deck.id == id)
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("deck {}", id)))
}

/// Create or replace a deck; returns every deck
pub(super) async fn save_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonExtractor(deck): JsonExtractor<Deck>,
) -> Result<Json<Vec<Deck>>, ServerError> {
    if deck.id != id {
        return Err(RepositoryError::IdMismatch {
            expected: id,
            actual: deck.id,
        }
        .into());
    }

    info!(deck_id = %deck.id, cards = deck.cards.len(), "saving deck");
    Ok(Json(state.decks.save(deck).await?))
}

/// Delete a deck; returns the remaining decks
pub(super) async fn delete_deck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Deck>>, ServerError> {
    info!(deck_id = %id, "deleting deck");
    Ok(Json(state.decks.delete(&id).await?))
}

/// Remove every deck
pub(super) async fn reset_decks(State(state): State<AppState>) -> Result<StatusCode, ServerError> {
    state.decks.reset().await?;
    info!("deck store reset");
    Ok(StatusCode::NO_CONTENT)
}

/// Download all decks as a JSON attachment
pub(super) async fn export_backup(State(state): State<AppState>) -> Result<Response, ServerError> {
    let decks = state.decks.load_all().await?;
    let body = export_decks(&decks)?;
    let filename = format!(
        "flashcards-backup-{}.json",
        chrono::Utc::now().timestamp_millis()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

/// Replace every deck with the contents of a backup
pub(super) async fn import_backup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<Deck>>, ServerError> {
    let content = std::str::from_utf8(&body)
        .map_err(|_| ServerError::InvalidRequest("Backup must be UTF-8 JSON".to_string()))?;

    let decks = import_decks(content).map_err(|err| match err {
        RepositoryError::Serialization(e) => {
            ServerError::InvalidRequest(format!("Invalid backup: {}", e))
        }
        other => other.into(),
    })?;

    state.decks.replace_all(decks.clone()).await?;
    info!(decks = decks.len(), "backup imported");
    Ok(Json(decks))
}
