// Word handlers
// HTTP handlers for word operations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    error::ApiError,
    models::{CreateWordRequest, CreatedResponse, ListQuery, UpdateWordRequest},
    store::DictionaryStore,
};

/// Get words, optionally filtered
/// GET /words?keyword=&page=&range=
pub async fn get_words<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListQuery::from_pairs(pairs);
    info!("Fetching words with query: {:?}", query);

    let words = store.list_words(&query).await?;

    info!("Retrieved {} words", words.len());
    Ok((StatusCode::OK, Json(words)))
}

/// Get word by ID
/// GET /words/:id
pub async fn get_word<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Path(word_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching word with id: {}", word_id);

    let word = store.get_word(&word_id).await?;

    Ok((StatusCode::OK, Json(word)))
}

/// Create a new word
/// POST /words
pub async fn post_word<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Json(request): Json<CreateWordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating new word: {}", request.word);

    let word = store.create_word(request).await?;

    info!("Successfully created word with id: {}", word.id);
    Ok((StatusCode::OK, Json(CreatedResponse { id: word.id })))
}

/// Update word by ID
/// PUT /words/:id
pub async fn put_word<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Path(word_id): Path<String>,
    Json(request): Json<UpdateWordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Updating word with id: {}", word_id);

    let word = store.update_word(&word_id, request).await?;

    info!("Successfully updated word with id: {}", word_id);
    Ok((StatusCode::OK, Json(word)))
}
