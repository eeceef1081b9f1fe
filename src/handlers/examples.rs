// Example handlers
// HTTP handlers for example sentence operations

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
    models::{CreateExampleRequest, CreatedResponse, ListQuery, UpdateExampleRequest},
    store::DictionaryStore,
};

/// Get examples, optionally filtered
/// GET /examples?keyword=&page=&range=
pub async fn get_examples<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListQuery::from_pairs(pairs);
    info!("Fetching examples with query: {:?}", query);

    let examples = store.list_examples(&query).await?;

    info!("Retrieved {} examples", examples.len());
    Ok((StatusCode::OK, Json(examples)))
}

/// Get example by ID
/// GET /examples/:id
pub async fn get_example<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Path(example_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching example with id: {}", example_id);

    let example = store.get_example(&example_id).await?;

    Ok((StatusCode::OK, Json(example)))
}

/// Create a new example
/// POST /examples
pub async fn post_example<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Json(request): Json<CreateExampleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Creating new example with {} associated words",
        request.associated_words.len()
    );

    let example = store.create_example(request).await?;

    info!("Successfully created example with id: {}", example.id);
    Ok((StatusCode::OK, Json(CreatedResponse { id: example.id })))
}

/// Update example by ID
/// PUT /examples/:id
pub async fn put_example<S: DictionaryStore>(
    State(store): State<Arc<S>>,
    Path(example_id): Path<String>,
    Json(request): Json<UpdateExampleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Updating example with id: {}", example_id);

    let example = store.update_example(&example_id, request).await?;

    info!("Successfully updated example with id: {}", example_id);
    Ok((StatusCode::OK, Json(example)))
}
