use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CreateExampleRequest, CreateWordRequest, Example, ListQuery, UpdateExampleRequest,
        UpdateWordRequest, Word,
    },
    store::DictionaryStore,
};

/// In-process store used when no database is configured.
/// Contents live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: RwLock<HashMap<Uuid, Word>>,
    examples: RwLock<HashMap<Uuid, Example>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        warn!("Using in-memory dictionary store; data will not survive a restart");
        Self::default()
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

impl DictionaryStore for MemoryStore {
    async fn list_words(&self, query: &ListQuery) -> ApiResult<Vec<Word>> {
        let words = self.words.read().await;

        let mut list: Vec<Word> = words
            .values()
            .filter(|word| query.keyword().map_or(true, |keyword| word.matches_keyword(keyword)))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(list)
    }

    async fn get_word(&self, id: &str) -> ApiResult<Word> {
        let words = self.words.read().await;

        parse_id(id)
            .and_then(|uuid| words.get(&uuid).cloned())
            .ok_or_else(|| ApiError::not_found(format!("Word with id {}", id)))
    }

    async fn create_word(&self, request: CreateWordRequest) -> ApiResult<Word> {
        let word = Word::new(request);
        self.words.write().await.insert(word.id, word.clone());

        info!("Created word with id: {}", word.id);
        Ok(word)
    }

    async fn update_word(&self, id: &str, request: UpdateWordRequest) -> ApiResult<Word> {
        let mut words = self.words.write().await;

        let word = match parse_id(id) {
            Some(uuid) => words.get_mut(&uuid),
            None => None,
        }
        .ok_or_else(|| ApiError::not_found(format!("Word with id {}", id)))?;
        word.apply(request);

        info!("Updated word with id: {}", word.id);
        Ok(word.clone())
    }

    async fn list_examples(&self, query: &ListQuery) -> ApiResult<Vec<Example>> {
        let examples = self.examples.read().await;

        let mut list: Vec<Example> = examples
            .values()
            .filter(|example| query.keyword().map_or(true, |keyword| example.matches_keyword(keyword)))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(list)
    }

    async fn get_example(&self, id: &str) -> ApiResult<Example> {
        let examples = self.examples.read().await;

        parse_id(id)
            .and_then(|uuid| examples.get(&uuid).cloned())
            .ok_or_else(|| ApiError::not_found(format!("Example with id {}", id)))
    }

    async fn create_example(&self, request: CreateExampleRequest) -> ApiResult<Example> {
        let example = Example::new(request);
        self.examples.write().await.insert(example.id, example.clone());

        info!("Created example with id: {}", example.id);
        Ok(example)
    }

    async fn update_example(&self, id: &str, request: UpdateExampleRequest) -> ApiResult<Example> {
        let mut examples = self.examples.write().await;

        let example = match parse_id(id) {
            Some(uuid) => examples.get_mut(&uuid),
            None => None,
        }
        .ok_or_else(|| ApiError::not_found(format!("Example with id {}", id)))?;
        example.apply(request);

        info!("Updated example with id: {}", example.id);
        Ok(example.clone())
    }
}
