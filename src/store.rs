// Storage seam shared by the HTTP handlers

use std::future::Future;

use crate::{
    error::ApiResult,
    models::{
        CreateExampleRequest, CreateWordRequest, Example, ListQuery, UpdateExampleRequest,
        UpdateWordRequest, Word,
    },
};

/// Everything the word and example handlers need from a backing store.
///
/// Ids arrive as the raw path segment. An id that does not name a stored
/// record, including one that is not a UUID at all, is reported as
/// `ApiError::NotFound`.
pub trait DictionaryStore: Send + Sync + 'static {
    fn list_words(&self, query: &ListQuery) -> impl Future<Output = ApiResult<Vec<Word>>> + Send;

    fn get_word(&self, id: &str) -> impl Future<Output = ApiResult<Word>> + Send;

    fn create_word(&self, request: CreateWordRequest) -> impl Future<Output = ApiResult<Word>> + Send;

    fn update_word(
        &self,
        id: &str,
        request: UpdateWordRequest,
    ) -> impl Future<Output = ApiResult<Word>> + Send;

    fn list_examples(&self, query: &ListQuery) -> impl Future<Output = ApiResult<Vec<Example>>> + Send;

    fn get_example(&self, id: &str) -> impl Future<Output = ApiResult<Example>> + Send;

    fn create_example(
        &self,
        request: CreateExampleRequest,
    ) -> impl Future<Output = ApiResult<Example>> + Send;

    fn update_example(
        &self,
        id: &str,
        request: UpdateExampleRequest,
    ) -> impl Future<Output = ApiResult<Example>> + Send;
}
