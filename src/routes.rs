//! Route table for the dictionary API.
//!
//! [`route_table`] is a pure function from the deployment mode to the list of
//! bindings. [`build_router`] turns that list into an axum [`Router`] over any
//! [`DictionaryStore`]. The table is decided once at startup and never changes
//! afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::{
    config::Environment,
    handlers::{self, examples, words},
    middleware::create_middleware_stack,
    store::DictionaryStore,
};

/// One dictionary operation exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListWords,
    GetWord,
    CreateWord,
    UpdateWord,
    ListExamples,
    GetExample,
    CreateExample,
    UpdateExample,
}

/// Registered in every mode, in this order.
const READ_ENDPOINTS: [Endpoint; 4] = [
    Endpoint::ListWords,
    Endpoint::GetWord,
    Endpoint::ListExamples,
    Endpoint::GetExample,
];

/// Registered only outside production, after the reads.
const WRITE_ENDPOINTS: [Endpoint; 4] = [
    Endpoint::CreateWord,
    Endpoint::UpdateWord,
    Endpoint::CreateExample,
    Endpoint::UpdateExample,
];

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::ListWords | Endpoint::GetWord | Endpoint::ListExamples | Endpoint::GetExample => {
                Method::GET
            }
            Endpoint::CreateWord | Endpoint::CreateExample => Method::POST,
            Endpoint::UpdateWord | Endpoint::UpdateExample => Method::PUT,
        }
    }

    /// Path template in axum syntax; item routes take a single `:id`.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ListWords | Endpoint::CreateWord => "/words",
            Endpoint::GetWord | Endpoint::UpdateWord => "/words/:id",
            Endpoint::ListExamples | Endpoint::CreateExample => "/examples",
            Endpoint::GetExample | Endpoint::UpdateExample => "/examples/:id",
        }
    }

    pub fn is_write(self) -> bool {
        self.method() != Method::GET
    }

    fn method_router<S: DictionaryStore>(self) -> MethodRouter<Arc<S>> {
        match self {
            Endpoint::ListWords => get(words::get_words::<S>),
            Endpoint::GetWord => get(words::get_word::<S>),
            Endpoint::CreateWord => post(words::post_word::<S>),
            Endpoint::UpdateWord => put(words::put_word::<S>),
            Endpoint::ListExamples => get(examples::get_examples::<S>),
            Endpoint::GetExample => get(examples::get_example::<S>),
            Endpoint::CreateExample => post(examples::post_example::<S>),
            Endpoint::UpdateExample => put(examples::put_example::<S>),
        }
    }
}

/// A (method, path template, endpoint) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub method: Method,
    pub path: &'static str,
    pub endpoint: Endpoint,
}

impl From<Endpoint> for Binding {
    fn from(endpoint: Endpoint) -> Self {
        Binding {
            method: endpoint.method(),
            path: endpoint.path(),
            endpoint,
        }
    }
}

/// Bindings for the given mode: the four reads always, the four writes only
/// when the mode allows them.
pub fn route_table(environment: Environment) -> Vec<Binding> {
    let writes: &[Endpoint] = if environment.allows_writes() {
        &WRITE_ENDPOINTS
    } else {
        &[]
    };

    READ_ENDPOINTS
        .iter()
        .chain(writes)
        .copied()
        .map(Binding::from)
        .collect()
}

/// Create the Axum router with all endpoints and middleware.
///
/// Bindings sharing a path are merged into one method router, mounted both
/// with and without a trailing slash. A path that exists under another
/// method answers 405, anything else 404.
pub fn build_router<S: DictionaryStore>(environment: Environment, store: Arc<S>) -> Router {
    let mut paths: BTreeMap<&'static str, MethodRouter<Arc<S>>> = BTreeMap::new();

    for binding in route_table(environment) {
        let handler = binding.endpoint.method_router::<S>();
        let method_router = match paths.remove(binding.path) {
            Some(existing) => existing.merge(handler),
            None => handler,
        };
        paths.insert(binding.path, method_router);
    }

    tracing::info!(
        "Registered {} dictionary paths for {} mode",
        paths.len(),
        environment.as_str()
    );

    paths
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            let method_router = method_router.fallback(handlers::method_not_allowed);
            // `/words/` and `/words/:id/` are served like their slash-less forms
            router
                .route(&format!("{}/", path), method_router.clone())
                .route(path, method_router)
        })
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        .fallback(handlers::route_not_found)
        .with_state(store)
        // Apply middleware stack
        .layer(create_middleware_stack(environment))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(table: &[Binding]) -> Vec<(Method, &'static str)> {
        table
            .iter()
            .map(|binding| (binding.method.clone(), binding.path))
            .collect()
    }

    #[test]
    fn test_development_table_has_all_bindings() {
        for value in [None, Some("development"), Some("test"), Some("prod"), Some("")] {
            let table = route_table(Environment::from_value(value));

            assert_eq!(table.len(), 8, "mode {:?}", value);
            assert_eq!(
                pairs(&table),
                vec![
                    (Method::GET, "/words"),
                    (Method::GET, "/words/:id"),
                    (Method::GET, "/examples"),
                    (Method::GET, "/examples/:id"),
                    (Method::POST, "/words"),
                    (Method::PUT, "/words/:id"),
                    (Method::POST, "/examples"),
                    (Method::PUT, "/examples/:id"),
                ]
            );
        }
    }

    #[test]
    fn test_production_table_is_read_only() {
        let table = route_table(Environment::from_value(Some("production")));

        assert_eq!(
            pairs(&table),
            vec![
                (Method::GET, "/words"),
                (Method::GET, "/words/:id"),
                (Method::GET, "/examples"),
                (Method::GET, "/examples/:id"),
            ]
        );
        assert!(table.iter().all(|binding| !binding.endpoint.is_write()));
    }

    #[test]
    fn test_bindings_are_unique() {
        let table = route_table(Environment::Development);

        for (i, a) in table.iter().enumerate() {
            for b in &table[i + 1..] {
                assert!(
                    !(a.method == b.method && a.path == b.path),
                    "duplicate binding {} {}",
                    a.method,
                    a.path
                );
                assert_ne!(a.endpoint, b.endpoint);
            }
        }
    }

    #[test]
    fn test_binding_from_endpoint() {
        let binding = Binding::from(Endpoint::UpdateExample);

        assert_eq!(binding.method, Method::PUT);
        assert_eq!(binding.path, "/examples/:id");
        assert!(binding.endpoint.is_write());
        assert!(!Endpoint::GetWord.is_write());
    }
}
