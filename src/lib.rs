// Library root for the Igbo dictionary API

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

// Re-export commonly used types
pub use config::{Config, Environment};
pub use db::Database;
pub use error::{ApiError, ApiResult};
pub use memory::MemoryStore;
pub use models::{Example, ListQuery, Word};
pub use routes::{build_router, route_table, Binding, Endpoint};
pub use store::DictionaryStore;
