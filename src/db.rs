use crate::error::ApiError;
use crate::config::DatabaseConfig;
use crate::models::{
    CreateExampleRequest, CreateWordRequest, Example, ListQuery, UpdateExampleRequest,
    UpdateWordRequest, Word,
};
use crate::store::DictionaryStore;
use deadpool_postgres::{Config, Pool, Runtime, Object};
use postgres_native_tls::MakeTlsConnector;
use native_tls::TlsConnector;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::{error, info, warn};

const WORD_COLUMNS: &str = "id, word, word_class, definitions, variations, created_at, updated_at";
const EXAMPLE_COLUMNS: &str = "id, igbo, english, associated_words, created_at, updated_at";

/// PostgreSQL connection pool backing the dictionary store
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Build the pool and check that a connection can be made before returning
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!("Creating PostgreSQL connection pool for host: {}:{}", config.host, config.port);

        let pool = Self::create_pool(config)?;

        let db = Database { pool };
        db.test_connection().await?;

        Ok(db)
    }

    /// `DATABASE_URL` is passed through untouched; otherwise the individual
    /// parameters are used.
    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        if let Some(url) = config.connection_string {
            pg_config.url = Some(url);
        } else {
            pg_config.host = Some(config.host);
            pg_config.port = Some(config.port);
            pg_config.dbname = Some(config.database);
            pg_config.user = Some(config.username);
            pg_config.password = Some(config.password);
        }

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => deadpool_postgres::SslMode::Disable,
            "prefer" => deadpool_postgres::SslMode::Prefer,
            "require" => deadpool_postgres::SslMode::Require,
            other => {
                warn!("Unknown SSL mode '{}', defaulting to 'require'", other);
                deadpool_postgres::SslMode::Require
            }
        });
        pg_config.connect_timeout = Some(config.connection_timeout);

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        let mut pool_config = deadpool_postgres::PoolConfig::new(config.max_connections as usize);
        pool_config.timeouts.wait = Some(config.connection_timeout);
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder()
            .build()
            .map_err(|e| {
                error!("Failed to create TLS connector: {}", e);
                ApiError::Database(format!("TLS connector creation failed: {}", e))
            })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config.create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Run `SELECT 1` against a pooled connection
    pub async fn health_check(&self) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[])
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                ApiError::Database(format!("Health check failed: {}", e))
            })?;

        Ok(())
    }

    async fn test_connection(&self) -> Result<(), ApiError> {
        self.health_check().await?;
        info!("Database connection test successful");
        Ok(())
    }

    /// Create the words and examples tables and their indexes.
    /// Every statement is `IF NOT EXISTS`, so this runs on each startup.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        info!("Running database migrations");

        let client = self.get_connection().await?;

        let statements = [
            (
                "words table",
                r#"
                CREATE TABLE IF NOT EXISTS words (
                    id UUID PRIMARY KEY,
                    word VARCHAR(255) NOT NULL,
                    word_class VARCHAR(100) NOT NULL,
                    definitions TEXT[] NOT NULL DEFAULT '{}',
                    variations TEXT[] NOT NULL DEFAULT '{}',
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
            ),
            (
                "words word index",
                "CREATE INDEX IF NOT EXISTS idx_words_word ON words(word)",
            ),
            (
                "words created_at index",
                "CREATE INDEX IF NOT EXISTS idx_words_created_at ON words(created_at DESC)",
            ),
            (
                "examples table",
                r#"
                CREATE TABLE IF NOT EXISTS examples (
                    id UUID PRIMARY KEY,
                    igbo TEXT NOT NULL,
                    english TEXT NOT NULL,
                    associated_words TEXT[] NOT NULL DEFAULT '{}',
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
            ),
            (
                "examples created_at index",
                "CREATE INDEX IF NOT EXISTS idx_examples_created_at ON examples(created_at DESC)",
            ),
        ];

        for (name, statement) in statements {
            client.execute(statement, &[])
                .await
                .map_err(|e| {
                    error!("Failed to create {}: {}", name, e);
                    ApiError::Database(format!("Migration of {} failed: {}", name, e))
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }
}

/// A path id that is not a UUID cannot name a row; callers turn `None` into NotFound.
fn parse_id(id: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(id).ok()
}

/// Substring pattern for ILIKE with `%`, `_` and `\` escaped
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn word_from_row(row: &Row) -> Word {
    Word {
        id: row.get(0),
        word: row.get(1),
        word_class: row.get(2),
        definitions: row.get(3),
        variations: row.get(4),
        created_at: row.get(5),
        updated_at: row.get(6),
    }
}

fn example_from_row(row: &Row) -> Example {
    Example {
        id: row.get(0),
        igbo: row.get(1),
        english: row.get(2),
        associated_words: row.get(3),
        created_at: row.get(4),
        updated_at: row.get(5),
    }
}

/// Collects `column = $n` assignments for a partial update.
/// Placeholder numbers follow the order values are pushed.
struct UpdateBuilder<'a> {
    assignments: Vec<String>,
    params: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> UpdateBuilder<'a> {
    fn new() -> Self {
        Self {
            assignments: Vec::new(),
            params: Vec::new(),
        }
    }

    fn set(&mut self, column: &str, value: &'a (dyn ToSql + Sync)) {
        self.params.push(value);
        self.assignments.push(format!("{} = ${}", column, self.params.len()));
    }

    /// Appends the id as the last parameter of the `WHERE` clause.
    fn finish(mut self, table: &str, columns: &str, id: &'a uuid::Uuid) -> (String, Vec<&'a (dyn ToSql + Sync)>) {
        self.params.push(id);
        let query = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
            table,
            self.assignments.join(", "),
            self.params.len(),
            columns
        );
        (query, self.params)
    }
}

impl DictionaryStore for Database {
    /// `keyword` matches the headword or any variation. `page` and `range` are ignored.
    async fn list_words(&self, query: &ListQuery) -> Result<Vec<Word>, ApiError> {
        let client = self.get_connection().await?;

        let rows = if let Some(keyword) = query.keyword() {
            let pattern = like_pattern(keyword);
            let sql = format!(
                "SELECT {} FROM words \
                 WHERE word ILIKE $1 OR EXISTS (SELECT 1 FROM unnest(variations) v WHERE v ILIKE $1) \
                 ORDER BY created_at DESC",
                WORD_COLUMNS
            );
            client.query(&sql, &[&pattern]).await?
        } else {
            let sql = format!("SELECT {} FROM words ORDER BY created_at DESC", WORD_COLUMNS);
            client.query(&sql, &[]).await?
        };

        Ok(rows.iter().map(word_from_row).collect())
    }

    async fn get_word(&self, id: &str) -> Result<Word, ApiError> {
        let not_found = || ApiError::NotFound(format!("Word with id {}", id));
        let uuid = parse_id(id).ok_or_else(not_found)?;

        let client = self.get_connection().await?;
        let sql = format!("SELECT {} FROM words WHERE id = $1", WORD_COLUMNS);

        let row = client.query_opt(&sql, &[&uuid]).await?;
        row.as_ref().map(word_from_row).ok_or_else(not_found)
    }

    async fn create_word(&self, request: CreateWordRequest) -> Result<Word, ApiError> {
        let word = Word::new(request);
        let client = self.get_connection().await?;

        let sql = format!(
            "INSERT INTO words ({}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            WORD_COLUMNS, WORD_COLUMNS
        );

        let row = client.query_one(
            &sql,
            &[
                &word.id,
                &word.word,
                &word.word_class,
                &word.definitions,
                &word.variations,
                &word.created_at,
                &word.updated_at,
            ],
        )
        .await?;

        let created = word_from_row(&row);
        info!("Created word with id: {}", created.id);
        Ok(created)
    }

    // Only fields present in the request are written; updated_at always is
    async fn update_word(&self, id: &str, request: UpdateWordRequest) -> Result<Word, ApiError> {
        let not_found = || ApiError::NotFound(format!("Word with id {}", id));
        let uuid = parse_id(id).ok_or_else(not_found)?;

        let client = self.get_connection().await?;
        let updated_at = chrono::Utc::now();

        let mut builder = UpdateBuilder::new();
        if let Some(ref word) = request.word {
            builder.set("word", word);
        }
        if let Some(ref word_class) = request.word_class {
            builder.set("word_class", word_class);
        }
        if let Some(ref definitions) = request.definitions {
            builder.set("definitions", definitions);
        }
        if let Some(ref variations) = request.variations {
            builder.set("variations", variations);
        }
        builder.set("updated_at", &updated_at);

        let (sql, params) = builder.finish("words", WORD_COLUMNS, &uuid);
        let row = client.query_opt(&sql, &params).await?;

        let updated = row.as_ref().map(word_from_row).ok_or_else(not_found)?;
        info!("Updated word with id: {}", updated.id);
        Ok(updated)
    }

    async fn list_examples(&self, query: &ListQuery) -> Result<Vec<Example>, ApiError> {
        let client = self.get_connection().await?;

        let rows = if let Some(keyword) = query.keyword() {
            let pattern = like_pattern(keyword);
            let sql = format!(
                "SELECT {} FROM examples WHERE igbo ILIKE $1 OR english ILIKE $1 ORDER BY created_at DESC",
                EXAMPLE_COLUMNS
            );
            client.query(&sql, &[&pattern]).await?
        } else {
            let sql = format!("SELECT {} FROM examples ORDER BY created_at DESC", EXAMPLE_COLUMNS);
            client.query(&sql, &[]).await?
        };

        Ok(rows.iter().map(example_from_row).collect())
    }

    async fn get_example(&self, id: &str) -> Result<Example, ApiError> {
        let not_found = || ApiError::NotFound(format!("Example with id {}", id));
        let uuid = parse_id(id).ok_or_else(not_found)?;

        let client = self.get_connection().await?;
        let sql = format!("SELECT {} FROM examples WHERE id = $1", EXAMPLE_COLUMNS);

        let row = client.query_opt(&sql, &[&uuid]).await?;
        row.as_ref().map(example_from_row).ok_or_else(not_found)
    }

    async fn create_example(&self, request: CreateExampleRequest) -> Result<Example, ApiError> {
        let example = Example::new(request);
        let client = self.get_connection().await?;

        let sql = format!(
            "INSERT INTO examples ({}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            EXAMPLE_COLUMNS, EXAMPLE_COLUMNS
        );

        let row = client.query_one(
            &sql,
            &[
                &example.id,
                &example.igbo,
                &example.english,
                &example.associated_words,
                &example.created_at,
                &example.updated_at,
            ],
        )
        .await?;

        let created = example_from_row(&row);
        info!("Created example with id: {}", created.id);
        Ok(created)
    }

    async fn update_example(&self, id: &str, request: UpdateExampleRequest) -> Result<Example, ApiError> {
        let not_found = || ApiError::NotFound(format!("Example with id {}", id));
        let uuid = parse_id(id).ok_or_else(not_found)?;

        let client = self.get_connection().await?;
        let updated_at = chrono::Utc::now();

        let mut builder = UpdateBuilder::new();
        if let Some(ref igbo) = request.igbo {
            builder.set("igbo", igbo);
        }
        if let Some(ref english) = request.english {
            builder.set("english", english);
        }
        if let Some(ref associated_words) = request.associated_words {
            builder.set("associated_words", associated_words);
        }
        builder.set("updated_at", &updated_at);

        let (sql, params) = builder.finish("examples", EXAMPLE_COLUMNS, &uuid);
        let row = client.query_opt(&sql, &params).await?;

        let updated = row.as_ref().map(example_from_row).ok_or_else(not_found)?;
        info!("Updated example with id: {}", updated.id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("bia"), "%bia%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("123").is_none());
        assert!(parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_some());
    }

    #[test]
    fn test_update_builder_numbers_placeholders() {
        let word = "bia".to_string();
        let updated_at = chrono::Utc::now();
        let id = uuid::Uuid::new_v4();

        let mut builder = UpdateBuilder::new();
        builder.set("word", &word);
        builder.set("updated_at", &updated_at);
        let (sql, params) = builder.finish("words", "id", &id);

        assert_eq!(sql, "UPDATE words SET word = $1, updated_at = $2 WHERE id = $3 RETURNING id");
        assert_eq!(params.len(), 3);
    }
}
