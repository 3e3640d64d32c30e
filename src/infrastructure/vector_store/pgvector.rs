//! pgvector vector store implementation

use std::fmt::Debug;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::domain::embedding::EmbeddingVector;
use crate::domain::retrieval::{Passage, SearchParams, VectorStore};
use crate::domain::DomainError;

/// Plain or schema-qualified SQL identifier
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").unwrap()
});

/// Configuration for the pgvector store
#[derive(Debug, Clone, PartialEq)]
pub struct PgvectorConfig {
    /// Table holding the indexed chunks
    pub table_name: String,
    pub id_column: String,
    pub chunk_column: String,
    pub embedding_column: String,
}

impl PgvectorConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            id_column: "id".to_string(),
            chunk_column: "chunk".to_string(),
            embedding_column: "embedding".to_string(),
        }
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }

    pub fn with_chunk_column(mut self, column: impl Into<String>) -> Self {
        self.chunk_column = column.into();
        self
    }

    pub fn with_embedding_column(mut self, column: impl Into<String>) -> Self {
        self.embedding_column = column.into();
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("table_name", &self.table_name),
            ("id_column", &self.id_column),
            ("chunk_column", &self.chunk_column),
            ("embedding_column", &self.embedding_column),
        ] {
            if !IDENTIFIER.is_match(value) {
                return Err(DomainError::configuration(format!(
                    "vector_store.{} is not a valid SQL identifier: {:?}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Candidate pool by cosine distance, then ranked by similarity and limited.
    /// Binds: `$1` query vector literal, `$2` pool size, `$3` limit.
    fn search_sql(&self) -> String {
        format!(
            r#"
            SELECT id, chunk, similarity FROM (
                SELECT
                    {id}::text AS id,
                    {chunk} AS chunk,
                    1 - ({embedding} <=> $1::vector) AS similarity
                FROM {table}
                ORDER BY {embedding} <=> $1::vector
                LIMIT $2
            ) AS candidates
            ORDER BY similarity DESC
            LIMIT $3
            "#,
            id = self.id_column,
            chunk = self.chunk_column,
            embedding = self.embedding_column,
            table = self.table_name,
        )
    }
}

/// Read-only similarity search over a pgvector table
pub struct PgvectorStore {
    pool: PgPool,
    config: PgvectorConfig,
    search_sql: String,
}

impl Debug for PgvectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgvectorStore")
            .field("config", &self.config)
            .finish()
    }
}

impl PgvectorStore {
    pub fn new(pool: PgPool, config: PgvectorConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let search_sql = config.search_sql();

        Ok(Self {
            pool,
            config,
            search_sql,
        })
    }

    /// Open a connection pool and build the store
    pub async fn connect(
        uri: &str,
        max_connections: u32,
        config: PgvectorConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(uri)
            .await
            .map_err(|e| {
                DomainError::retrieval_failed(format!("Failed to connect to vector store: {}", e))
            })?;

        Self::new(pool, config)
    }
}

#[async_trait]
impl VectorStore for PgvectorStore {
    fn store_type(&self) -> &'static str {
        "pgvector"
    }

    async fn search(
        &self,
        vector: &EmbeddingVector,
        params: SearchParams,
    ) -> Result<Vec<Passage>, DomainError> {
        let rows = sqlx::query(&self.search_sql)
            .bind(vector.to_pgvector_literal())
            .bind(params.num_candidates as i64)
            .bind(params.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    table = %self.config.table_name,
                    error = %e,
                    "Vector search failed"
                );
                DomainError::retrieval_failed(format!("Search failed: {}", e))
            })?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("id").map_err(malformed_row)?;
                let chunk: String = row.try_get("chunk").map_err(malformed_row)?;
                let similarity: f64 = row.try_get("similarity").map_err(malformed_row)?;

                Ok(Passage::new(id, chunk, similarity as f32))
            })
            .collect()
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| true)
            .map_err(|e| DomainError::retrieval_failed(format!("Health check failed: {}", e)))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn malformed_row(error: sqlx::Error) -> DomainError {
    DomainError::malformed_upstream("pgvector", format!("Unexpected row shape: {}", error))
}
