use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::generation::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::domain::normalizer::NormalizerStrictness;
use crate::domain::retrieval::{DEFAULT_NUM_CANDIDATES, DEFAULT_TOP_K};
use crate::infrastructure::generation::PayloadFormat;

const REDACTED: &str = "[REDACTED]";

/// Well-known deployment variables mapped onto config keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("embedding.url", "EMBEDDINGS_API_URL"),
    ("embedding.api_key", "EMBEDDINGS_API_KEY"),
    ("generation.url", "MODEL_API_URL"),
    ("generation.api_key", "MODEL_API_KEY"),
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub vector_store: VectorStoreConfig,
    pub retrieval: RetrievalConfig,
    pub pipeline: PipelineConfig,
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Origins allowed to call the API from a browser. Empty disables CORS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub format: PayloadFormat,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorStoreBackend {
    #[default]
    Pgvector,
    InMemory,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub backend: VectorStoreBackend,
    /// Connection string for `pgvector`
    pub uri: Option<String>,
    pub max_connections: u32,
    pub table: String,
    pub id_column: String,
    pub chunk_column: String,
    pub embedding_column: String,
    /// JSON snapshot for `in_memory`
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub num_candidates: usize,
    pub min_similarity: Option<f32>,
    pub dimensions: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub stage_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub strictness: NormalizerStrictness,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl EmbeddingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            request_timeout_secs: 30,
            format: PayloadFormat::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("url", &self.url)
            .field("api_key", &redact(&self.api_key))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("format", &self.format)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            backend: VectorStoreBackend::default(),
            uri: None,
            max_connections: 5,
            table: "chunks".to_string(),
            id_column: "id".to_string(),
            chunk_column: "chunk".to_string(),
            embedding_column: "embedding".to_string(),
            snapshot_path: None,
        }
    }
}

impl fmt::Debug for VectorStoreConfig {
    // Connection strings usually embed credentials
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorStoreConfig")
            .field("backend", &self.backend)
            .field("uri", &self.uri.as_deref().map(redact))
            .field("max_connections", &self.max_connections)
            .field("table", &self.table)
            .field("id_column", &self.id_column)
            .field("chunk_column", &self.chunk_column)
            .field("embedding_column", &self.embedding_column)
            .field("snapshot_path", &self.snapshot_path)
            .finish()
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            num_candidates: DEFAULT_NUM_CANDIDATES,
            min_similarity: None,
            dimensions: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_timeout_secs: 30,
        }
    }
}

impl PipelineConfig {
    pub fn stage_timeout(&self) -> Duration {
        Duration::from_secs(self.stage_timeout_secs)
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { REDACTED }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(|name| std::env::var(name).ok())
    }

    /// Layered load: `config/default`, `config/local`, `APP__*` variables,
    /// then the well-known deployment variables resolved through `env`.
    pub fn load_with_env<F>(env: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, name) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, env(name))?;
        }

        builder = builder.set_override_option(
            "vector_store.uri",
            env("VECTOR_STORE_URI").or_else(|| env("DATABASE_URL")),
        )?;
        builder = builder.set_override_option(
            "cors.allowed_origins",
            env("ALLOWED_ORIGINS").map(|raw| split_origins(&raw)),
        )?;

        builder.build()?.try_deserialize()
    }
}
