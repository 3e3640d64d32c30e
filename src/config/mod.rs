//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CorsConfig, EmbeddingConfig, GenerationConfig, LogFormat, LoggingConfig,
    NormalizerConfig, PipelineConfig, RetrievalConfig, ServerConfig, VectorStoreBackend,
    VectorStoreConfig,
};
