pub mod models;
pub mod config;
pub mod prompt;
pub mod document_processor;
pub mod inference;
pub mod ollama_service;
pub mod answer_service;
pub mod client;
pub mod sample_pdf;

pub use models::*;
pub use config::{BackendConfig, ClientConfig, ConfigError, ServiceConfig};
pub use prompt::build_prompt;
pub use document_processor::{DocumentProcessor, ExtractionError};
pub use inference::{BackendError, InferenceBackend};
pub use ollama_service::OllamaService;
pub use answer_service::{AnswerError, AnswerService};
pub use client::{Answer, AskApi, ClientError, Context, HttpAskApi, SubmitOutcome, TutorSession};
