//! Text-generation backends behind a single trait.
//!
//! Every model-facing call in the engine goes through [`TextGenerator`];
//! concrete backends are plain structs selected by [`Backend`] configuration
//! rather than an inheritance tree.

mod gemini;
mod ollama;
mod openai;

pub use gemini::*;
pub use ollama::*;
pub use openai::*;

use thiserror::Error;

use crate::config::{Backend, NarratorConfig};

/// Errors from a text-generation backend.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required API credential is absent. Raised at startup, before any
    /// game state exists; the only unrecoverable error in the engine.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("empty completion from model")]
    EmptyCompletion,
}

/// A synchronous prompt-in, prose-out text generator.
pub trait TextGenerator {
    /// Generate a completion for `prompt` under the given system message.
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError>;
}

/// Build the configured backend, reading credentials from the environment.
pub fn build_generator(config: &NarratorConfig) -> Result<Box<dyn TextGenerator>, GeneratorError> {
    match config.backend {
        Backend::OpenAi => Ok(Box::new(OpenAiGenerator::from_env(config)?)),
        Backend::Ollama => Ok(Box::new(OllamaGenerator::from_env(config))),
        Backend::Gemini => Ok(Box::new(GeminiGenerator::from_env(config)?)),
    }
}

/// Read a non-empty environment variable.
pub(crate) fn env_var(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
