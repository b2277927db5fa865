//! Ollama local-model backend.

use serde::{Deserialize, Serialize};

use super::{env_var, GeneratorError, TextGenerator};
use crate::config::NarratorConfig;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:11434";
const DEFAULT_MODEL: &str = "deepseek-r1:7b";

/// Backend for a locally hosted model served by Ollama. No credential
/// needed; the host can be overridden with `OLLAMA_HOST`.
pub struct OllamaGenerator {
    client: reqwest::blocking::Client,
    api_base: String,
    model: String,
}

impl OllamaGenerator {
    pub fn from_env(config: &NarratorConfig) -> Self {
        let api_base = config
            .api_base
            .clone()
            .or_else(|| env_var("OLLAMA_HOST"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            client: reqwest::blocking::Client::new(),
            api_base,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: [OllamaMessage<'a>; 2],
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

impl TextGenerator for OllamaGenerator {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/api/chat", self.api_base.trim_end_matches('/'));
        let request = OllamaChatRequest {
            model: &self.model,
            messages: [
                OllamaMessage {
                    role: "system",
                    content: system,
                },
                OllamaMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: OllamaChatResponse = response.json()?;
        if parsed.message.content.trim().is_empty() {
            return Err(GeneratorError::EmptyCompletion);
        }
        Ok(parsed.message.content)
    }
}
