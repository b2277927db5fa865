//! OpenAI chat-completions backend.

use serde::{Deserialize, Serialize};

use super::{env_var, GeneratorError, TextGenerator};
use crate::config::NarratorConfig;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Backend for the OpenAI chat-completions API (and compatible gateways).
pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    /// Build from configuration, reading `OPENAI_API_KEY` (required) and
    /// `OPENAI_API_BASE` (optional) from the environment.
    pub fn from_env(config: &NarratorConfig) -> Result<Self, GeneratorError> {
        let api_key =
            env_var("OPENAI_API_KEY").ok_or(GeneratorError::MissingCredential("OPENAI_API_KEY"))?;
        let api_base = config
            .api_base
            .clone()
            .or_else(|| env_var("OPENAI_API_BASE"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_base,
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl TextGenerator for OpenAiGenerator {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GeneratorError::EmptyCompletion)
    }
}
