//! Google Gemini backend.

use serde::{Deserialize, Serialize};

use super::{env_var, GeneratorError, TextGenerator};
use crate::config::NarratorConfig;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Backend for the Gemini generateContent API.
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiGenerator {
    /// Build from configuration, reading `GEMINI_API_KEY` (required) from
    /// the environment.
    pub fn from_env(config: &NarratorConfig) -> Result<Self, GeneratorError> {
        let api_key =
            env_var("GEMINI_API_KEY").ok_or(GeneratorError::MissingCredential("GEMINI_API_KEY"))?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: [GeminiContent<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

impl TextGenerator for GeminiGenerator {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GeneratorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let request = GeminiRequest {
            system_instruction: GeminiContent {
                parts: [GeminiPart { text: system }],
            },
            contents: [GeminiContent {
                parts: [GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: GeminiResponse = response.json()?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeneratorError::EmptyCompletion);
        }
        Ok(text)
    }
}
