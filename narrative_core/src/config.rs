//! Narrator configuration.

use serde::{Deserialize, Serialize};

/// Which text-generation backend the narrator talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    OpenAi,
    Ollama,
    Gemini,
}

/// Configuration for the narrator. API keys are never stored here; backends
/// read them from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    pub backend: Backend,

    /// Model name; each backend has its own default.
    pub model: Option<String>,

    /// API base URL override (OpenAI-compatible gateways, remote Ollama).
    pub api_base: Option<String>,

    pub temperature: f32,
    pub max_tokens: u32,

    /// Deep research mode: resubmit the model's own output for refinement.
    pub deep_research: bool,

    /// Total calls per narration when deep research is on.
    pub max_iterations: u32,

    /// Story appends before the log is compressed by a summarization call.
    pub max_updates_before_summary: u32,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::OpenAi,
            model: None,
            api_base: None,
            temperature: 0.7,
            max_tokens: 5000,
            deep_research: false,
            max_iterations: 3,
            max_updates_before_summary: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NarratorConfig::default();
        assert_eq!(config.backend, Backend::OpenAi);
        assert!(!config.deep_research);
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.max_updates_before_summary, 3);
    }
}
