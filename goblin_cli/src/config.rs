//! Application configuration: an optional TOML file over built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use game_rules::Ruleset;
use narrative_core::NarratorConfig;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "goblin.toml";

/// Top-level configuration. Everything has a sensible default, so the file
/// is optional and partial files are fine. API keys come only from the
/// environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: Ruleset,
    pub narrator: NarratorConfig,
}

/// Load `goblin.toml` from the working directory, or defaults if absent.
pub fn load_default() -> anyhow::Result<AppConfig> {
    load(Path::new(CONFIG_FILE))
}

pub fn load(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative_core::Backend;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::default();
        assert_eq!(config.rules.repair_cost, 10);
        assert_eq!(config.narrator.backend, Backend::OpenAi);
    }

    #[test]
    fn test_partial_file_overrides() {
        let raw = r#"
            [rules]
            hull_multiplier = 3

            [narrator]
            backend = "ollama"
            deep_research = true
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.rules.hull_multiplier, 3);
        assert_eq!(config.rules.repair_cost, 10);
        assert_eq!(config.narrator.backend, Backend::Ollama);
        assert!(config.narrator.deep_research);
        assert_eq!(config.narrator.max_iterations, 3);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let config = load(Path::new("definitely-not-here.toml")).unwrap();
        assert_eq!(config.rules.upgrade_cost, 20);
    }
}
