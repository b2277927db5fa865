//! The game master: the narrator wrapper around a text generator.

use tracing::warn;

use crate::config::NarratorConfig;
use crate::generator::{build_generator, GeneratorError, TextGenerator};
use crate::prompts;

/// System message sent with every narrative call.
pub const SYSTEM_PROMPT: &str =
    "You are a creative and humorous Game Master for a goblin pirate-themed TTRPG.";

/// Substituted when a narrative call fails; the game carries on.
pub const APOLOGY: &str = "I apologize, but I encountered an error processing your request.";

/// The narrator. Wraps a backend with the GM system prompt, optional deep
/// research refinement, and the apology fallback.
pub struct GameMaster {
    generator: Box<dyn TextGenerator>,
    deep_research: bool,
    max_iterations: u32,
}

impl GameMaster {
    pub fn new(generator: Box<dyn TextGenerator>, deep_research: bool, max_iterations: u32) -> Self {
        Self {
            generator,
            deep_research,
            max_iterations,
        }
    }

    /// Build the narrator for the configured backend. Fails only on missing
    /// credentials.
    pub fn from_config(config: &NarratorConfig) -> Result<Self, GeneratorError> {
        Ok(Self::new(
            build_generator(config)?,
            config.deep_research,
            config.max_iterations,
        ))
    }

    /// One narrative call, surfacing errors. In deep research mode the
    /// model's own output is resubmitted for refinement until
    /// `max_iterations` total calls have been made.
    pub fn call(&self, prompt: &str) -> Result<String, GeneratorError> {
        let mut response = self.generator.generate(SYSTEM_PROMPT, prompt)?;
        if self.deep_research {
            for _ in 1..self.max_iterations {
                response = self
                    .generator
                    .generate(SYSTEM_PROMPT, &prompts::refine(&response))?;
            }
        }
        Ok(response)
    }

    /// One narrative call that never fails: errors are logged and replaced
    /// with the apology string.
    pub fn narrate(&self, prompt: &str) -> String {
        match self.call(prompt) {
            Ok(text) => text,
            Err(error) => {
                warn!(%error, "narrative call failed, substituting apology");
                APOLOGY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGenerator;

    #[test]
    fn test_narrate_passes_through_success() {
        let gm = GameMaster::new(Box::new(MockGenerator::replying(&["Yarr!"])), false, 3);
        assert_eq!(gm.narrate("tell a tale"), "Yarr!");
    }

    #[test]
    fn test_narrate_substitutes_apology_on_failure() {
        let gm = GameMaster::new(Box::new(MockGenerator::failing()), false, 3);
        assert_eq!(gm.narrate("tell a tale"), APOLOGY);
    }

    #[test]
    fn test_deep_research_refines_up_to_max_iterations() {
        let mock = MockGenerator::replying(&["draft", "better", "best"]);
        let gm = GameMaster::new(Box::new(mock), true, 3);
        assert_eq!(gm.call("tell a tale").unwrap(), "best");
    }

    #[test]
    fn test_deep_research_feeds_prior_output_forward() {
        let mock = MockGenerator::replying(&["draft", "final"]);
        let log = mock.prompt_log();
        let gm = GameMaster::new(Box::new(mock), true, 2);

        assert_eq!(gm.call("tell a tale").unwrap(), "final");

        let prompts = log.borrow();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0], "tell a tale");
        assert!(prompts[1].contains("draft"));
    }

    #[test]
    fn test_single_call_when_deep_research_off() {
        let mock = MockGenerator::replying(&["only"]);
        let gm = GameMaster::new(Box::new(mock), false, 3);
        assert_eq!(gm.call("tell a tale").unwrap(), "only");
    }
}
