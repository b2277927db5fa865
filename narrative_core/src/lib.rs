//! # Narrative Core
//!
//! The narrator's "brain" for the goblin pirate campaign. This crate sits on
//! top of `game_rules` and owns everything that talks to a language model:
//!
//! - **generator**: text-generation backends (OpenAI, Ollama, Gemini) behind
//!   a single trait, selected by configuration
//! - **game_master**: the narrator wrapper - system prompt, optional deep
//!   research refinement, apology fallback on failure
//! - **prompts**: the prompt builders for every narrative call
//! - **story**: the running story log with periodic summarization and the
//!   hidden end stage
//! - **character_gen**: structured character generation with the unbalanced
//!   goblin fallback
//!
//! ## Design Philosophy
//!
//! - **Mechanics-first**: dice decide outcomes; the model only describes them
//! - **Degrade, don't die**: a failed narrative call becomes an apology
//!   string and the game continues
//! - **One seam**: everything model-facing goes through `TextGenerator`, so
//!   tests script responses instead of the network

pub mod character_gen;
pub mod config;
pub mod game_master;
pub mod generator;
pub mod prompts;
pub mod story;

pub use character_gen::*;
pub use config::*;
pub use game_master::*;
pub use generator::*;
pub use story::*;

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use crate::generator::{GeneratorError, TextGenerator};

    /// A generator that replays scripted responses, standing in for the
    /// network in tests. The prompt log is shared so tests can inspect it
    /// after the generator has been boxed away.
    pub struct MockGenerator {
        responses: RefCell<VecDeque<Result<String, GeneratorError>>>,
        prompts_seen: Rc<RefCell<Vec<String>>>,
    }

    impl MockGenerator {
        pub fn new(responses: Vec<Result<String, GeneratorError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().collect()),
                prompts_seen: Rc::new(RefCell::new(Vec::new())),
            }
        }

        pub fn replying(texts: &[&str]) -> Self {
            Self::new(texts.iter().map(|t| Ok((*t).to_string())).collect())
        }

        pub fn failing() -> Self {
            Self::new(vec![Err(GeneratorError::EmptyCompletion)])
        }

        pub fn prompt_log(&self) -> Rc<RefCell<Vec<String>>> {
            Rc::clone(&self.prompts_seen)
        }
    }

    impl TextGenerator for MockGenerator {
        fn generate(&self, _system: &str, prompt: &str) -> Result<String, GeneratorError> {
            self.prompts_seen.borrow_mut().push(prompt.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(GeneratorError::EmptyCompletion))
        }
    }
}
