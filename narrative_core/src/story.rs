//! The story log: running narrative state for the whole adventure.
//!
//! Owned by the turn loop and passed to whichever phase needs to read or
//! append. Appends are cheap concatenation; every
//! `max_updates_before_summary` appends the log is compressed by one
//! summarization call so prompts stay a manageable size.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game_master::GameMaster;
use crate::prompts;

/// Separator used when joining character origin stories into one block.
const STORY_SEPARATOR: &str = "\n-----\n";

/// Running narrative state: the current story, the framing "full story", and
/// the hidden end stage the end-check compares against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryLog {
    character_stories: String,
    ship_story: String,
    current_story: String,
    full_story: String,
    end_stage: String,
    update_counter: u32,
    max_updates_before_summary: u32,
}

impl StoryLog {
    pub fn new(
        character_stories: &[String],
        ship_story: impl Into<String>,
        max_updates_before_summary: u32,
    ) -> Self {
        let mut log = Self {
            character_stories: character_stories.join(STORY_SEPARATOR),
            ship_story: ship_story.into(),
            current_story: String::new(),
            full_story: String::new(),
            end_stage: String::new(),
            update_counter: 0,
            max_updates_before_summary,
        };
        log.rebuild_full_story();
        log
    }

    /// The story as it stands (post-summarization).
    pub fn current(&self) -> &str {
        &self.current_story
    }

    /// The framed story handed to summarization prompts.
    pub fn full(&self) -> &str {
        &self.full_story
    }

    /// The hidden end stage. Never shown to players.
    pub fn end_stage(&self) -> &str {
        &self.end_stage
    }

    #[cfg(test)]
    pub(crate) fn update_counter(&self) -> u32 {
        self.update_counter
    }

    /// Generate the opening narrative and the hidden end stage. Returns the
    /// opening for display.
    pub fn open_adventure(&mut self, gm: &GameMaster) -> String {
        self.current_story = gm.narrate(&prompts::opening(&self.character_stories, &self.ship_story));
        self.rebuild_full_story();
        self.end_stage = gm.narrate(&prompts::end_stage(
            &self.character_stories,
            &self.ship_story,
            &self.current_story,
        ));
        self.current_story.clone()
    }

    /// Append a narrative fragment. When the update counter reaches the
    /// threshold the story is summarized and the counter resets.
    pub fn append(&mut self, gm: &GameMaster, fragment: &str) {
        self.current_story.push_str("\n\n");
        self.current_story.push_str(fragment);
        self.rebuild_full_story();

        self.update_counter += 1;
        if self.update_counter >= self.max_updates_before_summary {
            self.summarize(gm);
            self.update_counter = 0;
        }
    }

    /// Ask whether the story has reached its hidden end stage. Only a plain
    /// YES ends the game; anything else (including an apology fallback from
    /// a failed call) means "keep playing".
    pub fn should_end(&self, gm: &GameMaster) -> bool {
        let verdict = gm.narrate(&prompts::end_check(&self.current_story, &self.end_stage));
        verdict.trim().eq_ignore_ascii_case("yes")
    }

    fn rebuild_full_story(&mut self) {
        self.full_story = format!(
            "This is a hilarious and fun-filled story about these goblins {} and their ship, {}. \
             This is the story thus far: {}",
            self.character_stories, self.ship_story, self.current_story
        );
    }

    /// Replace the current story with a summary. A failed summarization
    /// keeps the unsummarized story.
    fn summarize(&mut self, gm: &GameMaster) {
        match gm.call(&prompts::summarize_story(&self.full_story)) {
            Ok(summary) => {
                self.current_story = summary;
                self.rebuild_full_story();
            }
            Err(error) => {
                warn!(%error, "story summarization failed, keeping unsummarized story");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorError;
    use crate::test_support::MockGenerator;

    fn story_log() -> StoryLog {
        StoryLog::new(
            &["A goblin who wrestled a crocodile".to_string()],
            "The Squeaky Plank's story",
            3,
        )
    }

    fn gm(mock: MockGenerator) -> GameMaster {
        GameMaster::new(Box::new(mock), false, 3)
    }

    #[test]
    fn test_open_adventure_sets_story_and_end_stage() {
        let gm = gm(MockGenerator::replying(&[
            "The goblins set sail!",
            "They retire rich and smug.",
        ]));
        let mut log = story_log();

        let opening = log.open_adventure(&gm);

        assert_eq!(opening, "The goblins set sail!");
        assert_eq!(log.current(), "The goblins set sail!");
        assert_eq!(log.end_stage(), "They retire rich and smug.");
        assert!(log.full().contains("The goblins set sail!"));
    }

    #[test]
    fn test_append_concatenates_below_threshold() {
        let gm = gm(MockGenerator::replying(&[]));
        let mut log = story_log();

        log.append(&gm, "A daring raid.");
        log.append(&gm, "A narrow escape.");

        assert!(log.current().contains("A daring raid."));
        assert!(log.current().contains("A narrow escape."));
        assert_eq!(log.update_counter(), 2);
    }

    #[test]
    fn test_summarization_after_threshold_appends() {
        let gm = gm(MockGenerator::replying(&["THE SUMMARY"]));
        let mut log = story_log();

        log.append(&gm, "one");
        log.append(&gm, "two");
        log.append(&gm, "three");

        assert_eq!(log.current(), "THE SUMMARY");
        assert_eq!(log.update_counter(), 0);
        assert!(log.full().contains("THE SUMMARY"));
    }

    #[test]
    fn test_failed_summarization_keeps_story() {
        let gm = gm(MockGenerator::new(vec![Err(GeneratorError::EmptyCompletion)]));
        let mut log = story_log();

        log.append(&gm, "one");
        log.append(&gm, "two");
        log.append(&gm, "three");

        assert!(log.current().contains("three"));
        assert_eq!(log.update_counter(), 0);
    }

    #[test]
    fn test_should_end_accepts_only_yes() {
        let mut log = story_log();
        log.end_stage = "the end".to_string();

        assert!(log.should_end(&gm(MockGenerator::replying(&["YES"]))));
        assert!(log.should_end(&gm(MockGenerator::replying(&["  yes \n"]))));
        assert!(!log.should_end(&gm(MockGenerator::replying(&["NO"]))));
        assert!(!log.should_end(&gm(MockGenerator::replying(&["YES, definitely!"]))));
        // A failed call becomes an apology string, which fails safe to "no".
        assert!(!log.should_end(&gm(MockGenerator::failing())));
    }
}
