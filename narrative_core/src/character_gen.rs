//! Structured character generation with the unbalanced-goblin fallback.
//!
//! The one structured LLM call in the engine: the model is asked for a JSON
//! character kit. Any failure - network, malformed JSON, invariant-violating
//! stats - silently falls back to a locally generated unbalanced goblin, so
//! character creation never surfaces an error to the table.

use rand::Rng;
use serde::Deserialize;
use tracing::warn;

use game_rules::{PlayerCharacter, StatBlock};

use crate::game_master::GameMaster;
use crate::prompts;

/// Signature loot handed to unbalanced fallback goblins.
pub const FALLBACK_LOOT: &str =
    "A suspiciously ordinary-looking bilge bucket that is somehow never quite empty.";

#[derive(Debug, Deserialize)]
struct CharacterKit {
    strength: u8,
    cunning: u8,
    marksmanship: u8,
    signature_loot: String,
}

/// Generate a full character via one structured LLM call, falling back to an
/// unbalanced goblin on any failure.
pub fn generate_character<R: Rng + ?Sized>(
    gm: &GameMaster,
    rng: &mut R,
    name: &str,
    origin_story: &str,
) -> PlayerCharacter {
    let raw = match gm.call(&prompts::character_kit(name, origin_story)) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(%error, "character kit call failed, rolling an unbalanced goblin");
            return unbalanced_character(rng, name, origin_story);
        }
    };

    match parse_kit(&raw) {
        Some((stats, signature_loot)) => {
            PlayerCharacter::new(name, origin_story, stats, signature_loot)
        }
        None => {
            warn!("malformed character kit, rolling an unbalanced goblin");
            unbalanced_character(rng, name, origin_story)
        }
    }
}

/// The deterministic fallback: stats {0, 1, 2} in random order, fixed loot.
pub fn unbalanced_character<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    origin_story: &str,
) -> PlayerCharacter {
    PlayerCharacter::new(name, origin_story, StatBlock::unbalanced(rng), FALLBACK_LOOT)
}

/// Generate only the signature loot, for goblins with hand-allocated stats.
/// Falls back to the apology string on failure, which is still usable flavor.
pub fn generate_signature_loot(gm: &GameMaster, name: &str, origin_story: &str) -> String {
    gm.narrate(&prompts::signature_loot(name, origin_story))
}

fn parse_kit(raw: &str) -> Option<(StatBlock, String)> {
    let json = extract_json_object(raw)?;
    let kit: CharacterKit = serde_json::from_str(json).ok()?;
    let stats = StatBlock::new(kit.strength, kit.cunning, kit.marksmanship).ok()?;
    Some((stats, kit.signature_loot))
}

/// Slice out the outermost JSON object, tolerating markdown fences and
/// chatter around it.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGenerator;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn gm(mock: MockGenerator) -> GameMaster {
        GameMaster::new(Box::new(mock), false, 3)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    const VALID_KIT: &str = r#"{
        "strength": 2,
        "cunning": 1,
        "marksmanship": 0,
        "signature_loot": "A rusty cutlass that whispers pirate shanties"
    }"#;

    #[test]
    fn test_valid_kit_is_accepted() {
        let gm = gm(MockGenerator::replying(&[VALID_KIT]));
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        assert_eq!(goblin.stats.strength, 2);
        assert_eq!(goblin.stats.cunning, 1);
        assert_eq!(goblin.stats.marksmanship, 0);
        assert_eq!(
            goblin.signature_loot,
            "A rusty cutlass that whispers pirate shanties"
        );
        assert!(goblin.living);
    }

    #[test]
    fn test_fenced_kit_is_tolerated() {
        let fenced = format!("```json\n{VALID_KIT}\n```");
        let gm = gm(MockGenerator::replying(&[&fenced]));
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        assert_eq!(goblin.stats.strength, 2);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let gm = gm(MockGenerator::replying(&["Invalid JSON"]));
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        let mut values = [
            goblin.stats.strength,
            goblin.stats.cunning,
            goblin.stats.marksmanship,
        ];
        values.sort_unstable();
        assert_eq!(values, [0, 1, 2]);
        assert_eq!(goblin.signature_loot, FALLBACK_LOOT);
    }

    #[test]
    fn test_invariant_violation_falls_back() {
        let unbalanced = r#"{"strength": 3, "cunning": 3, "marksmanship": 3, "signature_loot": "x"}"#;
        let gm = gm(MockGenerator::replying(&[unbalanced]));
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        assert_eq!(goblin.signature_loot, FALLBACK_LOOT);
        assert!(goblin.stats.validate().is_ok());
    }

    #[test]
    fn test_negative_stat_falls_back() {
        let negative = r#"{"strength": -1, "cunning": 2, "marksmanship": 2, "signature_loot": "x"}"#;
        let gm = gm(MockGenerator::replying(&[negative]));
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        assert_eq!(goblin.signature_loot, FALLBACK_LOOT);
    }

    #[test]
    fn test_call_failure_falls_back() {
        let gm = gm(MockGenerator::failing());
        let goblin = generate_character(&gm, &mut rng(), "Grimtooth", "Wrestled a crocodile");

        assert_eq!(goblin.signature_loot, FALLBACK_LOOT);
        assert!(goblin.stats.validate().is_ok());
    }
}
