//! Prompt builders for every narrative call.
//!
//! Pure functions from game state to prompt text. Mechanics never read the
//! responses back; apart from the character kit (JSON) and the end-check
//! (YES/NO), every response is prose shown to the players.

use game_rules::{BoardingOutcome, GoblinShip, PlayerCharacter, ShipAttackOutcome, ShipSize, TargetShip};

/// Signature loot for a goblin with hand-allocated stats.
pub fn signature_loot(name: &str, origin_story: &str) -> String {
    format!(
        "Create a humorous and thematic signature piece of loot for this goblin pirate:\n\n\
         Name: {name}\n\
         Origin Story: {origin_story}\n\n\
         Create a unique piece of loot that:\n\
         1. Fits the character's backstory and personality\n\
         2. Has a humorous or interesting effect\n\
         3. Is thematic to the goblin pirate setting\n\
         4. Is described in 1-2 sentences\n\n\
         Provide only the loot description, no additional commentary."
    )
}

/// Full character kit as a structured JSON object.
pub fn character_kit(name: &str, origin_story: &str) -> String {
    format!(
        "Create a character kit for this goblin pirate:\n\n\
         Name: {name}\n\
         Origin Story: {origin_story}\n\n\
         Respond with ONLY a JSON object with these keys:\n\
         - \"strength\": integer 0-3\n\
         - \"cunning\": integer 0-3\n\
         - \"marksmanship\": integer 0-3\n\
         - \"signature_loot\": a humorous signature item in 1-2 sentences\n\n\
         The three stats must total exactly 3. Match the stats to the origin story.\n\
         No prose, no markdown fences, just the JSON object."
    )
}

/// Opening narrative for the adventure.
pub fn opening(character_stories: &str, ship_story: &str) -> String {
    format!(
        "Create an exciting and humorous opening narrative for a goblin pirate adventure:\n\n\
         Goblin Characters: {character_stories}\n\
         Ship Story: {ship_story}\n\n\
         Create a narrative that:\n\
         1. Sets up an interesting and challenging goal for the goblins\n\
         2. Establishes the setting and atmosphere\n\
         3. Introduces any important NPCs or factions\n\
         4. Creates a sense of urgency or excitement\n\
         5. Maintains the goblin pirate theme's humor\n\n\
         The narrative should be about 2-3 paragraphs long and give the players a clear \
         direction to pursue.\n\n\
         Provide only the narrative, no additional commentary."
    )
}

/// The hidden end stage, generated once and never shown to players.
pub fn end_stage(character_stories: &str, ship_story: &str, current_story: &str) -> String {
    format!(
        "Create a brief, secret end stage narrative for this goblin pirate adventure:\n\n\
         Goblin Characters: {character_stories}\n\
         Ship Story: {ship_story}\n\
         Current Story: {current_story}\n\n\
         Create a narrative that:\n\
         1. Describes a satisfying conclusion to the goblins' journey\n\
         2. Ties together the characters' stories and the ship's story\n\
         3. Includes a final challenge or reward\n\
         4. Is about 2-3 sentences long\n\
         5. Maintains the goblin pirate theme's humor\n\n\
         This will be used to determine when the game should end, but players won't see it.\n\n\
         Provide only the end stage narrative, no additional commentary."
    )
}

/// Binary end-of-adventure classification.
pub fn end_check(current_story: &str, end_stage: &str) -> String {
    format!(
        "Based on the following information, determine if the goblin pirate adventure \
         has reached a satisfying conclusion:\n\n\
         Current Story: {current_story}\n\
         Intended End Stage: {end_stage}\n\n\
         Consider:\n\
         1. Has the main goal been achieved?\n\
         2. Have the characters' stories been resolved?\n\
         3. Is there a natural stopping point?\n\
         4. Would continuing feel forced or anti-climactic?\n\n\
         Respond with ONLY \"YES\" or \"NO\", nothing else."
    )
}

/// Compress the running story while keeping continuity.
pub fn summarize_story(full_story: &str) -> String {
    format!(
        "Please create a concise summary of this goblin pirate adventure story, \
         preserving the key narrative elements, character development, and important events. \
         The goal of this summary should be to inform the Game Master what has happened so \
         far in the story, and to preserve running jokes and gags.\n\n\
         Original story:\n{full_story}\n\n\
         Provide only the summarized story, with no additional commentary."
    )
}

/// Describe a freshly spotted enemy ship.
pub fn target_ship(difficulty: u32, current_story: &str) -> String {
    format!(
        "Create a humorous and exciting description of an enemy ship that the goblins \
         have spotted:\n\n\
         Ship Difficulty: {difficulty} out of a maximum of 12\n\
         Current Story Context: {current_story}\n\n\
         Create a narrative that:\n\
         1. Describes the ship's appearance and characteristics\n\
         2. Hints at what kind of cargo or treasure it might carry\n\
         3. Includes some humorous or interesting details about the ship\n\
         4. Fits the difficulty level (higher difficulty = more impressive ship)\n\
         5. Maintains the goblin pirate theme's humor\n\n\
         Provide only the ship description, no additional commentary."
    )
}

/// Narrate one round of ship-to-ship combat.
pub fn ship_combat(
    player: &PlayerCharacter,
    ship: &GoblinShip,
    target: &TargetShip,
    player_action: &str,
    outcome: &ShipAttackOutcome,
    running_narrative: &str,
) -> String {
    format!(
        "Create a humorous and exciting narrative for this ship combat action:\n\n\
         Goblin: {name}\n\
         Character Story: {story}\n\
         Signature Loot: {loot}\n\
         Ship: {ship_name}\n\
         Ship Stats:\n{ship_summary}\n\
         Target Escaped: {escaped}\n\n\
         Player's Action: {player_action}\n\
         Attack Roll: {attack} (including {cannons} from ship's cannons)\n\
         Defense Roll: {defense}\n\
         Damage Dealt: {damage}\n\n\
         Target Ship: {target_narrative}\n\
         Current Target Hull: {hull}\n\n\
         Create a narrative that may:\n\
         1. Incorporate the player's specific action\n\
         2. Reference their character's story and signature loot (if applicable and humorous)\n\
         3. Describe the ship's role in the action\n\
         4. Explain the outcome based on the rolls\n\
         5. Maintain the goblin pirate theme's humor\n\n\
         If and only if the target ship has escaped, add a humorous note about the target \
         ship escaping.\n\n\
         Provide only the narrative, no additional commentary. If a piece of information is \
         not relevant to the action, don't include it. Here is what has happened so far:\n\
         {running_narrative}",
        name = player.name,
        story = player.origin_story,
        loot = player.signature_loot,
        ship_name = ship.name,
        ship_summary = ship.summary(),
        escaped = outcome.escaped,
        attack = outcome.attack_roll,
        cannons = ship.cannons,
        defense = outcome.defense_roll,
        damage = outcome.damage,
        target_narrative = target.narrative,
        hull = target.hull,
    )
}

/// Set the scene as the goblins swarm aboard.
pub fn boarding_setup(character_stories: &str, ship: &GoblinShip, target: &TargetShip) -> String {
    format!(
        "Create an exciting and humorous narrative for the goblins boarding the enemy ship:\n\n\
         Target Ship: {target_narrative}\n\
         Goblin Ship: {ship_name}\n\
         Ship Story: {ship_story}\n\n\
         Goblin Stories: {character_stories}\n\n\
         Make it dramatic and funny, incorporating the goblins' personalities and the \
         ships' characteristics!",
        target_narrative = target.narrative,
        ship_name = ship.name,
        ship_story = ship.ship_story,
    )
}

/// Narrate one goblin's boarding action.
pub fn boarding_action(
    goblin: &PlayerCharacter,
    target: &TargetShip,
    player_action: &str,
    outcome: &BoardingOutcome,
    running_narrative: &str,
) -> String {
    format!(
        "Create a humorous and exciting narrative for this boarding combat action:\n\n\
         Goblin: {name}\n\
         Character Story: {story}\n\
         Signature Loot: {loot}\n\
         Best Stat: {stat} ({stat_value})\n\n\
         Player's Action: {player_action}\n\
         Attack Roll: {attack} (including {stat_value} from {stat})\n\
         Defender Roll: {defender}\n\
         Difficulty: {difficulty}\n\
         Damage to Target Ship: {damage}\n\
         Did the attacking goblin survive? {living}\n\n\
         Target Ship: {target_narrative}\n\n\
         Create a narrative that:\n\
         1. Incorporates the player's specific action\n\
         2. References their character's story and signature loot\n\
         3. Explains how they use their best stat ({stat})\n\
         4. Describes the outcome based on the rolls\n\
         5. Maintains the goblin pirate theme's humor\n\n\
         Provide only the narrative, no additional commentary. Here is the running \
         narrative so far, if any:\n{running_narrative}",
        name = goblin.name,
        story = goblin.origin_story,
        loot = goblin.signature_loot,
        stat = outcome.best_stat,
        stat_value = outcome.best_stat_value,
        attack = outcome.attack_roll,
        defender = outcome.defender_roll,
        difficulty = target.difficulty,
        damage = outcome.damage,
        living = !outcome.attacker_slain,
        target_narrative = target.narrative,
    )
}

/// Narrate the loot haul from a defeated ship.
pub fn loot_haul(total_loot: u32, ship_size: ShipSize, character_stories: &str) -> String {
    format!(
        "Create a humorous narrative for the goblins collecting loot from the defeated ship:\n\n\
         Total Loot Collected: {total_loot}\n\
         Ship Size: {ship_size} ship\n\
         Goblin Stories: {character_stories}\n\n\
         Make it funny and describe how each goblin contributes to the looting process!"
    )
}

/// Retell a raid as a tavern tale.
pub fn summarize_raid(running_narrative: &str) -> String {
    format!(
        "Create a concise and humorous summary of this goblin pirate raid:\n\n\
         Full Raid Narrative:\n{running_narrative}\n\n\
         Create a summary that:\n\
         1. Captures the key events and turning points\n\
         2. Highlights the most memorable character actions\n\
         3. Includes the final outcome\n\
         4. Maintains the goblin pirate theme's humor\n\
         5. Is about 2-3 paragraphs long\n\n\
         Focus on the most exciting and funny moments, and make it feel like a pirate's \
         tale being retold in a tavern!\n\n\
         Provide only the summary, no additional commentary."
    )
}

/// Deep research refinement of a previous response.
pub fn refine(previous_response: &str) -> String {
    format!(
        "Previous response to the prompt: {previous_response}\n\n\
         Please refine this response to maximize:\n\
         1. Player enjoyment and engagement\n\
         2. Narrative cohesiveness with the game's theme and rules\n\n\
         Output only the refined response in the same format as the original, \
         with no explanations."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::{Ruleset, StatBlock};

    #[test]
    fn test_end_check_demands_binary_answer() {
        let prompt = end_check("the story", "the secret ending");
        assert!(prompt.contains("the story"));
        assert!(prompt.contains("the secret ending"));
        assert!(prompt.contains("ONLY \"YES\" or \"NO\""));
    }

    #[test]
    fn test_character_kit_names_all_keys() {
        let prompt = character_kit("Grimtooth", "Wrestled a crocodile");
        for key in ["strength", "cunning", "marksmanship", "signature_loot"] {
            assert!(prompt.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn test_ship_combat_includes_rolls_and_history() {
        let rules = Ruleset::default();
        let player = PlayerCharacter::new(
            "Grimtooth",
            "Wrestled a crocodile",
            StatBlock::new(2, 1, 0).unwrap(),
            "A rusty cutlass",
        );
        let ship = GoblinShip::new("The Squeaky Plank", "Stolen from an admiral");
        let target = TargetShip::new(8, "A mighty warship", &rules);
        let outcome = ShipAttackOutcome {
            attack_roll: 11,
            defense_roll: 6,
            damage: 5,
            critical: false,
            escaped: false,
            boardable: false,
        };

        let prompt = ship_combat(&player, &ship, &target, "Fire the cannons!", &outcome, "so far");
        assert!(prompt.contains("Attack Roll: 11"));
        assert!(prompt.contains("Defense Roll: 6"));
        assert!(prompt.contains("Fire the cannons!"));
        assert!(prompt.contains("so far"));
    }
}
