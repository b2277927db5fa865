//! The raid phase: ship-to-ship combat until the target escapes or becomes
//! boardable, then boarding actions until its crew is wiped out. Fallen
//! goblins are replaced at the table mid-raid.

use game_rules::{resolve_boarding, resolve_ship_attack, TargetShip};
use narrative_core::{prompts, GameMaster};

use crate::game::{self, Game};
use crate::input;

/// Shown when the raid summary call fails; the raw logs are dropped rather
/// than fed back into the story.
const FUZZY_RAID: &str =
    "The raid was a wild adventure, but the details are a bit fuzzy after all that grog!";

/// How a raid ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidOutcome {
    Escaped,
    Defeated,
    Unresolved,
}

impl RaidOutcome {
    /// One-line wrap-up appended to the raid log before summarization.
    pub fn describe(self) -> &'static str {
        match self {
            RaidOutcome::Escaped => "The enemy ship managed to escape!",
            RaidOutcome::Defeated => "The enemy ship has been defeated!",
            RaidOutcome::Unresolved => "The battle continues...",
        }
    }
}

/// Everything the round loop needs after a raid: the outcome plus the raw
/// narration logs for summarization into the story.
pub struct RaidReport {
    pub outcome: RaidOutcome,
    pub ship_log: String,
    pub boarding_log: String,
}

/// Compress a raid log into a story-sized fragment.
pub fn summarize_raid_log(gm: &GameMaster, log: &str) -> String {
    gm.call(&prompts::summarize_raid(log)).unwrap_or_else(|error| {
        tracing::warn!(%error, "raid summary failed");
        FUZZY_RAID.to_string()
    })
}

impl Game<'_> {
    /// Run a full raid against one target ship.
    pub(crate) fn raid_phase(
        &mut self,
        target: &mut TargetShip,
        order: &[usize],
    ) -> anyhow::Result<RaidReport> {
        let ship_log = self.ship_combat(target, order)?;
        let boarding_log = if target.boardable && !target.escaped {
            self.boarding_combat(target, order)?
        } else {
            String::new()
        };

        let outcome = if target.escaped {
            RaidOutcome::Escaped
        } else if target.is_defeated() {
            RaidOutcome::Defeated
        } else {
            RaidOutcome::Unresolved
        };
        Ok(RaidReport {
            outcome,
            ship_log,
            boarding_log,
        })
    }

    /// Ship-to-ship exchanges, every goblin in roster order, until the target
    /// escapes or its hull drops low enough to board.
    fn ship_combat(&mut self, target: &mut TargetShip, order: &[usize]) -> anyhow::Result<String> {
        println!("\n--- Ship-to-Ship Combat! ---");
        let mut ship_log = String::new();

        'combat: while !target.boardable && !target.escaped {
            for &idx in order {
                let player_name = self.roster[idx].name.clone();
                println!("\n{player_name}'s turn in ship combat!");
                println!("Current ship stats:\n{}", self.ship.summary());
                println!("Target ship status:\n{}", target.summary());

                let action = input::read_nonempty(&format!(
                    "What would you like to do with the ship, {player_name}? "
                ))?;

                let outcome =
                    resolve_ship_attack(self.ship.cannons, target, self.dice, self.rules);
                let narrative = self.gm.narrate(&prompts::ship_combat(
                    &self.roster[idx],
                    &self.ship,
                    target,
                    &action,
                    &outcome,
                    &ship_log,
                ));
                println!("\n{narrative}");
                ship_log.push_str(&narrative);
                ship_log.push('\n');

                if outcome.escaped {
                    break 'combat;
                }
                println!("\nTarget ship hull: {}", target.hull);
                if outcome.boardable {
                    println!("The target ship is vulnerable to boarding!");
                    break 'combat;
                }
            }
        }
        Ok(ship_log)
    }

    /// Boarding actions, every goblin in roster order, until the target crew
    /// is wiped out. A slain goblin is announced and a fresh recruit takes
    /// over their seat at the table.
    fn boarding_combat(
        &mut self,
        target: &mut TargetShip,
        order: &[usize],
    ) -> anyhow::Result<String> {
        let mut boarding_log = String::new();

        while target.hull > 0 {
            println!("\n--- Boarding Combat! ---");
            let setup = self.gm.narrate(&prompts::boarding_setup(
                &self.origin_stories(),
                &self.ship,
                target,
            ));
            println!("\n{setup}");

            for &idx in order {
                if target.hull == 0 {
                    break;
                }
                let player_name = self.roster[idx].name.clone();
                println!("\n{player_name}'s boarding action!");

                let action = input::read_nonempty(&format!(
                    "What would you like to do, {player_name}? "
                ))?;

                let outcome =
                    resolve_boarding(&mut self.roster[idx], target, self.dice, self.rules);
                let narrative = self.gm.narrate(&prompts::boarding_action(
                    &self.roster[idx],
                    target,
                    &action,
                    &outcome,
                    &boarding_log,
                ));
                println!("\n{narrative}");
                boarding_log.push_str(&narrative);
                boarding_log.push('\n');

                if outcome.attacker_slain {
                    println!(
                        "\n{player_name} has fallen in battle! Time for a new goblin to join the crew!"
                    );
                    let recruit = game::create_character(self.gm, &mut self.rng, None)?;
                    println!("Welcome {} to the crew!", recruit.name);
                    self.roster[idx] = recruit;
                }
                println!("Target crew is down to {}!", target.hull);
            }
        }
        Ok(boarding_log)
    }
}
