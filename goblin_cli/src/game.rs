//! Game setup and the round loop: SAIL -> RAID -> LOOT -> CONTINUE-CHECK.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use game_rules::{
    scout_difficulty, Dice, GoblinShip, PlayerCharacter, Ruleset, ShipStat, StatBlock, TargetShip,
    STAT_POINT_POOL,
};
use narrative_core::{character_gen, prompts, GameMaster, StoryLog};

use crate::config::AppConfig;
use crate::input;
use crate::raid::{self, RaidOutcome};

/// One running campaign session.
pub(crate) struct Game<'a> {
    pub(crate) rules: &'a Ruleset,
    pub(crate) gm: &'a GameMaster,
    pub(crate) dice: &'a mut dyn Dice,
    pub(crate) rng: ThreadRng,
    pub(crate) roster: Vec<PlayerCharacter>,
    pub(crate) ship: GoblinShip,
    pub(crate) story: StoryLog,
}

/// Run a full interactive session: setup, then rounds until the players
/// choose to stop.
pub fn run(config: &AppConfig, gm: &GameMaster, dice: &mut dyn Dice) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();

    let player_count = input::read_count("Enter number of players: ")?;
    let mut roster = Vec::with_capacity(player_count);
    for player_number in 0..player_count {
        roster.push(create_character(gm, &mut rng, Some(player_number))?);
    }

    let ship_name = input::read_nonempty("Enter a name for your goblin ship: ")?;
    let ship_story = input::read_nonempty("Argghhhh! What's our ship's story?: ")?;
    let ship = GoblinShip::new(ship_name, ship_story);

    let origin_stories: Vec<String> = roster.iter().map(|g| g.origin_story.clone()).collect();
    let mut story = StoryLog::new(
        &origin_stories,
        ship.ship_story.clone(),
        config.narrator.max_updates_before_summary,
    );
    // The end stage is generated here too, but stays hidden from the table.
    let opening = story.open_adventure(gm);
    println!("\n{opening}");

    let mut game = Game {
        rules: &config.rules,
        gm,
        dice,
        rng,
        roster,
        ship,
        story,
    };

    loop {
        game.round()?;
        if !game.continue_check()? {
            break;
        }
    }
    println!("\nGame Over! Thanks for playing!");
    Ok(())
}

/// Interactive character creation: name and backstory, then either a
/// GM-rolled kit or hand-allocated stats with GM-generated loot.
pub(crate) fn create_character(
    gm: &GameMaster,
    rng: &mut ThreadRng,
    player_number: Option<usize>,
) -> anyhow::Result<PlayerCharacter> {
    let name_prompt = match player_number {
        Some(n) => format!("Enter name for Goblin {}: ", n + 1),
        None => "Enter name for your new Goblin: ".to_string(),
    };
    let name = input::read_nonempty(&name_prompt)?;
    let story = input::read_nonempty(&format!("Write a short backstory for {name}: "))?;

    println!("\nHow should {name} get their stats?");
    println!("1. Let the Game Master roll them");
    println!("2. Allocate {STAT_POINT_POOL} points yourself");
    let goblin = match input::menu_choice("Choose (1-2): ", 2)? {
        1 => character_gen::generate_character(gm, rng, &name, &story),
        _ => {
            let stats = allocate_stats()?;
            let signature_loot = character_gen::generate_signature_loot(gm, &name, &story);
            println!("\nYour signature loot: {signature_loot}");
            PlayerCharacter::new(name, story, stats, signature_loot)
        }
    };
    println!("\n{}", goblin.summary());
    Ok(goblin)
}

/// Hand allocation of the stat point pool, one point at a time.
fn allocate_stats() -> anyhow::Result<StatBlock> {
    println!(
        "\nYou have {STAT_POINT_POOL} points to allocate between Strength, Cunning, and Marksmanship."
    );
    let (mut strength, mut cunning, mut marksmanship) = (0u8, 0u8, 0u8);
    let mut pool = STAT_POINT_POOL;
    while pool > 0 {
        println!("You have {pool} points left to allocate.");
        match input::menu_choice(
            "Allocate to: (1) Strength, (2) Cunning, (3) Marksmanship: ",
            3,
        )? {
            1 => strength += 1,
            2 => cunning += 1,
            _ => marksmanship += 1,
        }
        pool -= 1;
    }
    Ok(StatBlock::new(strength, cunning, marksmanship)?)
}

impl Game<'_> {
    /// One full round across all phases.
    fn round(&mut self) -> anyhow::Result<()> {
        // Player order is reshuffled each round.
        let mut order: Vec<usize> = (0..self.roster.len()).collect();
        order.shuffle(&mut self.rng);

        let target = self.sail_phase(&order)?;

        println!("\n--- Raid Phase! ---");
        match target {
            Some(mut target) => {
                println!(
                    "Target ship spotted: {} (Difficulty {})",
                    target.narrative, target.difficulty
                );
                let report = self.raid_phase(&mut target, &order)?;
                println!("\n{}", report.outcome.describe());

                if !report.ship_log.is_empty() {
                    let summary = raid::summarize_raid_log(self.gm, &report.ship_log);
                    self.story.append(self.gm, &summary);
                }
                if !report.boarding_log.is_empty() {
                    let mut log = report.boarding_log;
                    log.push('\n');
                    log.push_str(report.outcome.describe());
                    let summary = raid::summarize_raid_log(self.gm, &log);
                    self.story.append(self.gm, &summary);
                }

                if report.outcome == RaidOutcome::Defeated {
                    println!("\n--- Loot Phase! ---");
                    self.loot_phase(&order);
                }
            }
            None => println!("No target ship spotted."),
        }
        Ok(())
    }

    /// SAIL: each player picks one ship action.
    fn sail_phase(&mut self, order: &[usize]) -> anyhow::Result<Option<TargetShip>> {
        println!("\n--- Sail Phase! ---");
        let mut target = None;

        for &idx in order {
            let player_name = self.roster[idx].name.clone();
            println!("\n{player_name}'s turn!");
            println!("Available actions:");
            println!("1. Spy a Target (Roll 2d6)");
            println!("2. Repair the Ship (Cost: {} Loot)", self.rules.repair_cost);
            println!(
                "3. Train the Crew (Cost: {} Loot to Improve Morale)",
                self.rules.train_cost
            );
            println!("4. Upgrade the Ship (Cost: {} Loot)", self.rules.upgrade_cost);
            println!("5. Do nothing! (Free)");

            let action = input::menu_choice(
                &format!(
                    "What would you like to do, {player_name} with your total loot at {}? (1-5): ",
                    self.ship.loot
                ),
                5,
            )?;

            match action {
                1 => {
                    let roll = self.dice.roll_check();
                    println!("You rolled a {roll}!");
                    if roll >= 10 {
                        println!("You found an especially rich target!");
                    } else if roll >= 7 {
                        println!("You found an average ship.");
                    } else {
                        println!("You found a weak ship... or is it an ambush?");
                    }
                    let difficulty = scout_difficulty(roll, self.dice);
                    let narrative = self
                        .gm
                        .narrate(&prompts::target_ship(difficulty, self.story.current()));
                    let spotted = TargetShip::new(difficulty, narrative, self.rules);
                    println!("\nTarget Ship Details:\n{}", spotted.summary());
                    target = Some(spotted);
                }
                2 => match self.ship.repair(self.rules) {
                    Ok(()) => println!("\nShip repaired! Current stats:\n{}", self.ship.summary()),
                    Err(error) => println!("{error}."),
                },
                3 => match self.ship.train_crew(self.rules) {
                    Ok(()) => println!("\nCrew trained! Current stats:\n{}", self.ship.summary()),
                    Err(error) => println!("{error}."),
                },
                4 => {
                    println!("\nAvailable upgrades:");
                    println!("1. Hull");
                    println!("2. Speed");
                    println!("3. Cannons");
                    println!("4. Trickery");
                    let stat = match input::menu_choice(
                        "Which stat would you like to upgrade? (1-4): ",
                        4,
                    )? {
                        1 => ShipStat::Hull,
                        2 => ShipStat::Speed,
                        3 => ShipStat::Cannons,
                        _ => ShipStat::Trickery,
                    };
                    match self.ship.upgrade(stat, self.rules) {
                        Ok(()) => {
                            println!("\nShip upgraded! Current stats:\n{}", self.ship.summary());
                        }
                        Err(error) => println!("{error}."),
                    }
                }
                _ => println!("No action!"),
            }
        }
        Ok(target)
    }

    /// LOOT: every player rolls the ship's size-class die; the haul is
    /// narrated and appended to the story.
    fn loot_phase(&mut self, order: &[usize]) {
        let size = self.ship.size_class();
        let total_stats = self.ship.speed + self.ship.cannons + self.ship.trickery;
        println!("\nYour ship's total stats: {total_stats}");
        println!("Rolling for loot with a {size} ship...");

        let mut total_loot = 0;
        for &idx in order {
            let roll = self.dice.roll_loot(size);
            total_loot += roll;
            println!("{} rolled a {roll}!", self.roster[idx].name);
        }

        self.ship.loot += total_loot;
        println!("\nTotal loot collected: {total_loot}");
        println!("Current ship loot: {}", self.ship.loot);

        let stories = self.origin_stories();
        let narrative = self
            .gm
            .narrate(&prompts::loot_haul(total_loot, size, &stories));
        println!("\n{narrative}");
        self.story.append(self.gm, &narrative);
    }

    /// CONTINUE-CHECK: the narrator's verdict is advisory; the game ends
    /// only on explicit player confirmation.
    fn continue_check(&self) -> anyhow::Result<bool> {
        if self.story.should_end(self.gm) {
            println!(
                "\nThe goblins feel like they're approaching a natural conclusion to their adventure..."
            );
            let end_here = input::confirm("Would you like to end the game here? (y/n): ")?;
            Ok(!end_here)
        } else {
            Ok(input::confirm("Continue playing the game? (y/n): ")?)
        }
    }

    /// All current origin stories joined for prompt context.
    pub(crate) fn origin_stories(&self) -> String {
        self.roster
            .iter()
            .map(|g| g.origin_story.as_str())
            .collect::<Vec<_>>()
            .join("\n-----\n")
    }
}
