//! Ship definitions: the crew's goblin ship and per-raid target ships.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ruleset::Ruleset;

/// Error raised when a ship action cannot be paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("not enough loot: need {need}, have {have}")]
    InsufficientLoot { need: u32, have: u32 },
}

/// Upgradeable goblin ship attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipStat {
    Hull,
    Speed,
    Cannons,
    Trickery,
}

impl std::fmt::Display for ShipStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShipStat::Hull => "Hull",
            ShipStat::Speed => "Speed",
            ShipStat::Cannons => "Cannons",
            ShipStat::Trickery => "Trickery",
        };
        write!(f, "{}", name)
    }
}

/// Ship size classes, used to pick the loot die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipSize {
    Small,
    Medium,
    Treasure,
}

impl ShipSize {
    /// Sides of the loot die for this size class.
    pub fn loot_die(self) -> u32 {
        match self {
            ShipSize::Small => 6,
            ShipSize::Medium => 8,
            ShipSize::Treasure => 10,
        }
    }
}

impl std::fmt::Display for ShipSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShipSize::Small => "small",
            ShipSize::Medium => "medium",
            ShipSize::Treasure => "treasure",
        };
        write!(f, "{}", name)
    }
}

/// The crew's ship. Created once per game, mutated by loot-gated actions and
/// by combat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoblinShip {
    pub name: String,
    pub ship_story: String,
    pub hull: u32,
    pub max_hull: u32,
    pub speed: u32,
    pub cannons: u32,
    pub trickery: u32,
    pub morale: u32,
    pub loot: u32,
}

impl GoblinShip {
    /// A fresh ship with starting attributes.
    pub fn new(name: impl Into<String>, ship_story: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ship_story: ship_story.into(),
            hull: 20,
            max_hull: 20,
            speed: 1,
            cannons: 1,
            trickery: 1,
            morale: 1,
            loot: 0,
        }
    }

    /// Human-readable ship sheet.
    pub fn summary(&self) -> String {
        format!(
            "Ship Name: {}\nHull: {}/{}\nSpeed: {}\nCannons: {}\nTrickery: {}\nMorale: {}\nLoot: {}",
            self.name,
            self.hull,
            self.max_hull,
            self.speed,
            self.cannons,
            self.trickery,
            self.morale,
            self.loot
        )
    }

    /// Size class from total attack-relevant stats.
    pub fn size_class(&self) -> ShipSize {
        let total = self.speed + self.cannons + self.trickery;
        if total <= 3 {
            ShipSize::Small
        } else if total <= 9 {
            ShipSize::Medium
        } else {
            ShipSize::Treasure
        }
    }

    fn spend(&mut self, cost: u32) -> Result<(), ActionError> {
        if self.loot < cost {
            return Err(ActionError::InsufficientLoot {
                need: cost,
                have: self.loot,
            });
        }
        self.loot -= cost;
        Ok(())
    }

    /// Restore the hull to maximum for the ruleset repair cost.
    pub fn repair(&mut self, rules: &Ruleset) -> Result<(), ActionError> {
        self.spend(rules.repair_cost)?;
        self.hull = self.max_hull;
        Ok(())
    }

    /// Improve crew morale for the ruleset training cost.
    pub fn train_crew(&mut self, rules: &Ruleset) -> Result<(), ActionError> {
        self.spend(rules.train_cost)?;
        self.morale += 1;
        Ok(())
    }

    /// Raise one ship attribute for the ruleset upgrade cost. A hull upgrade
    /// raises both the maximum and the current hull.
    pub fn upgrade(&mut self, stat: ShipStat, rules: &Ruleset) -> Result<(), ActionError> {
        self.spend(rules.upgrade_cost)?;
        match stat {
            ShipStat::Hull => {
                self.max_hull += 1;
                self.hull += 1;
            }
            ShipStat::Speed => self.speed += 1,
            ShipStat::Cannons => self.cannons += 1,
            ShipStat::Trickery => self.trickery += 1,
        }
        Ok(())
    }
}

/// An enemy vessel generated per raid encounter and discarded afterwards.
///
/// The boardable and escaped flags are mutually exclusive terminal paths:
/// combat resolution sets at most one of them, and a defeated ship (hull 0)
/// is reached only through the boardable path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetShip {
    /// Difficulty rating, 2-12.
    pub difficulty: u32,
    pub hull: u32,
    /// LLM-generated description; purely narrative.
    pub narrative: String,
    pub boardable: bool,
    pub escaped: bool,
}

impl TargetShip {
    /// Build a target ship. Hull scales with difficulty by the ruleset
    /// multiplier, floored at 5.
    pub fn new(difficulty: u32, narrative: impl Into<String>, rules: &Ruleset) -> Self {
        Self {
            difficulty,
            hull: (difficulty * rules.hull_multiplier).max(5),
            narrative: narrative.into(),
            boardable: false,
            escaped: false,
        }
    }

    /// Defeated once the hull is worn down to nothing.
    pub fn is_defeated(&self) -> bool {
        self.hull == 0
    }

    /// Human-readable status block.
    pub fn summary(&self) -> String {
        format!(
            "Target Ship\nDifficulty: {}\nHull: {}\nNarrative: {}\nBoardable: {}\nEscaped: {}",
            self.difficulty, self.hull, self.narrative, self.boardable, self.escaped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ship_defaults() {
        let ship = GoblinShip::new("The Squeaky Plank", "Stolen from a snoring admiral");
        assert_eq!(ship.hull, 20);
        assert_eq!(ship.max_hull, 20);
        assert_eq!(ship.speed, 1);
        assert_eq!(ship.cannons, 1);
        assert_eq!(ship.trickery, 1);
        assert_eq!(ship.loot, 0);
        assert_eq!(ship.size_class(), ShipSize::Small);
    }

    #[test]
    fn test_size_class_thresholds() {
        let mut ship = GoblinShip::new("Tub", "story");
        ship.speed = 3;
        ship.cannons = 3;
        ship.trickery = 3;
        assert_eq!(ship.size_class(), ShipSize::Medium);

        ship.speed = 4;
        assert_eq!(ship.size_class(), ShipSize::Treasure);
    }

    #[test]
    fn test_loot_dice_by_size() {
        assert_eq!(ShipSize::Small.loot_die(), 6);
        assert_eq!(ShipSize::Medium.loot_die(), 8);
        assert_eq!(ShipSize::Treasure.loot_die(), 10);
    }

    #[test]
    fn test_repair_gated_by_loot() {
        let rules = Ruleset::default();
        let mut ship = GoblinShip::new("Tub", "story");
        ship.hull = 4;

        assert_eq!(
            ship.repair(&rules),
            Err(ActionError::InsufficientLoot { need: 10, have: 0 })
        );
        assert_eq!(ship.hull, 4);

        ship.loot = 12;
        ship.repair(&rules).unwrap();
        assert_eq!(ship.hull, ship.max_hull);
        assert_eq!(ship.loot, 2);
    }

    #[test]
    fn test_upgrade_costs_and_applies() {
        let rules = Ruleset::default();
        let mut ship = GoblinShip::new("Tub", "story");
        ship.loot = 25;

        ship.upgrade(ShipStat::Cannons, &rules).unwrap();
        assert_eq!(ship.cannons, 2);
        assert_eq!(ship.loot, 5);

        assert!(ship.upgrade(ShipStat::Speed, &rules).is_err());
        assert_eq!(ship.speed, 1);
    }

    #[test]
    fn test_hull_upgrade_raises_current_and_max() {
        let rules = Ruleset::default();
        let mut ship = GoblinShip::new("Tub", "story");
        ship.loot = 20;
        ship.upgrade(ShipStat::Hull, &rules).unwrap();
        assert_eq!(ship.max_hull, 21);
        assert_eq!(ship.hull, 21);
    }

    #[test]
    fn test_target_ship_construction() {
        let rules = Ruleset::default();
        let ship = TargetShip::new(8, "A mighty warship with golden trim", &rules);
        assert_eq!(ship.hull, 8);
        assert!(!ship.boardable);
        assert!(!ship.escaped);
        assert!(!ship.is_defeated());
    }

    #[test]
    fn test_target_ship_hull_floor() {
        let rules = Ruleset::default();
        let ship = TargetShip::new(2, "A leaky dinghy", &rules);
        assert_eq!(ship.hull, 5);
    }

    #[test]
    fn test_target_ship_hull_multiplier() {
        let rules = Ruleset {
            hull_multiplier: 3,
            ..Ruleset::default()
        };
        let ship = TargetShip::new(8, "A fortress on waves", &rules);
        assert_eq!(ship.hull, 24);
    }
}
