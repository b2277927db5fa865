//! Dice rolling behind a trait so combat can be driven by scripted rolls in
//! tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::entities::ShipSize;

/// Source of dice rolls for checks and loot.
pub trait Dice {
    /// Roll a single die with the given number of sides, returning 1..=sides.
    fn roll(&mut self, sides: u32) -> u32;

    /// The standard 2d6 check roll, range 2-12.
    fn roll_check(&mut self) -> u32 {
        self.roll(6) + self.roll(6)
    }

    /// Roll the loot die for a ship size class.
    fn roll_loot(&mut self, size: ShipSize) -> u32 {
        self.roll(size.loot_die())
    }
}

/// The table's actual dice.
#[derive(Debug)]
pub struct DiceRoller {
    rng: SmallRng,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded roller for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for DiceRoller {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_in_range() {
        let mut dice = DiceRoller::seeded(42);
        for _ in 0..200 {
            let roll = dice.roll(6);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_check_roll_range() {
        let mut dice = DiceRoller::seeded(42);
        for _ in 0..200 {
            let roll = dice.roll_check();
            assert!((2..=12).contains(&roll));
        }
    }

    #[test]
    fn test_loot_roll_respects_die_size() {
        let mut dice = DiceRoller::seeded(42);
        for _ in 0..200 {
            assert!((1..=6).contains(&dice.roll_loot(ShipSize::Small)));
            assert!((1..=8).contains(&dice.roll_loot(ShipSize::Medium)));
            assert!((1..=10).contains(&dice.roll_loot(ShipSize::Treasure)));
        }
    }

    #[test]
    fn test_seeded_roller_is_reproducible() {
        let mut a = DiceRoller::seeded(7);
        let mut b = DiceRoller::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.roll_check(), b.roll_check());
        }
    }
}
