//! Goblin character definitions.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EntityId;

/// Total points a freshly created goblin distributes across its stats.
pub const STAT_POINT_POOL: u8 = 3;

/// Cap for any single stat.
pub const STAT_MAX: u8 = 3;

/// The three goblin aptitudes, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Strength,
    Cunning,
    Marksmanship,
}

impl StatKind {
    /// All stats in tie-break order.
    pub const ALL: [StatKind; 3] = [
        StatKind::Strength,
        StatKind::Cunning,
        StatKind::Marksmanship,
    ];
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatKind::Strength => "Strength",
            StatKind::Cunning => "Cunning",
            StatKind::Marksmanship => "Marksmanship",
        };
        write!(f, "{}", name)
    }
}

/// Error raised when a stat triple violates creation invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("stat {0} exceeds the per-stat cap of {STAT_MAX}")]
    StatOverCap(StatKind),
    #[error("stats must total exactly {STAT_POINT_POOL}, got {0}")]
    BadTotal(u8),
}

/// A goblin's stat triple. Invariant: each stat is 0-3 and they total 3.
/// Deserialization runs the same checks, so a serialized triple cannot smuggle
/// in an invalid block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStatBlock")]
pub struct StatBlock {
    pub strength: u8,
    pub cunning: u8,
    pub marksmanship: u8,
}

/// Unvalidated wire form of [`StatBlock`].
#[derive(Deserialize)]
struct RawStatBlock {
    strength: u8,
    cunning: u8,
    marksmanship: u8,
}

impl TryFrom<RawStatBlock> for StatBlock {
    type Error = StatError;

    fn try_from(raw: RawStatBlock) -> Result<Self, StatError> {
        Self::new(raw.strength, raw.cunning, raw.marksmanship)
    }
}

impl StatBlock {
    /// Create a stat block, validating the creation invariants.
    pub fn new(strength: u8, cunning: u8, marksmanship: u8) -> Result<Self, StatError> {
        let block = Self {
            strength,
            cunning,
            marksmanship,
        };
        block.validate()?;
        Ok(block)
    }

    /// Check the creation invariants: each stat 0-3, total exactly 3.
    pub fn validate(&self) -> Result<(), StatError> {
        for kind in StatKind::ALL {
            if self.get(kind) > STAT_MAX {
                return Err(StatError::StatOverCap(kind));
            }
        }
        let total = self.strength + self.cunning + self.marksmanship;
        if total != STAT_POINT_POOL {
            return Err(StatError::BadTotal(total));
        }
        Ok(())
    }

    /// The "unbalanced goblin" fallback: the values {0, 1, 2} assigned to the
    /// three stats in random order.
    pub fn unbalanced<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values = [2u8, 1, 0];
        values.shuffle(rng);
        Self {
            strength: values[0],
            cunning: values[1],
            marksmanship: values[2],
        }
    }

    /// Value of a single stat.
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Cunning => self.cunning,
            StatKind::Marksmanship => self.marksmanship,
        }
    }

    /// The goblin's best stat, ties broken by strength, then cunning.
    pub fn best(&self) -> (StatKind, u8) {
        let mut best = (StatKind::Strength, self.strength);
        for kind in [StatKind::Cunning, StatKind::Marksmanship] {
            if self.get(kind) > best.1 {
                best = (kind, self.get(kind));
            }
        }
        best
    }
}

/// A player-controlled goblin pirate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCharacter {
    pub id: EntityId,
    pub name: String,
    pub origin_story: String,
    pub stats: StatBlock,
    /// Flavor-text item generated per character; purely narrative.
    pub signature_loot: String,
    /// Starts true; set false when a boarding defense roll fells the goblin.
    pub living: bool,
}

impl PlayerCharacter {
    /// Create a new living goblin.
    pub fn new(
        name: impl Into<String>,
        origin_story: impl Into<String>,
        stats: StatBlock,
        signature_loot: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            origin_story: origin_story.into(),
            stats,
            signature_loot: signature_loot.into(),
            living: true,
        }
    }

    /// The goblin's best stat, used for boarding combat.
    pub fn best_stat(&self) -> (StatKind, u8) {
        self.stats.best()
    }

    /// Human-readable character sheet.
    pub fn summary(&self) -> String {
        format!(
            "Name: {}\nOrigin Story: {}\nStrength: {}\nCunning: {}\nMarksmanship: {}\nSignature Loot: {}",
            self.name,
            self.origin_story,
            self.stats.strength,
            self.stats.cunning,
            self.stats.marksmanship,
            self.signature_loot
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_valid_stat_block() {
        let stats = StatBlock::new(2, 1, 0).unwrap();
        assert_eq!(stats.strength + stats.cunning + stats.marksmanship, 3);
    }

    #[test]
    fn test_stat_block_rejects_bad_total() {
        assert_eq!(StatBlock::new(1, 1, 0), Err(StatError::BadTotal(2)));
        assert_eq!(StatBlock::new(2, 1, 1), Err(StatError::BadTotal(4)));
    }

    #[test]
    fn test_stat_block_rejects_over_cap() {
        // Over-cap is reported before the total, even though both fail.
        assert_eq!(
            StatBlock::new(4, 0, 0),
            Err(StatError::StatOverCap(StatKind::Strength))
        );
    }

    #[test]
    fn test_deserialization_rejects_invalid_triple() {
        let overloaded = r#"{"strength":3,"cunning":3,"marksmanship":3}"#;
        assert!(serde_json::from_str::<StatBlock>(overloaded).is_err());

        let over_cap = r#"{"strength":4,"cunning":0,"marksmanship":0}"#;
        assert!(serde_json::from_str::<StatBlock>(over_cap).is_err());

        let valid: StatBlock = serde_json::from_str(r#"{"strength":2,"cunning":1,"marksmanship":0}"#).unwrap();
        assert_eq!(valid, StatBlock::new(2, 1, 0).unwrap());
    }

    #[test]
    fn test_unbalanced_is_always_two_one_zero() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..64 {
            let stats = StatBlock::unbalanced(&mut rng);
            let mut values = [stats.strength, stats.cunning, stats.marksmanship];
            values.sort_unstable();
            assert_eq!(values, [0, 1, 2]);
            assert!(stats.validate().is_ok());
        }
    }

    #[test]
    fn test_best_stat_tie_break() {
        let stats = StatBlock::new(1, 1, 1).unwrap();
        assert_eq!(stats.best(), (StatKind::Strength, 1));

        let stats = StatBlock::new(0, 1, 2).unwrap();
        assert_eq!(stats.best(), (StatKind::Marksmanship, 2));

        let stats = StatBlock::new(0, 2, 1).unwrap();
        assert_eq!(stats.best(), (StatKind::Cunning, 2));
    }

    #[test]
    fn test_new_character_is_living() {
        let goblin = PlayerCharacter::new(
            "Grimtooth",
            "Wrestled a crocodile",
            StatBlock::new(2, 1, 0).unwrap(),
            "A rusty cutlass that whispers pirate shanties",
        );
        assert!(goblin.living);
        assert!(goblin.summary().contains("Grimtooth"));
        assert!(goblin.summary().contains("Signature Loot"));
    }
}
