//! Tunable rule constants, overridable from configuration.

use serde::{Deserialize, Serialize};

/// Combat and economy constants. Defaults reproduce the table rules; the
/// hull multiplier resolves the prototype's conflicting 1x/3x hull scaling
/// as an explicit knob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    /// Target hull = max(5, difficulty * hull_multiplier).
    pub hull_multiplier: u32,

    /// Target hull at or below this is open to boarding.
    pub boardable_threshold: u32,

    /// Defense roll at or above this lets the target escape, or fells the
    /// attacking goblin during boarding.
    pub escape_threshold: u32,

    /// Attack roll at or above this is a critical hit in ship combat.
    pub critical_threshold: u32,

    /// Flat damage dealt by a critical hit.
    pub critical_damage: u32,

    /// Loot cost to repair the hull to maximum.
    pub repair_cost: u32,

    /// Loot cost to train the crew.
    pub train_cost: u32,

    /// Loot cost to upgrade one ship attribute.
    pub upgrade_cost: u32,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            hull_multiplier: 1,
            boardable_threshold: 5,
            escape_threshold: 12,
            critical_threshold: 12,
            critical_damage: 3,
            repair_cost: 10,
            train_cost: 5,
            upgrade_cost: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs() {
        let rules = Ruleset::default();
        assert_eq!(rules.repair_cost, 10);
        assert_eq!(rules.train_cost, 5);
        assert_eq!(rules.upgrade_cost, 20);
        assert_eq!(rules.hull_multiplier, 1);
    }
}
