//! Combat resolution for ship-to-ship exchanges and boarding actions.
//!
//! Both resolutions pit an attack roll against the target's defense, but the
//! damage rules differ on purpose: ship combat subtracts the *rolled* defense
//! from the attack, while boarding subtracts the target's *raw difficulty*.
//! The table played it that way, so the asymmetry is kept rather than
//! papered over.

use serde::{Deserialize, Serialize};

use crate::entities::{PlayerCharacter, StatKind, TargetShip};
use crate::mechanics::Dice;
use crate::ruleset::Ruleset;

/// Outcome of one ship-to-ship attack, kept for narration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipAttackOutcome {
    pub attack_roll: u32,
    pub defense_roll: u32,
    pub damage: u32,
    pub critical: bool,
    pub escaped: bool,
    pub boardable: bool,
}

/// Resolve one round of ship-to-ship combat.
///
/// Attack = 2d6 + cannons; defense = 2d6 + difficulty/4. A defense roll at or
/// above the escape threshold lets the target slip away untouched. Otherwise
/// a critical attack deals flat damage, and any other attack deals the margin
/// over the defense roll. Hull at or below the boardable threshold opens the
/// target to boarding.
pub fn resolve_ship_attack(
    cannons: u32,
    target: &mut TargetShip,
    dice: &mut dyn Dice,
    rules: &Ruleset,
) -> ShipAttackOutcome {
    let attack_roll = dice.roll_check() + cannons;
    let defense_roll = dice.roll_check() + target.difficulty / 4;

    if defense_roll >= rules.escape_threshold {
        target.escaped = true;
        return ShipAttackOutcome {
            attack_roll,
            defense_roll,
            damage: 0,
            critical: false,
            escaped: true,
            boardable: false,
        };
    }

    let critical = attack_roll >= rules.critical_threshold;
    let damage = if critical {
        rules.critical_damage
    } else {
        attack_roll.saturating_sub(defense_roll)
    };

    target.hull = target.hull.saturating_sub(damage);
    if target.hull <= rules.boardable_threshold {
        target.boardable = true;
    }

    ShipAttackOutcome {
        attack_roll,
        defense_roll,
        damage,
        critical,
        escaped: false,
        boardable: target.boardable,
    }
}

/// Outcome of one goblin's boarding action, kept for narration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoardingOutcome {
    pub attack_roll: u32,
    pub defender_roll: u32,
    pub best_stat: StatKind,
    pub best_stat_value: u8,
    pub damage: u32,
    pub attacker_slain: bool,
}

/// Resolve one goblin's boarding action.
///
/// Attack = 2d6 + best stat; defender = 2d6 + difficulty/4. A defender roll
/// at or above the escape threshold fells the attacking goblin instead of
/// dealing damage. Otherwise damage is the attack's margin over the raw
/// difficulty (see module docs on the asymmetry).
pub fn resolve_boarding(
    goblin: &mut PlayerCharacter,
    target: &mut TargetShip,
    dice: &mut dyn Dice,
    rules: &Ruleset,
) -> BoardingOutcome {
    let (best_stat, best_stat_value) = goblin.best_stat();
    let attack_roll = dice.roll_check() + u32::from(best_stat_value);
    let defender_roll = dice.roll_check() + target.difficulty / 4;

    if defender_roll >= rules.escape_threshold {
        goblin.living = false;
        return BoardingOutcome {
            attack_roll,
            defender_roll,
            best_stat,
            best_stat_value,
            damage: 0,
            attacker_slain: true,
        };
    }

    let damage = attack_roll.saturating_sub(target.difficulty);
    target.hull = target.hull.saturating_sub(damage);

    BoardingOutcome {
        attack_roll,
        defender_roll,
        best_stat,
        best_stat_value,
        damage,
        attacker_slain: false,
    }
}

/// Translate a 2d6 spy roll into a target difficulty.
///
/// 10+ finds an especially rich target (8-12), 7+ an average ship (5-7), and
/// anything lower a weak ship that might be an ambush (2, 3, 4, or 12).
pub fn scout_difficulty(spy_roll: u32, dice: &mut dyn Dice) -> u32 {
    if spy_roll >= 10 {
        7 + dice.roll(5)
    } else if spy_roll >= 7 {
        4 + dice.roll(3)
    } else {
        const AMBUSH_TABLE: [u32; 4] = [2, 3, 4, 12];
        AMBUSH_TABLE[(dice.roll(4) - 1) as usize]
    }
}
