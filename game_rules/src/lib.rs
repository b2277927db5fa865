//! # Game Rules
//!
//! The "World Bible" crate - contains all game rules, dice, and entity
//! definitions for the goblin pirate campaign. This crate is the single
//! source of truth for game mechanics and does not contain any AI logic.

pub mod entities;
pub mod mechanics;
pub mod ruleset;

pub use entities::*;
pub use mechanics::*;
pub use ruleset::*;
