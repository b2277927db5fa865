//! Game mechanics: dice and combat resolution.

mod combat;
mod dice;

pub use combat::*;
pub use dice::*;
