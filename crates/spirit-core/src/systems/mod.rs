//! Systems - logic that operates on components

mod player;
mod obstacles;
mod collectibles;
mod difficulty;

pub use player::*;
pub use obstacles::*;
pub use collectibles::*;
pub use difficulty::*;
