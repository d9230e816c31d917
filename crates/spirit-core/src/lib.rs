//! Spirit Core - Spirit Flight Game Session
//!
//! The mini-game of the Spirit Sanctuary companion app: the player's spirit
//! guide flies down a corridor dodging obstacles and collecting orbs, with a
//! new obstacle added every ten seconds.
//!
//! # Architecture
//!
//! The session uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Obstacles and collectibles, recycled in place
//! - **Components**: Pure data attached to entities (Position, Obstacle, Collectible)
//! - **Systems**: Per-tick logic that queries and updates components
//!
//! Rules that need no ECS (clamping, proximity, lifecycle) live in
//! `spirit-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use spirit_core::prelude::*;
//!
//! let mut session = GameSession::new();
//! session.start().expect("fresh session starts");
//!
//! // Frame loop
//! while session.state() == SessionState::Running {
//!     session.push_drag(1.0, 0.0);
//!     session.tick(1.0 / 60.0); // 60 FPS
//! }
//! println!("final score {}", session.score());
//! ```

pub mod components;
pub mod systems;
pub mod generation;
pub mod engine;
pub mod scene;
pub mod host;
pub mod screens;
pub mod config;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{GameSession, SessionError, TickReport};
    pub use crate::scene::SceneFrame;
    pub use spirit_logic::config::GameConfig;
    pub use spirit_logic::session::SessionState;
}
