//! Pure game and companion logic for Spirit Sanctuary.
//!
//! This crate contains all logic that is independent of the ECS, renderer,
//! or host platform. Functions take plain data and return results, making
//! them unit-testable and portable across the ECS session, the C FFI, and
//! the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ar`] | Tap-to-place overlay for the simulated AR view |
//! | [`companion`] | Spirit profile, moods, touch reactions, cosmetic timers |
//! | [`config`] | `GameConfig` tunables and validation |
//! | [`constants`] | Play area, speeds, spawn layout, scoring |
//! | [`flight`] | Proximity, forward advance, spawn rows, difficulty boundaries |
//! | [`movement`] | Drag input scaled and clamped to the play area |
//! | [`navigation`] | Route names and the stack navigator |
//! | [`session`] | Idle / Running / Over lifecycle |

pub mod ar;
pub mod companion;
pub mod config;
pub mod constants;
pub mod flight;
pub mod movement;
pub mod navigation;
pub mod session;
