//! Simulation core for a single-screen boss-rush shooter.
//!
//! The crate is split the same way the game loop runs: plain entity data
//! (`entities`), per-entity movement (`motion`), the boss attack patterns
//! (`patterns`), the per-tick combat pass (`compute`), level progression
//! (`progression`) and the phase machine that drives them (`state`).
//! Rendering and input live in the binary; music sits behind `audio`.

pub mod audio;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod patterns;
pub mod progression;
pub mod state;

pub use error::GameError;
