//! VORP Engine
//!
//! Derives a replacement-level baseline per position from a league-wide set of
//! season projections and scores every player as value over that baseline.
//! Scores are also min-max normalized across all positions at once so a
//! running back and a tight end can be compared directly.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use calculator::{median, VorpCalculator};
pub use config::VorpConfig;
pub use engine::VorpEngine;
pub use error::{Result, VorpError};
pub use models::*;
