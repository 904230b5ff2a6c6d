//! Lineup Optimizer
//!
//! Builds a team's starting lineup under a league's slot rules: required
//! slots are filled greedily by projected points, then FLEX takes the best of
//! what is left. The result carries the bench, point totals, and a set of
//! rule-based diagnostics.

pub mod analysis;
pub mod comparison;
pub mod config;
pub mod error;
pub mod models;
pub mod optimizer;

pub use analysis::{
    FlexSummary, LineupAnalysis, LineupRecommendation, PositionSummary, RecommendationKind,
    VorpHighlight,
};
pub use comparison::{compare_lineups, ComparisonSide, LineupComparison};
pub use config::RosterSlotConfig;
pub use error::{LineupError, Result};
pub use models::{Lineup, LineupPlayer, OptimalLineup, SlotKind};
pub use optimizer::LineupOptimizer;
