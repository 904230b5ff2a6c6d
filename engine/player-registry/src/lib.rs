//! Player Registry - shared player model and name reconciliation
//!
//! This crate holds the records every valuation engine consumes (positions,
//! scoring formats, projections, roster entries) and the single fuzzy name
//! matcher used to reconcile players across sources that do not share ids.

pub mod error;
pub mod matching;
pub mod registry;
pub mod roster;
pub mod scoring;
pub mod types;

pub use error::{RegistryError, Result};
pub use matching::{normalize_name, MatchKind, NameMatch};
pub use registry::{PlayerRegistry, RegistryEntry};
pub use roster::{PlayerVorp, RosterPlayer};
pub use scoring::ScoringTable;
pub use types::{PlayerProjection, Position, ProjectionSet, ScoringFormat, StatLine};
