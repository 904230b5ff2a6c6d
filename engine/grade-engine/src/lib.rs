//! # Grade Engine
//!
//! Grades a fantasy roster per position and overall. Each position is scored
//! from the value over replacement of its players plus a decaying credit for
//! depth; the overall grade is a league-weighted mean of position scores,
//! penalized when those scores are uneven.
//!
//! Reference data (VORP records, bye weeks) lives in an immutable
//! [`GradingContext`] that many grading calls share.

pub mod baselines;
pub mod batch;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod grade;
pub mod models;


pub use baselines::replacement_baselines;
pub use batch::{grade_league, grade_league_with};
pub use config::{FlexSplit, GradingWeights, LeagueGradingSettings, RosterSpots};
pub use context::GradingContext;
pub use engine::{GradeEngine, EMPTY_ROSTER_WARNING};
pub use error::{GradeError, Result};
pub use grade::{score_to_grade, LetterGrade, GRADE_THRESHOLDS};
pub use models::{
    GradeRecommendation, LeagueReport, OverallGrade, PositionGrade, Priority, RankedTeam,
    TeamGrade, TeamRoster,
};
