use crate::grade::LetterGrade;
use player_registry::{Position, RosterPlayer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGrade {
    pub position: Position,
    pub score: f64,
    pub grade: LetterGrade,
    /// Sum of the VORP of every rostered player at the position
    pub vorp_total: f64,
    /// Depth credit: positive VORP behind the top player, decaying by depth
    pub erla_score: f64,
    pub platoon_gain: f64,
    pub player_count: usize,
    /// Players with no VORP record; counted as 0
    pub unmatched_players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallGrade {
    /// Final score, rounded to two decimals
    pub score: f64,
    pub grade: LetterGrade,
    /// Weighted mean of active position scores
    pub normalized_score: f64,
    /// Non-positive; larger in magnitude when position scores are uneven
    pub balance_penalty: f64,
    pub total_weight: f64,
}

impl OverallGrade {
    /// Grade for a roster that could not be graded at all
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            grade: LetterGrade::F,
            normalized_score: 0.0,
            balance_penalty: 0.0,
            total_weight: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecommendation {
    pub priority: Priority,
    pub position: Option<Position>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGrade {
    pub overall: OverallGrade,
    pub position_grades: BTreeMap<Position, PositionGrade>,
    /// Startable depth per position across the league
    pub replacement_baselines: BTreeMap<Position, f64>,
    pub recommendations: Vec<GradeRecommendation>,
    pub warnings: Vec<String>,
}

/// A team submitted for league grading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    #[serde(alias = "teamName")]
    pub team_name: String,
    #[serde(default)]
    pub roster: Vec<RosterPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    /// 1 for the best overall score
    pub rank: usize,
    pub team_name: String,
    pub grade: TeamGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueReport {
    pub teams: Vec<RankedTeam>,
    /// Mean overall score, 0 for an empty league
    pub average_score: f64,
}

impl LeagueReport {
    pub fn team(&self, team_name: &str) -> Option<&RankedTeam> {
        self.teams.iter().find(|team| team.team_name == team_name)
    }
}
