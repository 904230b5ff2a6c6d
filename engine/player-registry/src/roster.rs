use crate::registry::RegistryEntry;
use crate::scoring::ScoringTable;
use crate::types::{Position, StatLine};
use serde::{Deserialize, Serialize};

/// VORP values attached to a rostered player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVorp {
    pub vorp_score: f64,
    pub normalized_vorp: f64,
}

/// One player on a fantasy team's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub projected_points: Option<f64>,
    #[serde(default)]
    pub stats: Option<StatLine>,
    #[serde(default)]
    pub vorp: Option<PlayerVorp>,
    #[serde(default)]
    pub bye_week: Option<u32>,
}

impl RosterPlayer {
    pub fn new(name: impl Into<String>, position: Position, projected_points: Option<f64>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            position,
            team: None,
            projected_points,
            stats: None,
            vorp: None,
            bye_week: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_stats(mut self, stats: StatLine) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_vorp(mut self, vorp_score: f64, normalized_vorp: f64) -> Self {
        self.vorp = Some(PlayerVorp { vorp_score, normalized_vorp });
        self
    }

    pub fn with_bye_week(mut self, week: u32) -> Self {
        self.bye_week = Some(week);
        self
    }

    /// Stable identity: id, then name, then the roster slot index
    pub fn key(&self, roster_index: usize) -> String {
        non_empty(self.id.as_deref())
            .or_else(|| non_empty(self.name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("player-{roster_index}"))
    }

    /// Name for display and fuzzy lookups, empty when the roster entry has none
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.id.as_deref())).unwrap_or("")
    }

    /// Projected points as given, else derived from the stat line, else 0
    pub fn resolve_points(&self, scoring: &ScoringTable) -> f64 {
        match (self.projected_points.filter(|p| p.is_finite()), &self.stats) {
            (Some(points), _) => points,
            (None, Some(stats)) => scoring.points_for(stats),
            (None, None) => 0.0,
        }
    }
}

impl RegistryEntry for RosterPlayer {
    fn lookup_name(&self) -> &str {
        self.display_name()
    }

    fn lookup_position(&self) -> Position {
        self.position
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
