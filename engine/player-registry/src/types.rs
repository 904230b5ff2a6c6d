use crate::error::{RegistryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Fantasy position a player is rostered at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    /// Every position, in display order
    pub const ALL: [Position; 6] =
        [Position::QB, Position::RB, Position::WR, Position::TE, Position::K, Position::DEF];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        }
    }

    /// Parse a provider position code.
    ///
    /// Trailing depth-chart digits are dropped ("WR1" -> WR) and the common
    /// kicker/defense aliases are accepted.
    pub fn parse(code: &str) -> Result<Self> {
        let upper = code.trim().to_uppercase();
        let base = upper.trim_end_matches(|c: char| c.is_ascii_digit());

        match base {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" | "PK" => Ok(Position::K),
            "DEF" | "DST" | "D/ST" => Ok(Position::DEF),
            _ => Err(RegistryError::InvalidPosition(code.to_string())),
        }
    }

    /// Whether a player at this position may fill a FLEX slot
    pub fn is_flex_eligible(&self, superflex: bool) -> bool {
        match self {
            Position::RB | Position::WR | Position::TE => true,
            Position::QB => superflex,
            Position::K | Position::DEF => false,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Position {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Position::parse(s)
    }
}

impl TryFrom<String> for Position {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self> {
        Position::parse(&value)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

/// League scoring format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoringFormat {
    Standard,
    #[default]
    Ppr,
    HalfPpr,
}

impl ScoringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringFormat::Standard => "standard",
            ScoringFormat::Ppr => "ppr",
            ScoringFormat::HalfPpr => "half-ppr",
        }
    }

    pub fn parse(key: &str) -> Result<Self> {
        match key.trim().to_lowercase().as_str() {
            "standard" | "std" => Ok(ScoringFormat::Standard),
            "ppr" => Ok(ScoringFormat::Ppr),
            "half-ppr" | "half_ppr" | "halfppr" | "half" => Ok(ScoringFormat::HalfPpr),
            _ => Err(RegistryError::UnsupportedScoringFormat(key.to_string())),
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ScoringFormat {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        ScoringFormat::parse(s)
    }
}

impl TryFrom<String> for ScoringFormat {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self> {
        ScoringFormat::parse(&value)
    }
}

impl From<ScoringFormat> for String {
    fn from(format: ScoringFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Granular season stat line, used when a provider ships raw stats instead
/// of a fantasy point total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub interceptions: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub fumbles_lost: f64,
    pub two_point_conversions: f64,
    pub field_goals_made: f64,
    pub extra_points_made: f64,
    pub sacks: f64,
    pub defensive_interceptions: f64,
    pub fumble_recoveries: f64,
    pub defensive_tds: f64,
    pub safeties: f64,
}

/// A player's season projection as delivered by the acquisition layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjection {
    /// Stable identity: provider id when available, otherwise the name
    #[serde(alias = "player_id")]
    pub key: String,
    /// Display name (e.g., "Josh Allen")
    #[serde(default)]
    pub name: Option<String>,
    /// Position, normalized on deserialization
    pub position: Position,
    /// Team abbreviation (e.g., "BUF")
    #[serde(default)]
    pub team: String,
    /// Projected fantasy points for the season
    #[serde(default)]
    pub projected_points: Option<f64>,
    #[serde(default)]
    pub stats: Option<StatLine>,
    #[serde(default)]
    pub bye_week: Option<u32>,
}

impl PlayerProjection {
    pub fn new(
        key: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        projected_points: Option<f64>,
    ) -> Self {
        Self {
            key: key.into(),
            name: None,
            position,
            team: team.into(),
            projected_points,
            stats: None,
            bye_week: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name used for display and fuzzy lookups; falls back to the key
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// Projected points if present and finite
    pub fn usable_points(&self) -> Option<f64> {
        self.projected_points.filter(|points| points.is_finite())
    }
}

/// Container for a season's worth of projections, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSet {
    /// Season year
    pub season: String,
    /// When this data was last updated
    pub last_updated: DateTime<Utc>,
    pub players: Vec<PlayerProjection>,
}

impl ProjectionSet {
    pub fn new(season: impl Into<String>, players: Vec<PlayerProjection>) -> Self {
        Self { season: season.into(), last_updated: Utc::now(), players }
    }

    /// Load a projection set from a JSON file
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        tracing::info!("Loading projections from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let set: ProjectionSet = serde_json::from_str(&json_content)?;

        tracing::info!("Loaded {} projections for season {}", set.players.len(), set.season);
        Ok(set)
    }

    /// Write the projection set as pretty JSON
    pub async fn save_to_file<P: AsRef<Path>>(&self, file_path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&file_path, json).await?;
        Ok(())
    }
}
