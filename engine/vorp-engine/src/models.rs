use chrono::{DateTime, Utc};
use player_registry::{PlayerRegistry, Position, RegistryEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Replacement-level baseline for one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBaseline {
    pub position: Position,
    /// Median of the pooled projections, 0 when nothing could be pooled
    pub baseline: f64,
    /// Number of projections that went into the median
    pub pool_size: usize,
    /// Players at this position that carried a usable projection
    pub available: usize,
}

/// Value over replacement for a single player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VorpRecord {
    pub player_key: String,
    pub player_name: String,
    pub position: Position,
    pub team: String,
    pub projected_points: f64,
    pub baseline: f64,
    /// projected_points - baseline
    pub vorp_score: f64,
    /// League-wide min-max normalization into [0, 100]
    pub normalized_vorp: f64,
}

impl RegistryEntry for VorpRecord {
    fn lookup_name(&self) -> &str {
        &self.player_name
    }

    fn lookup_position(&self) -> Position {
        self.position
    }
}

/// How the normalized scores were produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationInfo {
    pub method: String,
    pub min_vorp: f64,
    pub max_vorp: f64,
    /// True when every score was equal (or there were none) and all players
    /// received the midpoint
    pub degenerate: bool,
}

/// Output of one VORP run over a projection set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VorpCalculation {
    pub records: Vec<VorpRecord>,
    pub baselines: BTreeMap<Position, PositionBaseline>,
    pub normalization: NormalizationInfo,
    /// Players left out for lack of a projection or baseline
    pub skipped_players: usize,
    pub warnings: Vec<String>,
}

impl VorpCalculation {
    /// Find a record by player key
    pub fn find(&self, player_key: &str) -> Option<&VorpRecord> {
        self.records.iter().find(|record| record.player_key == player_key)
    }

    /// Top N records at a position by VORP score
    pub fn top_by_position(&self, position: Position, limit: usize) -> Vec<&VorpRecord> {
        let mut records: Vec<&VorpRecord> =
            self.records.iter().filter(|record| record.position == position).collect();
        records.sort_by(|a, b| b.vorp_score.total_cmp(&a.vorp_score));
        records.truncate(limit);
        records
    }

    /// Name-indexed lookup table over the records
    pub fn into_registry(self) -> PlayerRegistry<VorpRecord> {
        PlayerRegistry::from_entries(self.records)
    }
}

/// Per-position summary carried in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    pub player_count: usize,
    pub pool_size: usize,
    pub baseline: f64,
    pub average_vorp: f64,
    pub max_vorp: f64,
    pub min_vorp: f64,
}

/// Dated, self-describing VORP output handed to reporting layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VorpSnapshot {
    pub season: i32,
    pub generated_at: DateTime<Utc>,
    pub total_players: usize,
    pub skipped_players: usize,
    pub position_stats: BTreeMap<Position, PositionStats>,
    pub normalization_info: NormalizationInfo,
    pub warnings: Vec<String>,
    pub records: Vec<VorpRecord>,
}

impl VorpSnapshot {
    pub fn registry(&self) -> PlayerRegistry<VorpRecord> {
        PlayerRegistry::from_entries(self.records.iter().cloned())
    }
}
