//! Fantasy scoring tables
//!
//! Converts a raw stat line into fantasy points for a scoring format. The
//! formats differ only in what a reception is worth.

use crate::types::{ScoringFormat, StatLine};
use serde::{Deserialize, Serialize};

/// Points awarded per unit of each stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub format: ScoringFormat,
    pub passing_yard: f64,
    pub passing_td: f64,
    pub interception: f64,
    pub rushing_yard: f64,
    pub rushing_td: f64,
    pub reception: f64,
    pub receiving_yard: f64,
    pub receiving_td: f64,
    pub fumble_lost: f64,
    pub two_point_conversion: f64,
    pub field_goal: f64,
    pub extra_point: f64,
    pub sack: f64,
    pub defensive_interception: f64,
    pub fumble_recovery: f64,
    pub defensive_td: f64,
    pub safety: f64,
}

impl ScoringTable {
    pub fn for_format(format: ScoringFormat) -> Self {
        let reception = match format {
            ScoringFormat::Standard => 0.0,
            ScoringFormat::Ppr => 1.0,
            ScoringFormat::HalfPpr => 0.5,
        };

        Self {
            format,
            passing_yard: 0.04, // 1 point per 25 yards
            passing_td: 4.0,
            interception: -2.0,
            rushing_yard: 0.1,
            rushing_td: 6.0,
            reception,
            receiving_yard: 0.1,
            receiving_td: 6.0,
            fumble_lost: -2.0,
            two_point_conversion: 2.0,
            field_goal: 3.0,
            extra_point: 1.0,
            sack: 1.0,
            defensive_interception: 2.0,
            fumble_recovery: 2.0,
            defensive_td: 6.0,
            safety: 2.0,
        }
    }

    /// Fantasy points for a stat line
    pub fn points_for(&self, stats: &StatLine) -> f64 {
        stats.passing_yards * self.passing_yard
            + stats.passing_tds * self.passing_td
            + stats.interceptions * self.interception
            + stats.rushing_yards * self.rushing_yard
            + stats.rushing_tds * self.rushing_td
            + stats.receptions * self.reception
            + stats.receiving_yards * self.receiving_yard
            + stats.receiving_tds * self.receiving_td
            + stats.fumbles_lost * self.fumble_lost
            + stats.two_point_conversions * self.two_point_conversion
            + stats.field_goals_made * self.field_goal
            + stats.extra_points_made * self.extra_point
            + stats.sacks * self.sack
            + stats.defensive_interceptions * self.defensive_interception
            + stats.fumble_recoveries * self.fumble_recovery
            + stats.defensive_tds * self.defensive_td
            + stats.safeties * self.safety
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::for_format(ScoringFormat::default())
    }
}
