//! League settings and scoring-model weights for grading

use crate::error::{GradeError, Result};
use lineup_optimizer::RosterSlotConfig;
use player_registry::{Position, ScoringFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Roster spots per team, bench included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSpots {
    pub qb: usize,
    pub rb: usize,
    pub wr: usize,
    pub te: usize,
    pub flex: usize,
    pub k: usize,
    pub def: usize,
    pub bench: usize,
}

impl Default for RosterSpots {
    fn default() -> Self {
        Self { qb: 1, rb: 2, wr: 2, te: 1, flex: 1, k: 1, def: 1, bench: 6 }
    }
}

impl RosterSpots {
    /// Dedicated starting spots for a position, FLEX excluded
    pub fn spots_for(&self, position: Position) -> usize {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::K => self.k,
            Position::DEF => self.def,
        }
    }
}

/// League settings that shape a team grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueGradingSettings {
    pub teams: usize,
    pub scoring: ScoringFormat,
    pub is_superflex: bool,
    pub is_te_premium: bool,
    pub include_k: bool,
    pub include_dst: bool,
    pub roster_spots: RosterSpots,
}

impl Default for LeagueGradingSettings {
    fn default() -> Self {
        Self {
            teams: 12,
            scoring: ScoringFormat::Ppr,
            is_superflex: false,
            is_te_premium: false,
            include_k: true,
            include_dst: true,
            roster_spots: RosterSpots::default(),
        }
    }
}

impl LeagueGradingSettings {
    /// Settings that mirror a lineup slot configuration.
    ///
    /// K and DEF count toward the grade only when the league starts them.
    pub fn from_slots(teams: usize, slots: &RosterSlotConfig) -> Self {
        Self {
            teams,
            scoring: slots.scoring,
            roster_spots: RosterSpots {
                qb: slots.qb,
                rb: slots.rb,
                wr: slots.wr,
                te: slots.te,
                flex: slots.flex,
                k: slots.k,
                def: slots.def,
                bench: RosterSpots::default().bench,
            },
            is_superflex: slots.superflex,
            is_te_premium: false,
            include_k: slots.k > 0,
            include_dst: slots.def > 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let starters: usize = Position::ALL.iter().map(|&p| self.roster_spots.spots_for(p)).sum();
        if starters + self.roster_spots.flex == 0 {
            return Err(GradeError::InvalidSettings(
                "roster spots must include at least one starter".to_string(),
            ));
        }
        Ok(())
    }
}

/// Share of league FLEX spots credited to each eligible position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexSplit {
    pub rb: f64,
    pub wr: f64,
    pub te: f64,
}

impl Default for FlexSplit {
    fn default() -> Self {
        Self { rb: 0.25, wr: 0.70, te: 0.05 }
    }
}

/// Weights of the grading model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingWeights {
    pub superflex_qb_multiplier: f64,
    pub te_premium_multiplier: f64,
    pub vorp_factor: f64,
    pub erla_factor: f64,
    pub platoon_factor: f64,
    /// ERLA weight for depth index i is max(erla_floor, 1 - erla_decay * i)
    pub erla_decay: f64,
    pub erla_floor: f64,
    pub platoon_scale: f64,
    /// Multiplier on the population std-dev of position scores
    pub balance_factor: f64,
    /// Spots past the league's starters that still count as startable
    pub replacement_buffer: usize,
    pub flex_split: FlexSplit,
    /// Share of each position in the overall grade before adjustments
    pub position_weights: BTreeMap<Position, f64>,
}

impl Default for GradingWeights {
    fn default() -> Self {
        let position_weights = [
            (Position::QB, 0.20),
            (Position::RB, 0.25),
            (Position::WR, 0.25),
            (Position::TE, 0.15),
            (Position::K, 0.05),
            (Position::DEF, 0.10),
        ]
        .into_iter()
        .collect();

        Self {
            position_weights,
            superflex_qb_multiplier: 1.5,
            te_premium_multiplier: 1.3,
            vorp_factor: 0.6,
            erla_factor: 0.3,
            platoon_factor: 0.1,
            erla_decay: 0.3,
            erla_floor: 0.1,
            platoon_scale: 0.1,
            flex_split: FlexSplit::default(),
            balance_factor: 0.5,
            replacement_buffer: 2,
        }
    }
}

impl GradingWeights {
    pub fn base_weight(&self, position: Position) -> f64 {
        self.position_weights.get(&position).copied().unwrap_or(0.0)
    }

    /// Overall-grade weight after league adjustments; 0 means inactive
    pub fn effective_weight(&self, position: Position, settings: &LeagueGradingSettings) -> f64 {
        let base = self.base_weight(position);
        match position {
            Position::QB if settings.is_superflex => base * self.superflex_qb_multiplier,
            Position::TE if settings.is_te_premium => base * self.te_premium_multiplier,
            Position::K if !settings.include_k => 0.0,
            Position::DEF if !settings.include_dst => 0.0,
            _ => base,
        }
    }

    /// Weight of the player at `index` in a position's depth chart
    pub fn erla_weight(&self, index: usize) -> f64 {
        (1.0 - self.erla_decay * index as f64).max(self.erla_floor)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((position, weight)) =
            self.position_weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(GradeError::InvalidWeights(format!(
                "weight for {position} must be a non-negative number, got {weight}"
            )));
        }
        if self.position_weights.values().sum::<f64>() <= 0.0 {
            return Err(GradeError::InvalidWeights(
                "at least one position needs a positive weight".to_string(),
            ));
        }
        Ok(())
    }
}
