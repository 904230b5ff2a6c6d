use crate::error::{LineupError, Result};
use crate::models::SlotKind;
use player_registry::{Position, ScoringFormat};
use serde::{Deserialize, Serialize};

/// Starting slot counts for a league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSlotConfig {
    pub qb: usize,
    pub rb: usize,
    pub wr: usize,
    pub te: usize,
    pub flex: usize,
    pub k: usize,
    pub def: usize,
    /// FLEX also accepts quarterbacks
    pub superflex: bool,
    pub scoring: ScoringFormat,
}

impl Default for RosterSlotConfig {
    fn default() -> Self {
        Self {
            qb: 1,
            rb: 2,
            wr: 2,
            te: 1,
            flex: 1,
            k: 1,
            def: 1,
            superflex: false,
            scoring: ScoringFormat::Ppr,
        }
    }
}

impl RosterSlotConfig {
    /// Required (non-FLEX) slots for a position
    pub fn slots_for(&self, position: Position) -> usize {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::K => self.k,
            Position::DEF => self.def,
        }
    }

    pub fn slots_for_kind(&self, slot: SlotKind) -> usize {
        match slot.position() {
            Some(position) => self.slots_for(position),
            None => self.flex,
        }
    }

    pub fn total_starters(&self) -> usize {
        Position::ALL.iter().map(|&p| self.slots_for(p)).sum::<usize>() + self.flex
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_starters() == 0 {
            return Err(LineupError::InvalidSlotConfig(
                "at least one starting slot is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slots() {
        let config = RosterSlotConfig::default();
        assert_eq!(config.total_starters(), 9);
        assert_eq!(config.slots_for(Position::RB), 2);
        assert_eq!(config.slots_for_kind(SlotKind::Flex), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_rejected() {
        let config = RosterSlotConfig {
            qb: 0,
            rb: 0,
            wr: 0,
            te: 0,
            flex: 0,
            k: 0,
            def: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(LineupError::InvalidSlotConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RosterSlotConfig =
            serde_json::from_str(r#"{"wr":3,"superflex":true,"scoring":"half-ppr"}"#).unwrap();
        assert_eq!(config.wr, 3);
        assert_eq!(config.rb, 2);
        assert!(config.superflex);
        assert_eq!(config.scoring, ScoringFormat::HalfPpr);
    }

    #[test]
    fn test_unsupported_scoring_rejected() {
        let result = serde_json::from_str::<RosterSlotConfig>(r#"{"scoring":"tep-6pt"}"#);
        assert!(result.is_err());
    }
}
