use crate::analysis::LineupAnalysis;
use player_registry::{PlayerVorp, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A starting slot in a lineup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotKind {
    Qb,
    Rb,
    Wr,
    Te,
    Flex,
    K,
    Def,
}

impl SlotKind {
    /// Slots in fill order
    pub const ALL: [SlotKind; 7] = [
        SlotKind::Qb,
        SlotKind::Rb,
        SlotKind::Wr,
        SlotKind::Te,
        SlotKind::Flex,
        SlotKind::K,
        SlotKind::Def,
    ];

    /// The position a required slot holds; `None` for FLEX
    pub fn position(&self) -> Option<Position> {
        match self {
            SlotKind::Qb => Some(Position::QB),
            SlotKind::Rb => Some(Position::RB),
            SlotKind::Wr => Some(Position::WR),
            SlotKind::Te => Some(Position::TE),
            SlotKind::Flex => None,
            SlotKind::K => Some(Position::K),
            SlotKind::Def => Some(Position::DEF),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Qb => "QB",
            SlotKind::Rb => "RB",
            SlotKind::Wr => "WR",
            SlotKind::Te => "TE",
            SlotKind::Flex => "FLEX",
            SlotKind::K => "K",
            SlotKind::Def => "DEF",
        }
    }
}

impl From<Position> for SlotKind {
    fn from(position: Position) -> Self {
        match position {
            Position::QB => SlotKind::Qb,
            Position::RB => SlotKind::Rb,
            Position::WR => SlotKind::Wr,
            Position::TE => SlotKind::Te,
            Position::K => SlotKind::K,
            Position::DEF => SlotKind::Def,
        }
    }
}

/// A roster player with points resolved, as placed in the lineup or bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupPlayer {
    pub key: String,
    pub name: String,
    pub position: Position,
    pub team: Option<String>,
    pub projected_points: f64,
    pub vorp: Option<PlayerVorp>,
    /// Position of the player in the submitted roster
    pub roster_index: usize,
}

/// Starters grouped by the slot they fill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub slots: BTreeMap<SlotKind, Vec<LineupPlayer>>,
}

impl Lineup {
    pub fn get(&self, slot: SlotKind) -> &[LineupPlayer] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every starter in slot order
    pub fn players(&self) -> impl Iterator<Item = &LineupPlayer> {
        self.slots.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_points(&self) -> f64 {
        self.players().map(|p| p.projected_points).sum()
    }
}

/// Output of one lineup optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalLineup {
    pub lineup: Lineup,
    pub bench: Vec<LineupPlayer>,
    pub lineup_points: f64,
    pub bench_points: f64,
    pub analysis: LineupAnalysis,
}
