//! Read-only reference data shared by grading calls

use player_registry::{MatchKind, PlayerRegistry, Position, RosterPlayer};
use std::collections::HashMap;
use std::sync::Arc;
use vorp_engine::{VorpRecord, VorpSnapshot};

/// VORP lookup and bye-week table, built once per season and shared across
/// every team graded against it
#[derive(Debug, Clone, Default)]
pub struct GradingContext {
    vorp: Arc<PlayerRegistry<VorpRecord>>,
    /// Bye week keyed by uppercase NFL team abbreviation
    bye_weeks: Option<HashMap<String, u32>>,
}

impl GradingContext {
    pub fn new(vorp: Arc<PlayerRegistry<VorpRecord>>) -> Self {
        Self { vorp, bye_weeks: None }
    }

    pub fn from_records(records: impl IntoIterator<Item = VorpRecord>) -> Self {
        Self::new(Arc::new(PlayerRegistry::from_entries(records)))
    }

    pub fn from_snapshot(snapshot: &VorpSnapshot) -> Self {
        Self::new(Arc::new(snapshot.registry()))
    }

    pub fn with_bye_weeks(mut self, bye_weeks: HashMap<String, u32>) -> Self {
        self.bye_weeks = Some(
            bye_weeks.into_iter().map(|(team, week)| (team.trim().to_uppercase(), week)).collect(),
        );
        self
    }

    pub fn vorp_registry(&self) -> &Arc<PlayerRegistry<VorpRecord>> {
        &self.vorp
    }

    pub fn has_bye_weeks(&self) -> bool {
        self.bye_weeks.is_some()
    }

    pub fn lookup_vorp(&self, name: &str, position: Position) -> Option<&VorpRecord> {
        self.find_vorp(name, position).map(|(record, _)| record)
    }

    /// Like [`lookup_vorp`](Self::lookup_vorp), also reporting which
    /// precedence level matched
    pub fn find_vorp(&self, name: &str, position: Position) -> Option<(&VorpRecord, MatchKind)> {
        let found = self.vorp.find(name, Some(position))?;
        self.vorp.get(found.index).map(|record| (record, found.kind))
    }

    /// The player's own bye week, else the team table's
    pub fn bye_week_for(&self, player: &RosterPlayer) -> Option<u32> {
        player.bye_week.or_else(|| {
            let team = player.team.as_deref()?.trim().to_uppercase();
            self.bye_weeks.as_ref()?.get(&team).copied()
        })
    }
}
