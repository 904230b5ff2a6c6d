use crate::analysis::analyze;
use crate::config::RosterSlotConfig;
use crate::error::Result;
use crate::models::{Lineup, LineupPlayer, OptimalLineup, SlotKind};
use player_registry::{PlayerRegistry, PlayerVorp, Position, RosterPlayer, ScoringTable};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};
use vorp_engine::VorpRecord;

/// Greedy lineup builder for one league's slot rules
///
/// Required slots are filled first from each position's best projections,
/// then FLEX takes the best remaining eligible players. This is not a global
/// assignment solve; a player used in a required slot is never reconsidered
/// for FLEX.
#[derive(Debug, Clone)]
pub struct LineupOptimizer {
    config: RosterSlotConfig,
    scoring: ScoringTable,
    vorp_lookup: Option<Arc<PlayerRegistry<VorpRecord>>>,
}

impl LineupOptimizer {
    pub fn new(config: RosterSlotConfig) -> Result<Self> {
        config.validate()?;
        let scoring = ScoringTable::for_format(config.scoring);
        Ok(Self { config, scoring, vorp_lookup: None })
    }

    /// Attach VORP values by name to roster players that do not carry one
    pub fn with_vorp_lookup(mut self, lookup: Arc<PlayerRegistry<VorpRecord>>) -> Self {
        self.vorp_lookup = Some(lookup);
        self
    }

    pub fn config(&self) -> &RosterSlotConfig {
        &self.config
    }

    /// Build the starting lineup, bench and diagnostics for a roster
    pub fn optimize(&self, roster: &[RosterPlayer]) -> OptimalLineup {
        let players = self.resolve_players(roster);

        // Stable sort: equal projections keep roster order
        let mut by_position: BTreeMap<Position, Vec<usize>> = BTreeMap::new();
        for (index, player) in players.iter().enumerate() {
            by_position.entry(player.position).or_default().push(index);
        }
        for indices in by_position.values_mut() {
            indices.sort_by(|&a, &b| players[b].projected_points.total_cmp(&players[a].projected_points));
        }

        let mut used = vec![false; players.len()];
        let mut lineup = Lineup::default();

        for position in Position::ALL {
            let wanted = self.config.slots_for(position);
            if wanted == 0 {
                continue;
            }
            let starters: Vec<LineupPlayer> = by_position
                .get(&position)
                .map(|indices| indices.iter().take(wanted).copied().collect::<Vec<_>>())
                .unwrap_or_default()
                .into_iter()
                .map(|index| {
                    used[index] = true;
                    players[index].clone()
                })
                .collect();

            if starters.len() < wanted {
                debug!("{} short: filled {} of {} slots", position, starters.len(), wanted);
            }
            lineup.slots.insert(SlotKind::from(position), starters);
        }

        if self.config.flex > 0 {
            let mut pool: Vec<usize> = (0..players.len())
                .filter(|&i| !used[i] && players[i].position.is_flex_eligible(self.config.superflex))
                .collect();
            pool.sort_by(|&a, &b| players[b].projected_points.total_cmp(&players[a].projected_points));

            let flex: Vec<LineupPlayer> = pool
                .into_iter()
                .take(self.config.flex)
                .map(|index| {
                    used[index] = true;
                    players[index].clone()
                })
                .collect();
            lineup.slots.insert(SlotKind::Flex, flex);
        }

        let bench: Vec<LineupPlayer> = players
            .iter()
            .zip(&used)
            .filter(|(_, starting)| !**starting)
            .map(|(player, _)| player.clone())
            .collect();

        let lineup_points = lineup.total_points();
        let bench_points: f64 = bench.iter().map(|p| p.projected_points).sum();
        let analysis = analyze(&lineup, &bench, &self.config);

        info!(
            "Optimized lineup: {} starters ({:.1} pts), {} bench ({:.1} pts)",
            lineup.len(),
            lineup_points,
            bench.len(),
            bench_points
        );

        OptimalLineup { lineup, bench, lineup_points, bench_points, analysis }
    }

    fn resolve_players(&self, roster: &[RosterPlayer]) -> Vec<LineupPlayer> {
        roster
            .iter()
            .enumerate()
            .map(|(index, player)| LineupPlayer {
                key: player.key(index),
                name: player.display_name().to_string(),
                position: player.position,
                team: player.team.clone(),
                projected_points: player.resolve_points(&self.scoring),
                vorp: player.vorp.or_else(|| self.lookup_vorp(player)),
                roster_index: index,
            })
            .collect()
    }

    fn lookup_vorp(&self, player: &RosterPlayer) -> Option<PlayerVorp> {
        let lookup = self.vorp_lookup.as_ref()?;
        let name = player.display_name();
        if name.is_empty() {
            return None;
        }
        lookup.lookup(name, Some(player.position)).map(|record| PlayerVorp {
            vorp_score: record.vorp_score,
            normalized_vorp: record.normalized_vorp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RecommendationKind;
    use player_registry::{ScoringFormat, StatLine};
    use std::collections::HashSet;

    fn player(name: &str, position: Position, points: f64) -> RosterPlayer {
        RosterPlayer::new(name, position, Some(points))
    }

    /// 1 QB, 3 RB, 3 WR, 1 TE, 1 K, 1 DEF
    fn standard_roster() -> Vec<RosterPlayer> {
        vec![
            player("QB One", Position::QB, 320.0),
            player("RB One", Position::RB, 250.0),
            player("RB Two", Position::RB, 200.0),
            player("RB Three", Position::RB, 150.0),
            player("WR One", Position::WR, 260.0),
            player("WR Two", Position::WR, 210.0),
            player("WR Three", Position::WR, 170.0),
            player("TE One", Position::TE, 140.0),
            player("K One", Position::K, 130.0),
            player("DEF One", Position::DEF, 120.0),
        ]
    }

    fn optimizer() -> LineupOptimizer {
        LineupOptimizer::new(RosterSlotConfig::default()).unwrap()
    }

    fn keys(players: &[LineupPlayer]) -> Vec<&str> {
        players.iter().map(|p| p.key.as_str()).collect()
    }

    #[test]
    fn test_required_slots_then_flex() {
        let result = optimizer().optimize(&standard_roster());

        assert_eq!(keys(result.lineup.get(SlotKind::Rb)), vec!["RB One", "RB Two"]);
        assert_eq!(keys(result.lineup.get(SlotKind::Wr)), vec!["WR One", "WR Two"]);
        // Leftover WR (170) beats leftover RB (150)
        assert_eq!(keys(result.lineup.get(SlotKind::Flex)), vec!["WR Three"]);
        assert_eq!(keys(&result.bench), vec!["RB Three"]);

        assert_eq!(result.lineup.len(), 9);
        assert!((result.lineup_points - 1800.0).abs() < 1e-9);
        assert!((result.bench_points - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_partition_has_no_duplicates_or_drops() {
        let mut roster = standard_roster();
        roster.push(player("QB Two", Position::QB, 300.0));
        roster.push(player("TE Two", Position::TE, 90.0));
        let result = optimizer().optimize(&roster);

        assert_eq!(result.lineup.len() + result.bench.len(), roster.len());
        let mut seen = HashSet::new();
        for p in result.lineup.players().chain(result.bench.iter()) {
            assert!(seen.insert(p.roster_index), "duplicate player {}", p.key);
        }
    }

    #[test]
    fn test_short_roster_leaves_slots_unfilled() {
        let roster = vec![player("QB One", Position::QB, 300.0), player("RB One", Position::RB, 200.0)];
        let result = optimizer().optimize(&roster);

        assert_eq!(result.lineup.get(SlotKind::Rb).len(), 1);
        assert!(result.lineup.get(SlotKind::Wr).is_empty());
        assert!(result.lineup.get(SlotKind::Flex).is_empty());
        assert!(result.bench.is_empty());
        assert_eq!(result.analysis.unfilled_slots[&SlotKind::Rb], 1);
        assert_eq!(result.analysis.unfilled_slots[&SlotKind::Flex], 1);
        assert!(result.analysis.has(RecommendationKind::UnfilledSlot));
    }

    #[test]
    fn test_flex_excludes_quarterbacks_without_superflex() {
        let mut roster = standard_roster();
        roster.push(player("QB Two", Position::QB, 400.0));
        let result = optimizer().optimize(&roster);

        assert_eq!(keys(result.lineup.get(SlotKind::Qb)), vec!["QB Two"]);
        assert_eq!(keys(result.lineup.get(SlotKind::Flex)), vec!["WR Three"]);
        assert!(result.bench.iter().any(|p| p.key == "QB One"));
    }

    #[test]
    fn test_superflex_takes_spare_quarterback() {
        let config = RosterSlotConfig { superflex: true, ..Default::default() };
        let mut roster = standard_roster();
        roster.push(player("QB Two", Position::QB, 300.0));
        let result = LineupOptimizer::new(config).unwrap().optimize(&roster);

        assert_eq!(keys(result.lineup.get(SlotKind::Flex)), vec!["QB Two"]);
    }

    #[test]
    fn test_flex_never_takes_kickers_or_defenses() {
        let config = RosterSlotConfig { flex: 2, ..Default::default() };
        let mut roster = standard_roster();
        roster.push(player("K Two", Position::K, 500.0));
        roster.push(player("DEF Two", Position::DEF, 500.0));
        let result = LineupOptimizer::new(config).unwrap().optimize(&roster);

        let flex = result.lineup.get(SlotKind::Flex);
        assert_eq!(flex.len(), 2);
        assert!(flex.iter().all(|p| p.position.is_flex_eligible(false)));
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let roster = vec![
            player("First", Position::WR, 100.0),
            player("Second", Position::WR, 100.0),
            player("Third", Position::WR, 100.0),
        ];
        let config = RosterSlotConfig { wr: 1, flex: 1, ..Default::default() };
        let result = LineupOptimizer::new(config).unwrap().optimize(&roster);

        assert_eq!(keys(result.lineup.get(SlotKind::Wr)), vec!["First"]);
        assert_eq!(keys(result.lineup.get(SlotKind::Flex)), vec!["Second"]);
        assert_eq!(keys(&result.bench), vec!["Third"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let roster = standard_roster();
        assert_eq!(optimizer().optimize(&roster), optimizer().optimize(&roster));
    }

    #[test]
    fn test_points_derived_from_stats() {
        let stats = StatLine { receptions: 80.0, receiving_yards: 1000.0, ..Default::default() };
        let roster = vec![RosterPlayer::new("Stat WR", Position::WR, None).with_stats(stats)];

        let ppr = optimizer().optimize(&roster);
        assert!((ppr.lineup_points - 180.0).abs() < 1e-9);

        let standard = RosterSlotConfig { scoring: ScoringFormat::Standard, ..Default::default() };
        let result = LineupOptimizer::new(standard).unwrap().optimize(&roster);
        assert!((result.lineup_points - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vorp_lookup_fills_missing_values() {
        let record = VorpRecord {
            player_key: "1".to_string(),
            player_name: "QB One".to_string(),
            position: Position::QB,
            team: "BUF".to_string(),
            projected_points: 320.0,
            baseline: 250.0,
            vorp_score: 70.0,
            normalized_vorp: 88.0,
        };
        let lookup = Arc::new(PlayerRegistry::from_entries(vec![record]));
        let result = optimizer().with_vorp_lookup(lookup).optimize(&standard_roster());

        let qb = &result.lineup.get(SlotKind::Qb)[0];
        assert_eq!(qb.vorp.map(|v| v.vorp_score), Some(70.0));
        assert!(result.lineup.get(SlotKind::Rb)[0].vorp.is_none());
        assert!(result.analysis.has(RecommendationKind::EliteStarter));
    }

    #[test]
    fn test_duplicate_keys_still_partition() {
        let roster = vec![
            player("Same Name", Position::RB, 200.0),
            player("Same Name", Position::RB, 100.0),
            player("Same Name", Position::RB, 50.0),
        ];
        let config = RosterSlotConfig { rb: 1, flex: 1, ..Default::default() };
        let result = LineupOptimizer::new(config).unwrap().optimize(&roster);

        assert_eq!(result.lineup.len(), 2);
        assert_eq!(result.bench.len(), 1);
        assert_eq!(result.bench[0].roster_index, 2);
    }
}
