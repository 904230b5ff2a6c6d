//! Rule-based lineup diagnostics

use crate::config::RosterSlotConfig;
use crate::models::{Lineup, LineupPlayer, SlotKind};
use player_registry::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Starters averaging below this are flagged as a weak position (K/DEF exempt)
const WEAK_POSITION_POINTS: f64 = 10.0;

/// Bench average above flex average by this factor is flagged
const BENCH_OVER_FLEX_FACTOR: f64 = 1.2;

/// Minimum RB and WR counts across the whole roster, starters and bench
/// alike, before a scarcity warning fires. These are depth targets for a
/// team that starts RBs or WRs (dedicated slots or FLEX), not a count of
/// starters, so a bench player covering a bye still counts. Leagues with no
/// slot the position can fill are never warned.
const MIN_RB_DEPTH: usize = 3;
const MIN_WR_DEPTH: usize = 4;

const ELITE_VORP: f64 = 50.0;
const STRONG_VORP: f64 = 20.0;
const BENCHABLE_VORP: f64 = -50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub count: usize,
    pub total_points: f64,
    pub average_points: f64,
}

/// Who ended up in the FLEX slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlexSummary {
    pub positions: Vec<Position>,
    pub total_points: f64,
    pub average_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VorpHighlight {
    pub key: String,
    pub name: String,
    pub position: Position,
    pub vorp_score: f64,
    pub normalized_vorp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    WeakPosition,
    BenchOutperformsFlex,
    Scarcity,
    EliteStarter,
    StrongStarter,
    ConsiderBenching,
    UnfilledSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupRecommendation {
    pub kind: RecommendationKind,
    pub position: Option<Position>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupAnalysis {
    /// Starters by their own position, FLEX starters included
    pub position_breakdown: BTreeMap<Position, PositionSummary>,
    pub flex: FlexSummary,
    pub bench_average: Option<f64>,
    pub best_starter: Option<VorpHighlight>,
    pub worst_starter: Option<VorpHighlight>,
    /// Mean VORP over starters that carry one
    pub average_vorp: Option<f64>,
    /// Slots the roster could not fill
    pub unfilled_slots: BTreeMap<SlotKind, usize>,
    pub recommendations: Vec<LineupRecommendation>,
}

impl LineupAnalysis {
    pub fn has(&self, kind: RecommendationKind) -> bool {
        self.recommendations.iter().any(|r| r.kind == kind)
    }
}

pub(crate) fn analyze(
    lineup: &Lineup,
    bench: &[LineupPlayer],
    config: &RosterSlotConfig,
) -> LineupAnalysis {
    let mut recommendations = Vec::new();

    let mut unfilled_slots = BTreeMap::new();
    for slot in SlotKind::ALL {
        let wanted = config.slots_for_kind(slot);
        let filled = lineup.get(slot).len();
        if filled < wanted {
            unfilled_slots.insert(slot, wanted - filled);
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::UnfilledSlot,
                position: slot.position(),
                message: format!("{} of {} {} slot(s) left empty", wanted - filled, wanted, slot.label()),
            });
        }
    }

    let position_breakdown = position_breakdown(lineup);
    for (position, summary) in &position_breakdown {
        if matches!(position, Position::K | Position::DEF) {
            continue;
        }
        if summary.average_points < WEAK_POSITION_POINTS {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::WeakPosition,
                position: Some(*position),
                message: format!(
                    "{} starters average {:.1} points; upgrade this weak position",
                    position, summary.average_points
                ),
            });
        }
    }

    let flex_players = lineup.get(SlotKind::Flex);
    let flex = FlexSummary {
        positions: flex_players.iter().map(|p| p.position).collect(),
        total_points: flex_players.iter().map(|p| p.projected_points).sum(),
        average_points: average(flex_players.iter().map(|p| p.projected_points)),
    };

    let bench_average = average(bench.iter().map(|p| p.projected_points));
    if let (Some(bench_avg), Some(flex_avg)) = (bench_average, flex.average_points) {
        if bench_avg > flex_avg * BENCH_OVER_FLEX_FACTOR {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::BenchOutperformsFlex,
                position: None,
                message: format!(
                    "Bench averages {bench_avg:.1} points, more than 20% above FLEX ({flex_avg:.1})"
                ),
            });
        }
    }

    let depth = |position: Position| {
        lineup.players().chain(bench.iter()).filter(|p| p.position == position).count()
    };
    for (position, minimum, wanted) in [
        (Position::RB, MIN_RB_DEPTH, config.rb + config.flex),
        (Position::WR, MIN_WR_DEPTH, config.wr + config.flex),
    ] {
        let count = depth(position);
        if wanted > 0 && count < minimum {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::Scarcity,
                position: Some(position),
                message: format!("Only {count} {position} rostered; at least {minimum} recommended"),
            });
        }
    }

    let with_vorp: Vec<(&LineupPlayer, f64, f64)> = lineup
        .players()
        .filter_map(|p| p.vorp.map(|v| (p, v.vorp_score, v.normalized_vorp)))
        .collect();

    let best_starter = pick_by_normalized(&with_vorp, |candidate, current| candidate > current);
    let worst_starter = pick_by_normalized(&with_vorp, |candidate, current| candidate < current);
    let average_vorp = average(with_vorp.iter().map(|(_, score, _)| *score));

    if let Some(best) = &best_starter {
        if best.vorp_score > ELITE_VORP {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::EliteStarter,
                position: Some(best.position),
                message: format!("{} is an elite starter ({:+.1} VORP)", best.name, best.vorp_score),
            });
        } else if best.vorp_score > STRONG_VORP {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::StrongStarter,
                position: Some(best.position),
                message: format!("{} is a strong starter ({:+.1} VORP)", best.name, best.vorp_score),
            });
        }
    }

    if let Some(worst) = &worst_starter {
        if worst.vorp_score < BENCHABLE_VORP {
            recommendations.push(LineupRecommendation {
                kind: RecommendationKind::ConsiderBenching,
                position: Some(worst.position),
                message: format!("Consider benching {} ({:+.1} VORP)", worst.name, worst.vorp_score),
            });
        }
    }

    LineupAnalysis {
        position_breakdown,
        flex,
        bench_average,
        best_starter,
        worst_starter,
        average_vorp,
        unfilled_slots,
        recommendations,
    }
}

fn position_breakdown(lineup: &Lineup) -> BTreeMap<Position, PositionSummary> {
    let mut breakdown: BTreeMap<Position, PositionSummary> = BTreeMap::new();
    for player in lineup.players() {
        let summary = breakdown.entry(player.position).or_insert(PositionSummary {
            count: 0,
            total_points: 0.0,
            average_points: 0.0,
        });
        summary.count += 1;
        summary.total_points += player.projected_points;
    }
    for summary in breakdown.values_mut() {
        summary.average_points = summary.total_points / summary.count as f64;
    }
    breakdown
}

/// First starter that no later starter beats under `better`
fn pick_by_normalized(
    candidates: &[(&LineupPlayer, f64, f64)],
    better: impl Fn(f64, f64) -> bool,
) -> Option<VorpHighlight> {
    let mut chosen: Option<&(&LineupPlayer, f64, f64)> = None;
    for candidate in candidates {
        if chosen.map_or(true, |current| better(candidate.2, current.2)) {
            chosen = Some(candidate);
        }
    }
    chosen.map(|(player, vorp_score, normalized_vorp)| VorpHighlight {
        key: player.key.clone(),
        name: player.name.clone(),
        position: player.position,
        vorp_score: *vorp_score,
        normalized_vorp: *normalized_vorp,
    })
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
