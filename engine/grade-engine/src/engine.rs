//! Team grading

use crate::baselines::replacement_baselines;
use crate::config::{GradingWeights, LeagueGradingSettings};
use crate::context::GradingContext;
use crate::error::Result;
use crate::grade::score_to_grade;
use crate::models::{GradeRecommendation, OverallGrade, PositionGrade, Priority, TeamGrade};
use player_registry::{MatchKind, Position, RosterPlayer, ScoringTable};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub const EMPTY_ROSTER_WARNING: &str = "No roster data available";

/// Superflex rosters want a third quarterback for byes and injuries
const SUPERFLEX_MIN_QBS: usize = 3;
const TE_PREMIUM_MIN_TES: usize = 2;

/// A rostered player with its points and VORP resolved
struct GradedPlayer<'a> {
    player: &'a RosterPlayer,
    points: f64,
    vorp: Option<f64>,
    /// Name of the VORP record the player borrowed data from through a
    /// partial name match
    partial_match: Option<String>,
}

/// Grades teams for one league against a shared grading context
#[derive(Debug, Clone)]
pub struct GradeEngine {
    context: Arc<GradingContext>,
    settings: LeagueGradingSettings,
    weights: GradingWeights,
    scoring: ScoringTable,
}

impl GradeEngine {
    pub fn new(context: Arc<GradingContext>, settings: LeagueGradingSettings) -> Result<Self> {
        settings.validate()?;
        let scoring = ScoringTable::for_format(settings.scoring);
        Ok(Self { context, settings, weights: GradingWeights::default(), scoring })
    }

    pub fn with_weights(mut self, weights: GradingWeights) -> Result<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    pub fn context(&self) -> &Arc<GradingContext> {
        &self.context
    }

    pub fn settings(&self) -> &LeagueGradingSettings {
        &self.settings
    }

    pub fn weights(&self) -> &GradingWeights {
        &self.weights
    }

    /// Grade one team's roster. Never fails; data gaps land in `warnings`.
    pub fn grade_team(&self, roster: &[RosterPlayer]) -> TeamGrade {
        if roster.is_empty() {
            return TeamGrade {
                overall: OverallGrade::neutral(),
                position_grades: BTreeMap::new(),
                replacement_baselines: BTreeMap::new(),
                recommendations: Vec::new(),
                warnings: vec![EMPTY_ROSTER_WARNING.to_string()],
            };
        }

        let mut warnings = Vec::new();

        let replacement_baselines =
            replacement_baselines(&self.settings, &self.weights).unwrap_or_else(|| {
                warnings.push(
                    "Replacement baselines not computable: league has no teams".to_string(),
                );
                BTreeMap::new()
            });

        let mut by_position: BTreeMap<Position, Vec<GradedPlayer<'_>>> = BTreeMap::new();
        for player in roster {
            let graded = self.resolve(player);
            if let Some(matched) = &graded.partial_match {
                warnings.push(format!(
                    "Matched '{}' to VORP record '{}' by partial name",
                    player.display_name(),
                    matched
                ));
            }
            by_position.entry(player.position).or_default().push(graded);
        }

        let position_grades: BTreeMap<Position, PositionGrade> = by_position
            .iter_mut()
            .map(|(&position, players)| (position, self.grade_position(position, players)))
            .collect();

        let unmatched: usize = position_grades.values().map(|g| g.unmatched_players).sum();
        if unmatched > 0 {
            warnings.push(format!("{unmatched} player(s) had no VORP match and count as 0"));
        }

        let active = self.active_positions();
        for (position, _) in &active {
            if !position_grades.contains_key(position) {
                warnings.push(format!("No {position} on roster; position scored 0"));
            }
        }

        let missing = roster.iter().filter(|p| self.context.bye_week_for(p).is_none()).count();
        if missing > 0 {
            warnings.push(format!("Bye week data unavailable for {missing} player(s)"));
        }

        let overall = self.overall_grade(&active, &position_grades);
        let recommendations = self.recommendations(&active, &position_grades, &by_position);

        info!(
            "Graded roster of {} players: {} ({:.2}), {} warning(s)",
            roster.len(),
            overall.grade,
            overall.score,
            warnings.len()
        );

        TeamGrade { overall, position_grades, replacement_baselines, recommendations, warnings }
    }

    /// Positions that count toward the overall grade, with their weight
    fn active_positions(&self) -> Vec<(Position, f64)> {
        Position::ALL
            .iter()
            .map(|&position| (position, self.weights.effective_weight(position, &self.settings)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }

    fn resolve<'a>(&self, player: &'a RosterPlayer) -> GradedPlayer<'a> {
        let found = self.context.find_vorp(player.display_name(), player.position);
        let record = found.map(|(record, _)| record);
        let own_points = player.projected_points.is_some() || player.stats.is_some();

        let vorp = player.vorp.map(|v| v.vorp_score).or_else(|| record.map(|r| r.vorp_score));
        let points = if own_points {
            player.resolve_points(&self.scoring)
        } else {
            record.map(|r| r.projected_points).unwrap_or(0.0)
        };

        // Only worth flagging when the record actually fed the grade
        let record_used = player.vorp.is_none() || !own_points;
        let partial_match = match found {
            Some((record, MatchKind::Partial)) if record_used => Some(record.player_name.clone()),
            _ => None,
        };

        GradedPlayer { player, points, vorp, partial_match }
    }

    fn grade_position(&self, position: Position, players: &mut [GradedPlayer<'_>]) -> PositionGrade {
        let weights = &self.weights;
        players.sort_by(|a, b| b.points.total_cmp(&a.points));

        let vorp_total: f64 = players.iter().filter_map(|p| p.vorp).sum();
        let unmatched_players = players.iter().filter(|p| p.vorp.is_none()).count();

        let erla_score: f64 = players
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, p)| {
                p.vorp.filter(|v| *v > 0.0).map(|v| v * weights.erla_weight(index))
            })
            .sum();

        // Measured against the top scorer, so only a reordered depth chart
        // could make it positive
        let platoon_gain = match &*players {
            [first, second, ..] if self.settings.roster_spots.spots_for(position) == 1 => {
                (first.points.max(second.points) - first.points) * weights.platoon_scale
            }
            _ => 0.0,
        };

        let score = (vorp_total * weights.vorp_factor).max(0.0)
            + (erla_score * weights.erla_factor).max(0.0)
            + (platoon_gain * weights.platoon_factor).max(0.0);

        debug!(
            "{} grade: {} players, vorp {:.1}, erla {:.1}, score {:.2}",
            position,
            players.len(),
            vorp_total,
            erla_score,
            score
        );

        PositionGrade {
            position,
            score,
            grade: score_to_grade(score),
            vorp_total,
            erla_score,
            platoon_gain,
            player_count: players.len(),
            unmatched_players,
        }
    }

    fn overall_grade(
        &self,
        active: &[(Position, f64)],
        position_grades: &BTreeMap<Position, PositionGrade>,
    ) -> OverallGrade {
        let scores: Vec<(f64, f64)> = active
            .iter()
            .map(|(position, weight)| {
                (*weight, position_grades.get(position).map(|g| g.score).unwrap_or(0.0))
            })
            .collect();

        let total_weight: f64 = scores.iter().map(|(weight, _)| weight).sum();
        if scores.is_empty() || total_weight <= 0.0 {
            return OverallGrade::neutral();
        }

        let normalized_score =
            scores.iter().map(|(weight, score)| weight * score).sum::<f64>() / total_weight;
        let balance_penalty = -self.weights.balance_factor
            * population_std_dev(scores.iter().map(|(_, score)| *score));
        let score = round2((normalized_score + balance_penalty).max(0.0));

        OverallGrade {
            score,
            grade: score_to_grade(score),
            normalized_score,
            balance_penalty,
            total_weight,
        }
    }

    fn recommendations(
        &self,
        active: &[(Position, f64)],
        position_grades: &BTreeMap<Position, PositionGrade>,
        by_position: &BTreeMap<Position, Vec<GradedPlayer<'_>>>,
    ) -> Vec<GradeRecommendation> {
        let mut recommendations = Vec::new();

        let mut weakest: Option<(Position, f64)> = None;
        for (position, _) in active {
            let score = position_grades.get(position).map(|g| g.score).unwrap_or(0.0);
            if weakest.map_or(true, |(_, lowest)| score < lowest) {
                weakest = Some((*position, score));
            }
        }
        if let Some((position, score)) = weakest {
            recommendations.push(GradeRecommendation {
                priority: Priority::High,
                position: Some(position),
                message: format!(
                    "Upgrade {position}: weakest position at {score:.1} ({})",
                    score_to_grade(score)
                ),
            });
        }

        let count = |position: Position| by_position.get(&position).map_or(0, Vec::len);

        if self.settings.is_superflex && count(Position::QB) < SUPERFLEX_MIN_QBS {
            recommendations.push(GradeRecommendation {
                priority: Priority::High,
                position: Some(Position::QB),
                message: format!(
                    "Superflex league: roster {} quarterbacks, you have {}",
                    SUPERFLEX_MIN_QBS,
                    count(Position::QB)
                ),
            });
        }

        if self.settings.is_te_premium && count(Position::TE) < TE_PREMIUM_MIN_TES {
            recommendations.push(GradeRecommendation {
                priority: Priority::Medium,
                position: Some(Position::TE),
                message: format!(
                    "TE premium league: roster at least {} tight ends, you have {}",
                    TE_PREMIUM_MIN_TES,
                    count(Position::TE)
                ),
            });
        }

        for (position, players) in by_position {
            if players.len() < 2 {
                continue;
            }
            let byes: Vec<Option<u32>> =
                players.iter().map(|p| self.context.bye_week_for(p.player)).collect();
            if let Some(Some(week)) = byes.first() {
                if byes.iter().all(|bye| *bye == Some(*week)) {
                    recommendations.push(GradeRecommendation {
                        priority: Priority::Medium,
                        position: Some(*position),
                        message: format!(
                            "All {} {} share bye week {}; add depth with a different bye",
                            players.len(),
                            position,
                            week
                        ),
                    });
                }
            }
        }

        recommendations
    }
}

fn population_std_dev(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std_dev() {
        assert_eq!(population_std_dev([60.0; 6].into_iter()), 0.0);
        assert_eq!(population_std_dev(std::iter::empty()), 0.0);
        assert!((population_std_dev([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter()) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(59.999999999), 60.0);
        assert_eq!(round2(12.344), 12.34);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = LeagueGradingSettings::default();
        settings.roster_spots = crate::config::RosterSpots {
            qb: 0,
            rb: 0,
            wr: 0,
            te: 0,
            flex: 0,
            k: 0,
            def: 0,
            bench: 0,
        };
        assert!(GradeEngine::new(Arc::new(GradingContext::default()), settings).is_err());
    }
}
