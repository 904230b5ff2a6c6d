use crate::config::VorpConfig;
use crate::models::*;
use chrono::Utc;
use player_registry::{PlayerProjection, Position};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Median of values already sorted in either direction
pub fn median(sorted: &[f64]) -> Option<f64> {
    let len = sorted.len();
    match len {
        0 => None,
        _ if len % 2 == 1 => Some(sorted[len / 2]),
        _ => Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0),
    }
}

/// Calculator for replacement baselines and VORP scores
pub struct VorpCalculator {
    config: VorpConfig,
}

impl VorpCalculator {
    /// Create a new VORP calculator
    pub fn new(config: VorpConfig) -> Self {
        Self { config }
    }

    /// Baseline per position: median of the top-N projections.
    ///
    /// Every position gets an entry. A position with no usable projection gets
    /// a baseline of 0 and a warning instead of failing the run.
    pub fn calculate_baselines(
        &self,
        projections: &[PlayerProjection],
    ) -> (BTreeMap<Position, PositionBaseline>, Vec<String>) {
        let mut points_by_position: BTreeMap<Position, Vec<f64>> = BTreeMap::new();
        for projection in projections {
            if let Some(points) = projection.usable_points() {
                points_by_position.entry(projection.position).or_default().push(points);
            }
        }

        let mut baselines = BTreeMap::new();
        let mut warnings = Vec::new();

        for position in Position::ALL {
            let mut points = points_by_position.remove(&position).unwrap_or_default();
            let available = points.len();
            points.sort_by(|a, b| b.total_cmp(a));
            points.truncate(self.config.get_pool_size_for_position(position));

            let baseline = match median(&points) {
                Some(baseline) => baseline,
                None => {
                    warn!("No usable projections for {}, using baseline 0", position);
                    warnings.push(format!("No usable projections for {position}; baseline set to 0"));
                    0.0
                }
            };

            debug!(
                "Baseline for {}: {:.2} (pooled {} of {} available)",
                position,
                baseline,
                points.len(),
                available
            );

            baselines.insert(
                position,
                PositionBaseline { position, baseline, pool_size: points.len(), available },
            );
        }

        (baselines, warnings)
    }

    /// Score every player against their position's baseline and normalize the
    /// scores across the whole league
    pub fn calculate(&self, projections: &[PlayerProjection]) -> VorpCalculation {
        let (baselines, mut warnings) = self.calculate_baselines(projections);

        let mut records = Vec::with_capacity(projections.len());
        let mut skipped_players = 0;

        for projection in projections {
            let (Some(points), Some(baseline)) =
                (projection.usable_points(), baselines.get(&projection.position))
            else {
                skipped_players += 1;
                continue;
            };

            records.push(VorpRecord {
                player_key: projection.key.clone(),
                player_name: projection.display_name().to_string(),
                position: projection.position,
                team: projection.team.clone(),
                projected_points: points,
                baseline: baseline.baseline,
                vorp_score: points - baseline.baseline,
                normalized_vorp: 0.0,
            });
        }

        if skipped_players > 0 {
            warn!("Skipped {} players without a usable projection", skipped_players);
            warnings.push(format!("Skipped {skipped_players} players without a usable projection"));
        }

        let normalization = self.normalize(&mut records);

        info!(
            "Calculated VORP for {} players ({} skipped), range {:.2}..{:.2}",
            records.len(),
            skipped_players,
            normalization.min_vorp,
            normalization.max_vorp
        );

        VorpCalculation { records, baselines, normalization, skipped_players, warnings }
    }

    /// Single min-max pass over all positions combined
    fn normalize(&self, records: &mut [VorpRecord]) -> NormalizationInfo {
        let min_vorp = records.iter().map(|r| r.vorp_score).fold(f64::INFINITY, f64::min);
        let max_vorp = records.iter().map(|r| r.vorp_score).fold(f64::NEG_INFINITY, f64::max);

        if records.is_empty() || max_vorp <= min_vorp {
            let midpoint = self.config.vorp.degenerate_normalized_score;
            for record in records.iter_mut() {
                record.normalized_vorp = midpoint;
            }
            let (min_vorp, max_vorp) = if records.is_empty() { (0.0, 0.0) } else { (min_vorp, max_vorp) };
            return NormalizationInfo {
                method: "global-min-max".to_string(),
                min_vorp,
                max_vorp,
                degenerate: true,
            };
        }

        let range = max_vorp - min_vorp;
        for record in records.iter_mut() {
            record.normalized_vorp = ((record.vorp_score - min_vorp) / range * 100.0).clamp(0.0, 100.0);
        }

        NormalizationInfo { method: "global-min-max".to_string(), min_vorp, max_vorp, degenerate: false }
    }

    /// Package a calculation as a dated snapshot with per-position stats
    pub fn build_snapshot(&self, calculation: VorpCalculation) -> VorpSnapshot {
        let mut position_stats = BTreeMap::new();

        for (position, baseline) in &calculation.baselines {
            let scores: Vec<f64> = calculation
                .records
                .iter()
                .filter(|record| record.position == *position)
                .map(|record| record.vorp_score)
                .collect();

            let (average_vorp, max_vorp, min_vorp) = if scores.is_empty() {
                (0.0, 0.0, 0.0)
            } else {
                (
                    scores.iter().sum::<f64>() / scores.len() as f64,
                    scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                    scores.iter().copied().fold(f64::INFINITY, f64::min),
                )
            };

            position_stats.insert(
                *position,
                PositionStats {
                    player_count: scores.len(),
                    pool_size: baseline.pool_size,
                    baseline: baseline.baseline,
                    average_vorp,
                    max_vorp,
                    min_vorp,
                },
            );
        }

        VorpSnapshot {
            season: self.config.vorp.season,
            generated_at: Utc::now(),
            total_players: calculation.records.len(),
            skipped_players: calculation.skipped_players,
            position_stats,
            normalization_info: calculation.normalization,
            warnings: calculation.warnings,
            records: calculation.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(key: &str, position: Position, points: Option<f64>) -> PlayerProjection {
        PlayerProjection::new(key, position, "TST", points)
    }

    fn wr_pool() -> Vec<PlayerProjection> {
        (1..=10)
            .map(|i| projection(&format!("wr{i}"), Position::WR, Some(110.0 - 10.0 * i as f64)))
            .collect()
    }

    fn calculator() -> VorpCalculator {
        VorpCalculator::new(VorpConfig::default())
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[7.0]), Some(7.0));
        assert_eq!(median(&[9.0, 5.0, 1.0]), Some(5.0));
        assert_eq!(median(&[10.0, 8.0, 4.0, 2.0]), Some(6.0));
    }

    #[test]
    fn test_wr_pool_smaller_than_cap() {
        let calculation = calculator().calculate(&wr_pool());

        let wr = &calculation.baselines[&Position::WR];
        assert_eq!(wr.baseline, 55.0);
        assert_eq!(wr.pool_size, 10);

        let top = calculation.find("wr1").unwrap();
        assert_eq!(top.projected_points, 100.0);
        assert_eq!(top.vorp_score, 45.0);
    }

    #[test]
    fn test_pool_capped_at_configured_size() {
        let mut config = VorpConfig::default();
        config.vorp.pool_sizes.insert(Position::WR, 4);
        let calculation = VorpCalculator::new(config).calculate(&wr_pool());

        // Top four: 100, 90, 80, 70
        let wr = &calculation.baselines[&Position::WR];
        assert_eq!(wr.pool_size, 4);
        assert_eq!(wr.available, 10);
        assert_eq!(wr.baseline, 85.0);
        assert_eq!(calculation.find("wr10").unwrap().vorp_score, -75.0);
    }

    #[test]
    fn test_empty_positions_get_zero_baseline_with_warning() {
        let calculation = calculator().calculate(&wr_pool());

        assert_eq!(calculation.baselines[&Position::TE].baseline, 0.0);
        assert_eq!(calculation.baselines[&Position::TE].pool_size, 0);
        assert!(calculation.warnings.iter().any(|w| w.contains("TE")));
        assert_eq!(calculation.baselines.len(), Position::ALL.len());
    }

    #[test]
    fn test_missing_projections_are_skipped() {
        let mut players = wr_pool();
        players.push(projection("injured", Position::RB, None));
        players.push(projection("broken", Position::QB, Some(f64::NAN)));

        let calculation = calculator().calculate(&players);
        assert_eq!(calculation.records.len(), 10);
        assert_eq!(calculation.skipped_players, 2);
        assert!(calculation.find("injured").is_none());
    }

    #[test]
    fn test_normalization_spans_all_positions() {
        let players = vec![
            projection("qb1", Position::QB, Some(300.0)),
            projection("qb2", Position::QB, Some(200.0)),
            projection("te1", Position::TE, Some(150.0)),
            projection("te2", Position::TE, Some(50.0)),
            projection("te3", Position::TE, Some(40.0)),
        ];
        let calculation = calculator().calculate(&players);

        // QB baseline 250, TE baseline 50: scores 50, -50, 100, 0, -10
        assert_eq!(calculation.normalization.min_vorp, -50.0);
        assert_eq!(calculation.normalization.max_vorp, 100.0);
        assert_eq!(calculation.find("qb2").unwrap().normalized_vorp, 0.0);
        assert_eq!(calculation.find("te1").unwrap().normalized_vorp, 100.0);
        assert!((calculation.find("qb1").unwrap().normalized_vorp - 66.666).abs() < 0.01);

        for record in &calculation.records {
            assert!((0.0..=100.0).contains(&record.normalized_vorp));
        }
    }

    #[test]
    fn test_single_player_is_degenerate() {
        let calculation = calculator().calculate(&[projection("solo", Position::K, Some(140.0))]);

        assert!(calculation.normalization.degenerate);
        assert_eq!(calculation.records[0].vorp_score, 0.0);
        assert_eq!(calculation.records[0].normalized_vorp, 50.0);
    }

    #[test]
    fn test_all_equal_scores_get_midpoint() {
        let players: Vec<_> =
            (0..4).map(|i| projection(&format!("k{i}"), Position::K, Some(120.0))).collect();
        let calculation = calculator().calculate(&players);

        assert!(calculation.records.iter().all(|r| r.normalized_vorp == 50.0));
    }

    #[test]
    fn test_empty_input() {
        let calculation = calculator().calculate(&[]);
        assert!(calculation.records.is_empty());
        assert!(calculation.normalization.degenerate);
        assert_eq!(calculation.warnings.len(), Position::ALL.len());
    }

    #[test]
    fn test_other_position_change_leaves_baseline_alone() {
        let mut players = wr_pool();
        players.push(projection("rb1", Position::RB, Some(200.0)));
        let before = calculator().calculate(&players);

        players.last_mut().unwrap().projected_points = Some(260.0);
        let after = calculator().calculate(&players);

        assert_eq!(before.baselines[&Position::WR], after.baselines[&Position::WR]);
        assert_eq!(before.find("wr3").unwrap().vorp_score, after.find("wr3").unwrap().vorp_score);
    }

    #[test]
    fn test_top_by_position() {
        let calculation = calculator().calculate(&wr_pool());
        let top = calculation.top_by_position(Position::WR, 3);
        let keys: Vec<&str> = top.iter().map(|r| r.player_key.as_str()).collect();
        assert_eq!(keys, vec!["wr1", "wr2", "wr3"]);
        assert!(calculation.top_by_position(Position::QB, 3).is_empty());
    }

    #[test]
    fn test_snapshot_position_stats() {
        let calc = calculator();
        let snapshot = calc.build_snapshot(calc.calculate(&wr_pool()));

        assert_eq!(snapshot.season, 2025);
        assert_eq!(snapshot.total_players, 10);
        let wr = &snapshot.position_stats[&Position::WR];
        assert_eq!(wr.player_count, 10);
        assert_eq!(wr.baseline, 55.0);
        assert_eq!(wr.max_vorp, 45.0);
        assert_eq!(wr.min_vorp, -45.0);
        assert!(wr.average_vorp.abs() < 1e-9);
        assert_eq!(snapshot.position_stats[&Position::QB].player_count, 0);
    }
}
