use crate::models::OptimalLineup;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonSide {
    First,
    Second,
}

/// Head-to-head of two already-built lineups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupComparison {
    pub first_points: f64,
    pub second_points: f64,
    /// first - second
    pub point_differential: f64,
    /// Differential as a percentage of the second lineup's points
    pub percentage_differential: f64,
    /// `None` on an exact tie
    pub preferred: Option<ComparisonSide>,
    pub recommendation: String,
}

pub fn compare_lineups(first: &OptimalLineup, second: &OptimalLineup) -> LineupComparison {
    let first_points = first.lineup_points;
    let second_points = second.lineup_points;
    let point_differential = first_points - second_points;
    let percentage_differential =
        if second_points != 0.0 { point_differential / second_points * 100.0 } else { 0.0 };

    let (preferred, recommendation) = if point_differential > 0.0 {
        (
            Some(ComparisonSide::First),
            format!("Start the first lineup (+{point_differential:.1} projected points)"),
        )
    } else if point_differential < 0.0 {
        (
            Some(ComparisonSide::Second),
            format!("Start the second lineup (+{:.1} projected points)", -point_differential),
        )
    } else {
        (None, "Lineups project evenly; choose by risk tolerance".to_string())
    };

    LineupComparison {
        first_points,
        second_points,
        point_differential,
        percentage_differential,
        preferred,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterSlotConfig;
    use crate::optimizer::LineupOptimizer;
    use player_registry::{Position, RosterPlayer};

    fn lineup_with(points: &[f64]) -> OptimalLineup {
        let roster: Vec<RosterPlayer> = points
            .iter()
            .enumerate()
            .map(|(i, &p)| RosterPlayer::new(format!("WR {i}"), Position::WR, Some(p)))
            .collect();
        let config = RosterSlotConfig { wr: points.len(), ..Default::default() };
        LineupOptimizer::new(config).unwrap().optimize(&roster)
    }

    #[test]
    fn test_higher_lineup_preferred() {
        let comparison = compare_lineups(&lineup_with(&[120.0, 100.0]), &lineup_with(&[100.0, 100.0]));

        assert_eq!(comparison.point_differential, 20.0);
        assert!((comparison.percentage_differential - 10.0).abs() < 1e-9);
        assert_eq!(comparison.preferred, Some(ComparisonSide::First));
    }

    #[test]
    fn test_second_lineup_preferred() {
        let comparison = compare_lineups(&lineup_with(&[80.0]), &lineup_with(&[100.0]));
        assert_eq!(comparison.point_differential, -20.0);
        assert!((comparison.percentage_differential + 20.0).abs() < 1e-9);
        assert_eq!(comparison.preferred, Some(ComparisonSide::Second));
    }

    #[test]
    fn test_exact_tie_defers_to_risk_tolerance() {
        let comparison = compare_lineups(&lineup_with(&[90.0]), &lineup_with(&[90.0]));
        assert_eq!(comparison.point_differential, 0.0);
        assert_eq!(comparison.preferred, None);
        assert!(comparison.recommendation.contains("risk tolerance"));
    }

    #[test]
    fn test_zero_point_baseline() {
        let comparison = compare_lineups(&lineup_with(&[50.0]), &lineup_with(&[0.0]));
        assert_eq!(comparison.percentage_differential, 0.0);
        assert_eq!(comparison.preferred, Some(ComparisonSide::First));
    }
}
