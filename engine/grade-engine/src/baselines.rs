use crate::config::{GradingWeights, LeagueGradingSettings};
use player_registry::Position;
use std::collections::BTreeMap;

/// League-scaled replacement level per position: how deep into the player
/// pool a league starts, plus a buffer.
///
/// FLEX spots are credited to RB/WR/TE by the configured split. Returns
/// `None` when the league has no teams.
pub fn replacement_baselines(
    settings: &LeagueGradingSettings,
    weights: &GradingWeights,
) -> Option<BTreeMap<Position, f64>> {
    if settings.teams == 0 {
        return None;
    }

    let teams = settings.teams as f64;
    let flex_spots = teams * settings.roster_spots.flex as f64;
    let split = &weights.flex_split;

    let baselines = Position::ALL
        .iter()
        .map(|&position| {
            let dedicated = teams * settings.roster_spots.spots_for(position) as f64;
            let flex_share = match position {
                Position::RB => split.rb,
                Position::WR => split.wr,
                Position::TE => split.te,
                _ => 0.0,
            };
            let starters = dedicated + flex_spots * flex_share;
            (position, starters + weights.replacement_buffer as f64)
        })
        .collect();

    Some(baselines)
}
