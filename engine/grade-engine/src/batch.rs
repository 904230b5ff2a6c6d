//! League-wide grading: one blocking task per team, then a ranking

use crate::config::LeagueGradingSettings;
use crate::context::GradingContext;
use crate::engine::GradeEngine;
use crate::error::{GradeError, Result};
use crate::models::{LeagueReport, RankedTeam, TeamGrade, TeamRoster};
use std::sync::Arc;
use tracing::info;

/// Grade every team with default weights and rank them
pub async fn grade_league(
    context: Arc<GradingContext>,
    settings: LeagueGradingSettings,
    teams: Vec<TeamRoster>,
) -> Result<LeagueReport> {
    let engine = GradeEngine::new(context, settings)?;
    grade_league_with(Arc::new(engine), teams).await
}

/// Grade every team with a configured engine and rank them.
///
/// Teams are graded concurrently; the report is ordered by overall score,
/// best first, with ties broken by team name.
pub async fn grade_league_with(
    engine: Arc<GradeEngine>,
    teams: Vec<TeamRoster>,
) -> Result<LeagueReport> {
    let team_count = teams.len();

    let handles: Vec<_> = teams
        .into_iter()
        .map(|team| {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || {
                let grade = engine.grade_team(&team.roster);
                (team.team_name, grade)
            })
        })
        .collect();

    let mut graded: Vec<(String, TeamGrade)> = Vec::with_capacity(team_count);
    for handle in handles {
        let result = handle.await.map_err(|e| GradeError::TaskFailed(e.to_string()))?;
        graded.push(result);
    }

    graded.sort_by(|(name_a, a), (name_b, b)| {
        b.overall.score.total_cmp(&a.overall.score).then_with(|| name_a.cmp(name_b))
    });

    let average_score = if graded.is_empty() {
        0.0
    } else {
        graded.iter().map(|(_, grade)| grade.overall.score).sum::<f64>() / graded.len() as f64
    };

    let teams: Vec<RankedTeam> = graded
        .into_iter()
        .enumerate()
        .map(|(index, (team_name, grade))| RankedTeam { rank: index + 1, team_name, grade })
        .collect();

    info!("Graded {} teams, league average {:.2}", teams.len(), average_score);

    Ok(LeagueReport { teams, average_score })
}
