//! # Command Line Interface
//!
//! Subcommands for VORP snapshots, lineups, lineup comparisons, and league
//! grade reports.

use crate::config::LeagueConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use grade_engine::{grade_league_with, GradeEngine, GradingContext, LeagueReport, TeamRoster};
use lineup_optimizer::{compare_lineups, LineupOptimizer, OptimalLineup, SlotKind};
use player_registry::RosterPlayer;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vorp_engine::{VorpConfig, VorpEngine, VorpSnapshot};

/// Roster valuation and grading
#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Fantasy roster valuation: VORP, optimal lineups, and team grades")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a VORP snapshot from a projection set
    Vorp {
        /// Projection set JSON
        #[arg(short, long)]
        projections: PathBuf,

        /// Season label for the snapshot
        #[arg(long)]
        season: Option<i32>,

        /// Where to write the snapshot JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How many players to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Build the optimal starting lineup for a roster
    Lineup {
        /// Roster JSON (array of players)
        #[arg(short, long)]
        roster: PathBuf,

        /// League config TOML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// VORP snapshot used to attach VORP to players
        #[arg(long)]
        vorp: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compare the optimal lineups of two rosters
    Compare {
        #[arg(long)]
        roster_a: PathBuf,

        #[arg(long)]
        roster_b: PathBuf,

        /// League config TOML
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Grade every team in a league
    Grade {
        /// League JSON (array of `{team_name, roster}`)
        #[arg(short, long)]
        league: PathBuf,

        /// VORP snapshot JSON
        #[arg(long)]
        vorp: PathBuf,

        /// League config TOML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Bye weeks JSON (team abbreviation to week)
        #[arg(long)]
        bye_weeks: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a default league config
    InitConfig {
        #[arg(short, long, default_value = "league.toml")]
        output: PathBuf,
    },
}

/// CLI handler
pub struct CliHandler;

impl CliHandler {
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Vorp { projections, season, output, top } => {
                self.run_vorp(&projections, season, output.as_deref(), top).await?;
            }
            Commands::Lineup { roster, config, vorp, json } => {
                self.run_lineup(&roster, config.as_deref(), vorp.as_deref(), json).await?;
            }
            Commands::Compare { roster_a, roster_b, config } => {
                self.run_compare(&roster_a, &roster_b, config.as_deref()).await?;
            }
            Commands::Grade { league, vorp, config, bye_weeks, json } => {
                self.run_grade(&league, &vorp, config.as_deref(), bye_weeks.as_deref(), json)
                    .await?;
            }
            Commands::InitConfig { output } => {
                LeagueConfig::default().save_to_file(&output)?;
                println!("{} {}", "Wrote default league config to".green(), output.display());
            }
        }
        Ok(())
    }

    async fn run_vorp(
        &self,
        projections: &Path,
        season: Option<i32>,
        output: Option<&Path>,
        top: usize,
    ) -> Result<()> {
        let mut config = VorpConfig::from_env()?;
        if let Some(season) = season {
            config.vorp.season = season;
        }

        let engine = VorpEngine::new(config);
        let snapshot = engine.process_file(projections, output).await?;

        println!(
            "{}",
            format!(
                "VORP snapshot for {}: {} players scored, {} skipped",
                snapshot.season, snapshot.total_players, snapshot.skipped_players
            )
            .cyan()
            .bold()
        );

        let mut ranked: Vec<_> = snapshot.records.iter().collect();
        ranked.sort_by(|a, b| b.vorp_score.total_cmp(&a.vorp_score));

        println!("Rank Name                     Pos  Team Points   VORP     Norm");
        println!("{}", "-".repeat(66));
        for (i, record) in ranked.iter().take(top).enumerate() {
            println!(
                "{:4} {:24} {:4} {:4} {:8.2} {:8.2} {:6.1}",
                i + 1,
                record.player_name,
                record.position,
                record.team,
                record.projected_points,
                record.vorp_score,
                record.normalized_vorp
            );
        }

        print_warnings(&snapshot.warnings);
        Ok(())
    }

    async fn run_lineup(
        &self,
        roster: &Path,
        config: Option<&Path>,
        vorp: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let config = LeagueConfig::load_or_default(config)?;
        let roster: Vec<RosterPlayer> = read_json(roster).await?;

        let mut optimizer = LineupOptimizer::new(config.slots)?;
        if let Some(path) = vorp {
            let snapshot = VorpEngine::load_snapshot(path).await?;
            optimizer = optimizer.with_vorp_lookup(Arc::new(snapshot.registry()));
        }

        let result = optimizer.optimize(&roster);
        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_lineup(&result);
        }
        Ok(())
    }

    async fn run_compare(&self, roster_a: &Path, roster_b: &Path, config: Option<&Path>) -> Result<()> {
        let config = LeagueConfig::load_or_default(config)?;
        let optimizer = LineupOptimizer::new(config.slots)?;

        let first = optimizer.optimize(&read_json::<Vec<RosterPlayer>>(roster_a).await?);
        let second = optimizer.optimize(&read_json::<Vec<RosterPlayer>>(roster_b).await?);
        let comparison = compare_lineups(&first, &second);

        println!("{}", "Lineup Comparison".cyan().bold());
        println!("{}", "=".repeat(50));
        println!("  {:<12} {:8.2}", roster_a.display(), comparison.first_points);
        println!("  {:<12} {:8.2}", roster_b.display(), comparison.second_points);
        println!(
            "  Differential {:+8.2} ({:+.1}%)",
            comparison.point_differential, comparison.percentage_differential
        );
        println!("  {}", comparison.recommendation.yellow().bold());
        Ok(())
    }

    async fn run_grade(
        &self,
        league: &Path,
        vorp: &Path,
        config: Option<&Path>,
        bye_weeks: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let config = LeagueConfig::load_or_default(config)?;
        let teams: Vec<TeamRoster> = read_json(league).await?;
        let snapshot: VorpSnapshot = VorpEngine::load_snapshot(vorp).await?;

        let mut context = GradingContext::from_snapshot(&snapshot);
        if let Some(path) = bye_weeks {
            let table: HashMap<String, u32> = read_json(path).await?;
            context = context.with_bye_weeks(table);
        }

        let engine = GradeEngine::new(Arc::new(context), config.grading)?;
        info!("Grading {} teams against {} VORP records", teams.len(), snapshot.records.len());
        let report = grade_league_with(Arc::new(engine), teams).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed JSON in {}", path.display()))
}

fn print_lineup(result: &OptimalLineup) {
    println!("{}", "Optimal Lineup".green().bold());
    println!("{}", "=".repeat(50));
    for slot in SlotKind::ALL {
        for player in result.lineup.get(slot) {
            println!(
                "  {:<5} {:<24} {:<4} {:8.2}",
                slot.label(),
                player.name,
                player.position,
                player.projected_points
            );
        }
    }
    println!("  {:<34} {:8.2}", "Total".bold(), result.lineup_points);

    if !result.bench.is_empty() {
        println!("\n{}", "Bench".blue().bold());
        for player in &result.bench {
            println!("  {:<5} {:<24} {:<4} {:8.2}", "", player.name, player.position, player.projected_points);
        }
    }

    if !result.analysis.recommendations.is_empty() {
        println!("\n{}", "Recommendations".yellow().bold());
        for recommendation in &result.analysis.recommendations {
            println!("  - {}", recommendation.message);
        }
    }
}

fn print_report(report: &LeagueReport) {
    println!("{}", "League Grades".cyan().bold());
    println!("{}", "=".repeat(50));
    println!("Rank Team                     Grade  Score");
    for team in &report.teams {
        let grade = team.grade.overall.grade.to_string();
        println!(
            "{:4} {:<24} {:<6} {:6.2}",
            team.rank,
            team.team_name,
            grade.bold(),
            team.grade.overall.score
        );
    }
    println!("League average: {:.2}", report.average_score);

    for team in &report.teams {
        println!("\n{}", team.team_name.bold());
        for (position, grade) in &team.grade.position_grades {
            println!("  {:<4} {:<3} {:6.2}", position, grade.grade, grade.score);
        }
        for recommendation in &team.grade.recommendations {
            println!("  [{:?}] {}", recommendation.priority, recommendation.message);
        }
        print_warnings(&team.grade.warnings);
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}
