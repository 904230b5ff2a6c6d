use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vorp_engine::{VorpConfig, VorpEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting VORP Engine");

    let config = VorpConfig::from_env()?;
    info!("Season: {}", config.vorp.season);
    info!("Projections: {}", config.paths.projections_path.display());

    let engine = VorpEngine::new(config.clone());

    match engine
        .process_file(&config.paths.projections_path, Some(&config.paths.snapshot_path))
        .await
    {
        Ok(snapshot) => {
            println!(
                "VORP snapshot for {}: {} players scored, {} skipped",
                snapshot.season, snapshot.total_players, snapshot.skipped_players
            );

            let mut ranked: Vec<_> = snapshot.records.iter().collect();
            ranked.sort_by(|a, b| b.normalized_vorp.total_cmp(&a.normalized_vorp));

            println!("\nTop 10 Players by VORP:");
            println!("Rank Name                     Pos  Team Points   VORP     Norm");
            println!("{}", "-".repeat(66));
            for (i, record) in ranked.iter().take(10).enumerate() {
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

            for warning in &snapshot.warnings {
                println!("warning: {warning}");
            }
        }
        Err(e) => {
            error!("Failed to process VORP: {:#}", e);
            return Err(e);
        }
    }

    info!("VORP Engine processing completed");
    Ok(())
}
