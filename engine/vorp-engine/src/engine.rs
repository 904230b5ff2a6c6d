use anyhow::Context;
use player_registry::{PlayerProjection, ProjectionSet};
use std::path::Path;
use tracing::info;

use crate::{
    calculator::VorpCalculator,
    config::VorpConfig,
    models::VorpSnapshot,
};

/// File-driven wrapper around the VORP calculator
///
/// Reads a projection set from disk, regenerates every record from scratch,
/// and writes the resulting snapshot back out as JSON.
pub struct VorpEngine {
    config: VorpConfig,
    calculator: VorpCalculator,
}

impl VorpEngine {
    pub fn new(config: VorpConfig) -> Self {
        let calculator = VorpCalculator::new(config.clone());
        Self { config, calculator }
    }

    pub fn config(&self) -> &VorpConfig {
        &self.config
    }

    pub fn calculator(&self) -> &VorpCalculator {
        &self.calculator
    }

    /// Compute a snapshot from in-memory projections
    pub fn process(&self, projections: &[PlayerProjection]) -> VorpSnapshot {
        info!("Processing VORP for {} projections", projections.len());
        let calculation = self.calculator.calculate(projections);
        let snapshot = self.calculator.build_snapshot(calculation);

        for (position, stats) in &snapshot.position_stats {
            info!(
                "{}: baseline {:.2}, {} players, VORP range {:.2}..{:.2}",
                position, stats.baseline, stats.player_count, stats.min_vorp, stats.max_vorp
            );
        }

        snapshot
    }

    /// Load projections from `input`, compute, and write the snapshot to
    /// `output` when given
    pub async fn process_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> anyhow::Result<VorpSnapshot> {
        let projections = ProjectionSet::load_from_file(input)
            .await
            .with_context(|| format!("Failed to load projections from {}", input.display()))?;

        let snapshot = self.process(&projections.players);

        if let Some(output) = output {
            Self::write_snapshot(output, &snapshot).await?;
        }

        Ok(snapshot)
    }

    /// Write a snapshot as pretty JSON, creating parent directories
    pub async fn write_snapshot(path: &Path, snapshot: &VorpSnapshot) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;

        info!("Wrote VORP snapshot with {} records to {}", snapshot.total_players, path.display());
        Ok(())
    }

    /// Read a previously written snapshot
    pub async fn load_snapshot(path: &Path) -> anyhow::Result<VorpSnapshot> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
        let snapshot: VorpSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Malformed snapshot in {}", path.display()))?;
        Ok(snapshot)
    }
}
