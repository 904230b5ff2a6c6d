//! League configuration file

use anyhow::{Context, Result};
use grade_engine::LeagueGradingSettings;
use lineup_optimizer::RosterSlotConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the CLI needs to know about a league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub slots: RosterSlotConfig,
    pub grading: LeagueGradingSettings,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        let slots = RosterSlotConfig::default();
        let grading = LeagueGradingSettings::from_slots(12, &slots);
        Self { slots, grading }
    }
}

impl LeagueConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read league config {}", path.display()))?;
        let config: LeagueConfig = toml::from_str(&content)
            .with_context(|| format!("Malformed league config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The file at `path`, or the defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write league config {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.slots.validate()?;
        self.grading.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_registry::ScoringFormat;

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.toml");

        let mut config = LeagueConfig::default();
        config.slots.superflex = true;
        config.grading.is_te_premium = true;
        config.save_to_file(&path).unwrap();

        let loaded = LeagueConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.toml");
        std::fs::write(
            &path,
            "[slots]\nwr = 3\nscoring = \"half\"\n\n[grading]\nteams = 10\ninclude_k = false\n",
        )
        .unwrap();

        let config = LeagueConfig::load_from_file(&path).unwrap();
        assert_eq!(config.slots.wr, 3);
        assert_eq!(config.slots.rb, 2);
        assert_eq!(config.slots.scoring, ScoringFormat::HalfPpr);
        assert_eq!(config.grading.teams, 10);
        assert!(!config.grading.include_k);
    }

    #[test]
    fn test_invalid_scoring_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("league.toml");
        std::fs::write(&path, "[slots]\nscoring = \"six_point_passing\"\n").unwrap();

        assert!(LeagueConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = LeagueConfig::load_or_default(None).unwrap();
        assert_eq!(config, LeagueConfig::default());
        assert_eq!(config.grading.teams, 12);
    }
}
