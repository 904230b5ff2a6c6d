use crate::error::{Result, VorpError};
use player_registry::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for the VORP engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VorpConfig {
    /// Baseline and normalization parameters
    pub vorp: VorpParameters,

    /// Input and output locations for the file-driven engine
    pub paths: PathConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VorpParameters {
    /// Current season (e.g., 2025)
    pub season: i32,

    /// Pool size for positions missing from `pool_sizes`
    pub default_pool_size: usize,

    /// Normalized score handed to every player when all VORP scores are equal
    pub degenerate_normalized_score: f64,

    /// Fantasy-relevant pool size per position; the baseline is the median
    /// of the top N projections
    pub pool_sizes: BTreeMap<Position, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Projection set JSON read by the binary
    pub projections_path: PathBuf,

    /// Where the VORP snapshot JSON is written
    pub snapshot_path: PathBuf,
}

impl Default for VorpConfig {
    fn default() -> Self {
        let mut pool_sizes = BTreeMap::new();
        pool_sizes.insert(Position::QB, 32);
        pool_sizes.insert(Position::RB, 70);
        pool_sizes.insert(Position::WR, 80);
        pool_sizes.insert(Position::TE, 24);
        pool_sizes.insert(Position::K, 32);
        pool_sizes.insert(Position::DEF, 32);

        Self {
            vorp: VorpParameters {
                season: 2025,
                default_pool_size: 32,
                degenerate_normalized_score: 50.0,
                pool_sizes,
            },
            paths: PathConfig {
                projections_path: PathBuf::from("data/players/season_projections_2025.json"),
                snapshot_path: PathBuf::from("data/vorp/vorp_snapshot_2025.json"),
            },
        }
    }
}

impl VorpConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(season) = std::env::var("VORP_SEASON") {
            config.vorp.season = season.parse().map_err(|_| {
                VorpError::Configuration(format!("VORP_SEASON must be a year, got '{season}'"))
            })?;
        }

        if let Ok(path) = std::env::var("VORP_PROJECTIONS_PATH") {
            config.paths.projections_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("VORP_SNAPSHOT_PATH") {
            config.paths.snapshot_path = PathBuf::from(path);
        }

        for position in Position::ALL {
            let key = format!("VORP_POOL_{}", position);
            if let Ok(value) = std::env::var(&key) {
                let size = value.parse().map_err(|_| {
                    VorpError::Configuration(format!("{key} must be a positive integer, got '{value}'"))
                })?;
                config.vorp.pool_sizes.insert(position, size);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VorpConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject pool sizes that would make every baseline meaningless
    pub fn validate(&self) -> Result<()> {
        if self.vorp.default_pool_size == 0 {
            return Err(VorpError::Configuration("default_pool_size must be positive".to_string()));
        }
        if let Some((position, _)) = self.vorp.pool_sizes.iter().find(|(_, size)| **size == 0) {
            return Err(VorpError::Configuration(format!("pool size for {position} must be positive")));
        }
        if !(0.0..=100.0).contains(&self.vorp.degenerate_normalized_score) {
            return Err(VorpError::Configuration(
                "degenerate_normalized_score must lie in [0, 100]".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the pool size for a position
    pub fn get_pool_size_for_position(&self, position: Position) -> usize {
        self.vorp.pool_sizes.get(&position).copied().unwrap_or(self.vorp.default_pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_KEYS: [&str; 2] = ["VORP_SEASON", "VORP_POOL_RB"];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    // Environment is process-wide, so every from_env case lives in this one test
    #[test]
    fn test_from_env_overrides_and_rejects_malformed_values() {
        clear_env();

        std::env::set_var("VORP_SEASON", "2025");
        std::env::set_var("VORP_POOL_RB", "40");
        let config = VorpConfig::from_env().unwrap();
        assert_eq!(config.vorp.season, 2025);
        assert_eq!(config.get_pool_size_for_position(Position::RB), 40);

        std::env::set_var("VORP_SEASON", "next year");
        assert!(matches!(VorpConfig::from_env(), Err(VorpError::Configuration(_))));

        std::env::set_var("VORP_SEASON", "2025");
        std::env::set_var("VORP_POOL_RB", "forty");
        assert!(matches!(VorpConfig::from_env(), Err(VorpError::Configuration(_))));

        clear_env();
    }

    #[test]
    fn test_default_pool_sizes() {
        let config = VorpConfig::default();
        assert_eq!(config.get_pool_size_for_position(Position::QB), 32);
        assert_eq!(config.get_pool_size_for_position(Position::RB), 70);
        assert_eq!(config.get_pool_size_for_position(Position::WR), 80);
        assert_eq!(config.get_pool_size_for_position(Position::TE), 24);
        assert_eq!(config.get_pool_size_for_position(Position::K), 32);
        assert_eq!(config.get_pool_size_for_position(Position::DEF), 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_position_uses_default_pool() {
        let mut config = VorpConfig::default();
        config.vorp.pool_sizes.remove(&Position::K);
        config.vorp.default_pool_size = 12;
        assert_eq!(config.get_pool_size_for_position(Position::K), 12);
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut config = VorpConfig::default();
        config.vorp.pool_sizes.insert(Position::TE, 0);
        assert!(matches!(config.validate(), Err(VorpError::Configuration(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vorp.toml");

        let mut config = VorpConfig::default();
        config.vorp.season = 2026;
        config.vorp.pool_sizes.insert(Position::WR, 60);
        config.save_to_file(&path).unwrap();

        let loaded = VorpConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.vorp.season, 2026);
        assert_eq!(loaded.get_pool_size_for_position(Position::WR), 60);
    }
}
