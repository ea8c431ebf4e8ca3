use crate::config::{ChunkSysConfig, GameplayConfig, WorldGenConfig};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Block column the actor spawns at and returns to after a void fall.
    pub spawn_x: i32,
    pub spawn_z: i32,
    /// Spawn height used when the spawn column has no surface yet.
    pub fallback_spawn_y: f32,
    pub chunksys: ChunkSysConfig,
    pub gameplay: GameplayConfig,
    pub worldgen: WorldGenConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_x: 32,
            spawn_z: 32,
            fallback_spawn_y: 80.0,
            chunksys: ChunkSysConfig::default(),
            gameplay: GameplayConfig::default(),
            worldgen: WorldGenConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunksys.load_distance < 1 {
            return Err(ConfigError::Invalid(
                "load_distance must be at least 1".into(),
            ));
        }
        if self.chunksys.unload_margin < 1 {
            return Err(ConfigError::Invalid(
                "unload_margin must be at least 1, or chunks thrash at the load boundary".into(),
            ));
        }
        if self.gameplay.walk_speed <= 0.0 || self.gameplay.gravity <= 0.0 {
            return Err(ConfigError::Invalid(
                "walk_speed and gravity must be positive".into(),
            ));
        }
        if self.gameplay.reach_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "reach_distance must be positive".into(),
            ));
        }
        Ok(())
    }
}
