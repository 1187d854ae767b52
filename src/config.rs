//! Startup configuration. Every field has a default, so an empty or partial
//! TOML file is valid.

use color_eyre::eyre::{Result, WrapErr, ensure};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    /// Fixed simulation steps per second
    pub tick_rate: u32,
    pub player: PlayerConfig,
    pub laser: LaserConfig,
    pub enemies: EnemyConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    pub speed: f32,
    /// Lasers allowed on screen at once
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    /// Initial speed; ships start moving left
    pub speed: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub step_y: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub dir: PathBuf,
    pub player: String,
    pub laser: String,
    pub enemy: String,
    /// Played on every successful shot when built with the `audio` feature
    pub laser_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tick_rate: 60,
            player: PlayerConfig::default(),
            laser: LaserConfig::default(),
            enemies: EnemyConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { speed: 200.0 }
    }
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            speed: 200.0,
            capacity: 3,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 3,
            speed: 250.0,
            start_x: 100.0,
            start_y: 50.0,
            step_y: 100.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            player: "player.png".to_string(),
            laser: "playerLaser.png".to_string(),
            enemy: "enemy.png".to_string(),
            laser_sound: "laser.wav".to_string(),
        }
    }
}

impl GameConfig {
    /// Reads and validates a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_toml(&content)
            .wrap_err_with(|| format!("invalid config '{}'", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world.width > 0.0 && self.world.height > 0.0,
            "world size must be positive, got {}x{}",
            self.world.width,
            self.world.height
        );
        ensure!(self.tick_rate > 0, "tick_rate must be at least 1");
        ensure!(self.laser.capacity > 0, "laser.capacity must be at least 1");
        Ok(())
    }

    /// Player spawn point: horizontally centred, near the bottom
    pub fn player_start(&self) -> (f32, f32) {
        (self.world.width / 2.0, self.world.height / 1.2)
    }

    /// Horizontal spacing that spreads the enemy row across the world
    pub fn enemy_step_x(&self) -> f32 {
        self.world.width / self.enemies.count.max(1) as f32
    }

    pub fn asset_path(&self, file: &str) -> PathBuf {
        self.assets.dir.join(file)
    }
}
