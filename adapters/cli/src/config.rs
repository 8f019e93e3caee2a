//! TOML game configuration: tuning, scene table, and level layouts.

use std::{collections::BTreeSet, fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use maze_chase_core::{
    EnemySpawn, LevelId, LevelLayout, PickupKind, PickupSpawn, PlayerSpawn, SceneId,
};
use maze_chase_system_outcome::VictoryRoutes;
use serde::Deserialize;
use thiserror::Error;

/// Level whose victory scene doubles as the fallback when none is configured.
const FALLBACK_SOURCE_LEVEL: LevelId = LevelId::new(1);

/// Errors detected while parsing or validating the game configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("could not parse game config: {0}")]
    Parse(#[from] toml::de::Error),
    /// No fallback victory scene was configured and level 1 has no route.
    #[error("no fallback victory scene configured and level 1 has no victory route")]
    MissingFallback,
    /// The same level appears twice in the victory table.
    #[error("level {} has more than one victory route", .0.get())]
    DuplicateVictoryRoute(LevelId),
    /// The same level layout is declared twice.
    #[error("level {} is declared more than once", .0.get())]
    DuplicateLevel(LevelId),
    /// A tuning value that must be positive was zero, negative, or not finite.
    #[error("tuning value `{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the document.
        value: f32,
    },
    /// A duration in seconds does not fit the clock's range.
    #[error("tuning value `{field}` is out of range, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the document.
        value: f32,
    },
    /// The requested level has no layout.
    #[error("level {} has no layout in the game config", .0.get())]
    UnknownLevel(LevelId),
}

/// Parsed and validated game configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GameConfig {
    defeat_scene: SceneId,
    #[serde(default)]
    fallback_victory_scene: Option<SceneId>,
    #[serde(default)]
    tuning: Tuning,
    #[serde(default)]
    victory: Vec<VictoryEntry>,
    #[serde(default)]
    levels: Vec<LevelEntry>,
}

/// Per-game tuning knobs.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Tuning {
    move_speed: f32,
    empowerment_secs: f32,
    enemy_speed: f32,
    contact_radius: f32,
    fade_secs: f32,
    #[serde(skip)]
    empowerment_duration: Duration,
    #[serde(skip)]
    fade_duration: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            empowerment_secs: 10.0,
            enemy_speed: 3.0,
            contact_radius: 0.5,
            fade_secs: 0.5,
            empowerment_duration: Duration::from_secs(10),
            fade_duration: Duration::from_millis(500),
        }
    }
}

impl Tuning {
    pub(crate) fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }

    pub(crate) fn contact_radius(&self) -> f32 {
        self.contact_radius
    }

    pub(crate) fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    /// Checks every knob and converts the second counts into durations.
    fn validate(&mut self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("move_speed", self.move_speed),
            ("empowerment_secs", self.empowerment_secs),
            ("enemy_speed", self.enemy_speed),
            ("contact_radius", self.contact_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.fade_secs.is_finite() && self.fade_secs >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "fade_secs",
                value: self.fade_secs,
            });
        }
        self.empowerment_duration = seconds("empowerment_secs", self.empowerment_secs)?;
        self.fade_duration = seconds("fade_secs", self.fade_secs)?;
        Ok(())
    }
}

fn seconds(field: &'static str, value: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(value).map_err(|_| ConfigError::OutOfRange { field, value })
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VictoryEntry {
    level: LevelId,
    scene: SceneId,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelEntry {
    id: LevelId,
    #[serde(default)]
    player: Option<[f32; 2]>,
    #[serde(default)]
    pickups: Vec<PickupEntry>,
    #[serde(default)]
    enemies: Vec<EnemyEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PickupEntry {
    position: [f32; 2],
    #[serde(default = "ordinary")]
    kind: PickupKind,
}

fn ordinary() -> PickupKind {
    PickupKind::Ordinary
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EnemyEntry {
    position: [f32; 2],
    home: [f32; 2],
}

impl GameConfig {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read game config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid game config at {}", path.display()))
    }

    /// Parses and validates a configuration document.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        self.tuning.validate()?;

        let mut routed = BTreeSet::new();
        for entry in &self.victory {
            if !routed.insert(entry.level) {
                return Err(ConfigError::DuplicateVictoryRoute(entry.level));
            }
        }

        let mut declared = BTreeSet::new();
        for level in &self.levels {
            if !declared.insert(level.id) {
                return Err(ConfigError::DuplicateLevel(level.id));
            }
        }

        let _ = self.fallback_victory_scene()?;
        Ok(())
    }

    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub(crate) fn defeat_scene(&self) -> SceneId {
        self.defeat_scene
    }

    /// Fallback scene: the configured one, otherwise level 1's victory scene.
    fn fallback_victory_scene(&self) -> Result<SceneId, ConfigError> {
        self.fallback_victory_scene
            .or_else(|| {
                self.victory
                    .iter()
                    .find(|entry| entry.level == FALLBACK_SOURCE_LEVEL)
                    .map(|entry| entry.scene)
            })
            .ok_or(ConfigError::MissingFallback)
    }

    /// Builds the router table from the configured routes.
    pub(crate) fn victory_routes(&self) -> Result<VictoryRoutes, ConfigError> {
        let routes = self
            .victory
            .iter()
            .fold(VictoryRoutes::new(self.fallback_victory_scene()?), |routes, entry| {
                routes.with_route(entry.level, entry.scene)
            });
        Ok(routes)
    }

    /// Builds the starting layout for `level`.
    pub(crate) fn layout(&self, level: LevelId) -> Result<LevelLayout, ConfigError> {
        let entry = self
            .levels
            .iter()
            .find(|entry| entry.id == level)
            .ok_or(ConfigError::UnknownLevel(level))?;

        let player = entry.player.map(|position| PlayerSpawn {
            position: Vec2::from(position),
            move_speed: self.tuning.move_speed,
            empowerment_duration: self.tuning.empowerment_duration,
        });

        Ok(LevelLayout {
            player,
            pickups: entry
                .pickups
                .iter()
                .map(|pickup| PickupSpawn {
                    position: Vec2::from(pickup.position),
                    kind: pickup.kind,
                })
                .collect(),
            enemies: entry
                .enemies
                .iter()
                .map(|enemy| EnemySpawn {
                    position: Vec2::from(enemy.position),
                    home: Vec2::from(enemy.home),
                })
                .collect(),
        })
    }
}
