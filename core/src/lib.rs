#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond with new command batches or calls into the
//! collaborator traits declared here ([`SceneTransitions`], [`AudioCues`]).

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Empowerment length used when a level does not override it.
pub const DEFAULT_EMPOWERMENT_DURATION: Duration = Duration::from_secs(10);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active level with a fresh instance built from the layout.
    LoadLevel {
        /// Identifier of the level being loaded.
        level: LevelId,
        /// Entities present when the level starts.
        layout: LevelLayout,
    },
    /// Advances the simulation clock and integrates player motion.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Movement axes sampled for this tick.
        input: MoveInput,
    },
    /// Delivers an overlap between the player and another entity.
    Collide {
        /// Entity the player touched.
        collider: Collider,
    },
    /// Starts (or restarts) the player's empowerment timer.
    StartEmpowerment,
    /// Records the point an enemy should travel toward.
    SetEnemyDestination {
        /// Enemy receiving the destination.
        enemy: EnemyId,
        /// Destination expressed in world units.
        destination: Vec2,
    },
    /// Reports the position an enemy reached after external navigation.
    RelocateEnemy {
        /// Enemy that moved.
        enemy: EnemyId,
        /// New position expressed in world units.
        position: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new level instance replaced the previous one.
    LevelLoaded {
        /// Identifier of the loaded level.
        level: LevelId,
        /// Number of pickups present at level start.
        pickups: u32,
    },
    /// Confirms that the player entered the level.
    PlayerSpawned {
        /// Starting position of the player.
        position: Vec2,
    },
    /// Confirms that an enemy entered the level.
    EnemySpawned {
        /// Identifier allocated to the enemy.
        enemy: EnemyId,
        /// Starting position of the enemy.
        position: Vec2,
        /// Point the enemy retreats to while the player is empowered.
        home: Vec2,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved during a tick.
    PlayerMoved {
        /// Position before integration.
        from: Vec2,
        /// Position after integration.
        to: Vec2,
    },
    /// Confirms that a pickup was consumed and removed from the level.
    PickupConsumed {
        /// Identifier of the consumed pickup.
        pickup: PickupId,
        /// Variant of the consumed pickup.
        kind: PickupKind,
        /// Pickups left in the level after consumption.
        remaining: u32,
    },
    /// Requests a fire-and-forget sound cue.
    CueRequested {
        /// Cue that should be played.
        cue: SoundCue,
    },
    /// Announces that empowerment started or restarted.
    EmpowermentStarted {
        /// Length of the empowerment window.
        duration: Duration,
    },
    /// Announces that empowerment ran out.
    EmpowermentExpired,
    /// Reports an enemy contact while the player was empowered.
    EnemyRepelled {
        /// Enemy the player touched.
        enemy: EnemyId,
    },
    /// Announces that the player was removed from the simulation.
    PlayerDeactivated,
    /// Announces that the level reached a terminal outcome.
    OutcomeDecided {
        /// Terminal outcome of the level instance.
        outcome: Outcome,
    },
    /// Confirms that an enemy received a different destination.
    EnemyRetargeted {
        /// Enemy whose destination changed.
        enemy: EnemyId,
        /// Destination the enemy now travels toward.
        destination: Vec2,
    },
    /// Reports that a collision was discarded without effect.
    CollisionIgnored {
        /// Entity named by the collision.
        collider: Collider,
        /// Specific reason the collision was ignored.
        reason: IgnoredCollision,
    },
}

/// Two independent movement axes sampled from the input device.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    /// Horizontal axis in the range -1.0..=1.0.
    pub horizontal: f32,
    /// Depth axis in the range -1.0..=1.0.
    pub depth: f32,
}

impl MoveInput {
    /// Creates a new input sample from raw axis values.
    #[must_use]
    pub const fn new(horizontal: f32, depth: f32) -> Self {
        Self { horizontal, depth }
    }

    /// Planar direction described by the axes, normalized when non-zero.
    #[must_use]
    pub fn direction(self) -> Vec2 {
        Vec2::new(self.horizontal, self.depth).normalize_or_zero()
    }
}

/// Entity the player may collide with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collider {
    /// A collectible pickup.
    Pickup(PickupId),
    /// A pursuing enemy.
    Enemy(EnemyId),
}

/// Reasons a collision may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoredCollision {
    /// No level is loaded or the level has no player.
    NoPlayer,
    /// The level already reached a terminal outcome.
    Terminal,
    /// The named entity does not exist, typically because it was consumed.
    UnknownEntity,
}

/// Variants of collectible pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    /// Plain pickup that only counts toward victory.
    Ordinary,
    /// Pickup that additionally starts empowerment.
    Power,
}

/// Sound cues the world may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A pickup was collected.
    PickupCollected,
}

/// Level-wide outcome; anything other than `Ongoing` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The level is still being played.
    #[default]
    Ongoing,
    /// Every pickup was collected.
    Victory,
    /// The player touched an enemy while not empowered.
    Defeat,
}

impl Outcome {
    /// Reports whether the outcome ends the level instance.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Identifier of a level, matching the build index of its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a scene understood by the scene transition service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(u32);

impl SceneId {
    /// Creates a new scene identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Entities placed in a level when it starts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelLayout {
    /// Player placement, absent for levels without a player.
    pub player: Option<PlayerSpawn>,
    /// Pickups scattered through the maze.
    pub pickups: Vec<PickupSpawn>,
    /// Enemies hunting the player.
    pub enemies: Vec<EnemySpawn>,
}

/// Starting state of the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSpawn {
    /// Starting position.
    pub position: Vec2,
    /// Speed in world units per second.
    pub move_speed: f32,
    /// Length of each empowerment window.
    pub empowerment_duration: Duration,
}

impl PlayerSpawn {
    /// Creates a player spawn using the default empowerment duration.
    #[must_use]
    pub const fn new(position: Vec2, move_speed: f32) -> Self {
        Self {
            position,
            move_speed,
            empowerment_duration: DEFAULT_EMPOWERMENT_DURATION,
        }
    }
}

/// Placement of a single pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSpawn {
    /// Position of the pickup.
    pub position: Vec2,
    /// Variant of the pickup.
    pub kind: PickupKind,
}

/// Placement of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Starting position of the enemy.
    pub position: Vec2,
    /// Retreat point of the enemy.
    pub home: Vec2,
}

/// Immutable representation of the player's status used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position.
    pub position: Vec2,
    /// Velocity applied during the last tick.
    pub velocity: Vec2,
    /// Whether the player is currently empowered.
    pub empowered: bool,
    /// Time spent in the current empowerment window.
    pub empowerment_elapsed: Duration,
    /// Length of an empowerment window.
    pub empowerment_duration: Duration,
    /// Whether the player still takes part in the simulation.
    pub active: bool,
    /// Outcome of the level instance.
    pub outcome: Outcome,
}

impl PlayerSnapshot {
    /// Time left before empowerment expires, zero when not empowered.
    #[must_use]
    pub fn empowerment_remaining(&self) -> Duration {
        if self.empowered {
            self.empowerment_duration
                .saturating_sub(self.empowerment_elapsed)
        } else {
            Duration::ZERO
        }
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier assigned to the enemy.
    pub id: EnemyId,
    /// Current position.
    pub position: Vec2,
    /// Retreat point.
    pub home: Vec2,
    /// Destination handed to the navigation service, if any.
    pub destination: Option<Vec2>,
}

/// Read-only snapshot describing all enemies in the level.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Finds the snapshot captured for the provided enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single remaining pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier assigned to the pickup.
    pub id: PickupId,
    /// Position of the pickup.
    pub position: Vec2,
    /// Variant of the pickup.
    pub kind: PickupKind,
}

/// Scene transition collaborator that performs its own fade and load.
pub trait SceneTransitions {
    /// Requests a change to the provided scene. Fire-and-forget.
    fn request_scene_change(&mut self, scene: SceneId);
}

/// Audio collaborator that plays one-shot cues.
pub trait AudioCues {
    /// Plays the provided cue. Fire-and-forget.
    fn play_cue(&mut self, cue: SoundCue);
}
