#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod enemies;
mod pickups;
mod player;

use maze_chase_core::{
    Collider, Command, Event, IgnoredCollision, LevelId, LevelLayout, Outcome, PickupKind,
    SoundCue, WELCOME_BANNER,
};
use tracing::{debug, trace, warn};

use enemies::EnemyRoster;
use pickups::PickupField;
use player::PlayerStatus;

pub use pickups::PickupRegistry;

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    level: Option<LevelId>,
    player: Option<PlayerStatus>,
    pickups: PickupField,
    enemies: EnemyRoster,
    tick_index: u64,
}

impl World {
    /// Creates an empty world; a level must be loaded before play starts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            level: None,
            player: None,
            pickups: PickupField::default(),
            enemies: EnemyRoster::default(),
            tick_index: 0,
        }
    }

    fn load_level(&mut self, level: LevelId, layout: LevelLayout, out_events: &mut Vec<Event>) {
        self.level = Some(level);
        self.tick_index = 0;
        self.player = layout.player.map(PlayerStatus::spawn);
        self.pickups.reset(&layout.pickups);
        self.enemies.reset(&layout.enemies);

        let pickups = self.pickups.registry().remaining();
        if pickups == 0 {
            warn!(
                level = level.get(),
                "level contains no pickups; victory cannot be reached"
            );
        }
        out_events.push(Event::LevelLoaded { level, pickups });

        match &self.player {
            Some(player) => out_events.push(Event::PlayerSpawned {
                position: player.snapshot().position,
            }),
            None => warn!(level = level.get(), "level contains no player"),
        }

        for (enemy, position, home) in self.enemies.iter_spawned() {
            out_events.push(Event::EnemySpawned {
                enemy,
                position,
                home,
            });
        }
    }

    fn resolve_collision(&mut self, collider: Collider, out_events: &mut Vec<Event>) {
        let Some(player) = self.player.as_mut() else {
            ignore(collider, IgnoredCollision::NoPlayer, out_events);
            return;
        };

        if player.is_terminal() {
            ignore(collider, IgnoredCollision::Terminal, out_events);
            return;
        }

        match collider {
            Collider::Pickup(pickup) => {
                let Some(consumed) = self.pickups.consume(pickup) else {
                    ignore(collider, IgnoredCollision::UnknownEntity, out_events);
                    return;
                };

                let registry = self.pickups.registry();
                out_events.push(Event::PickupConsumed {
                    pickup,
                    kind: consumed.kind,
                    remaining: registry.remaining(),
                });
                out_events.push(Event::CueRequested {
                    cue: SoundCue::PickupCollected,
                });
                trace!(
                    pickup = pickup.get(),
                    remaining = registry.remaining(),
                    "pickup consumed"
                );

                if consumed.kind == PickupKind::Power {
                    player.start_empowerment(out_events);
                }

                if registry.is_exhausted() {
                    let _ = player.conclude(Outcome::Victory, out_events);
                }
            }
            Collider::Enemy(enemy) => {
                if !self.enemies.contains(enemy) {
                    ignore(collider, IgnoredCollision::UnknownEntity, out_events);
                    return;
                }

                if player.is_empowered() {
                    debug!(
                        enemy = enemy.get(),
                        position = ?player.position(),
                        "enemy repelled by empowered player"
                    );
                    out_events.push(Event::EnemyRepelled { enemy });
                } else {
                    let _ = player.conclude(Outcome::Defeat, out_events);
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level, layout } => world.load_level(level, layout, out_events),
        Command::Tick { dt, input } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            if let Some(player) = world.player.as_mut() {
                player.tick(dt, input, out_events);
            }
        }
        Command::Collide { collider } => world.resolve_collision(collider, out_events),
        Command::StartEmpowerment => match world.player.as_mut() {
            Some(player) => player.start_empowerment(out_events),
            None => trace!("empowerment requested without a player"),
        },
        Command::SetEnemyDestination { enemy, destination } => {
            if world.enemies.set_destination(enemy, destination) {
                out_events.push(Event::EnemyRetargeted { enemy, destination });
            }
        }
        Command::RelocateEnemy { enemy, position } => {
            if !world.enemies.relocate(enemy, position) {
                trace!(enemy = enemy.get(), "relocation for unknown enemy ignored");
            }
        }
    }
}

fn ignore(collider: Collider, reason: IgnoredCollision, out_events: &mut Vec<Event>) {
    trace!(?collider, ?reason, "collision ignored");
    out_events.push(Event::CollisionIgnored { collider, reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{EnemyView, LevelId, Outcome, PickupSnapshot, PlayerSnapshot};

    use super::{PickupRegistry, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Identifier of the level currently loaded, if any.
    #[must_use]
    pub fn level(world: &World) -> Option<LevelId> {
        world.level
    }

    /// Number of ticks processed since the current level was loaded.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's status, if the level has a player.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        world.player.as_ref().map(|player| player.snapshot())
    }

    /// Outcome of the current level instance.
    #[must_use]
    pub fn outcome(world: &World) -> Outcome {
        world
            .player
            .as_ref()
            .map_or(Outcome::Ongoing, |player| player.snapshot().outcome)
    }

    /// Copy of the pickup registry for the current level.
    #[must_use]
    pub fn pickup_registry(world: &World) -> PickupRegistry {
        world.pickups.registry()
    }

    /// Pickups that have not been consumed yet, ordered by identifier.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<PickupSnapshot> {
        world.pickups.snapshots()
    }

    /// Captures a read-only view of the enemies in the level.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        world.enemies.view()
    }
}
