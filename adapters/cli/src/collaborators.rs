//! Headless stand-ins for input, navigation, physics, and audio.

use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{AudioCues, Collider, Command, Event, MoveInput, SoundCue};
use maze_chase_world::{query, World};
use tracing::info;

/// Steers the player toward the nearest remaining pickup.
#[derive(Debug, Default)]
pub(crate) struct Autopilot;

impl Autopilot {
    /// Samples the movement axes for the next tick.
    pub(crate) fn sample(&self, world: &World) -> MoveInput {
        let Some(player) = query::player(world).filter(|player| player.active) else {
            return MoveInput::default();
        };

        query::pickups(world)
            .into_iter()
            .map(|pickup| pickup.position - player.position)
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
            .map_or_else(MoveInput::default, |offset| {
                MoveInput::new(offset.x, offset.y)
            })
    }
}

/// Moves every enemy toward its destination at a constant speed.
#[derive(Debug)]
pub(crate) struct StraightLineNavigator {
    speed: f32,
}

impl StraightLineNavigator {
    pub(crate) fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Emits relocation commands for enemies that still have ground to cover.
    pub(crate) fn advance(&self, world: &World, dt: Duration, out: &mut Vec<Command>) {
        let step = self.speed * dt.as_secs_f32();
        for enemy in query::enemy_view(world).iter() {
            let Some(destination) = enemy.destination else {
                continue;
            };
            let offset = destination - enemy.position;
            if offset == Vec2::ZERO {
                continue;
            }
            let position = if offset.length() <= step {
                destination
            } else {
                enemy.position + offset.normalize_or_zero() * step
            };
            out.push(Command::RelocateEnemy {
                enemy: enemy.id,
                position,
            });
        }
    }
}

/// Reports overlaps between the player and anything within reach.
#[derive(Debug)]
pub(crate) struct ProximityOverlaps {
    radius: f32,
}

impl ProximityOverlaps {
    pub(crate) fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Emits one collision command per overlapping entity, pickups first.
    pub(crate) fn detect(&self, world: &World, out: &mut Vec<Command>) {
        let Some(player) = query::player(world).filter(|player| player.active) else {
            return;
        };
        let touches = |position: Vec2| position.distance(player.position) <= self.radius;

        for pickup in query::pickups(world) {
            if touches(pickup.position) {
                out.push(Command::Collide {
                    collider: Collider::Pickup(pickup.id),
                });
            }
        }
        for enemy in query::enemy_view(world).iter() {
            if touches(enemy.position) {
                out.push(Command::Collide {
                    collider: Collider::Enemy(enemy.id),
                });
            }
        }
    }
}

/// Audio sink that logs cues instead of playing them.
#[derive(Debug, Default)]
pub(crate) struct LoggingAudio {
    played: u32,
}

impl LoggingAudio {
    /// Forwards every cue requested in `events`.
    pub(crate) fn play_requested(&mut self, events: &[Event]) {
        for event in events {
            if let Event::CueRequested { cue } = event {
                self.play_cue(*cue);
            }
        }
    }

    pub(crate) fn played(&self) -> u32 {
        self.played
    }
}

impl AudioCues for LoggingAudio {
    fn play_cue(&mut self, cue: SoundCue) {
        self.played += 1;
        info!(?cue, "cue");
    }
}
