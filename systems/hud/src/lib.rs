#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure presentation system that summarises the world for display.

use std::{fmt, time::Duration};

use maze_chase_core::{LevelId, Outcome};
use maze_chase_world::{query, World};

/// Blink toggles per second while the player is empowered.
const BLINK_RATE_HZ: f32 = 5.0;

/// Produces read-only presentation data for adapters.
#[derive(Debug, Default)]
pub struct Hud;

impl Hud {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Captures the status line for the current tick.
    #[must_use]
    pub fn status(&self, world: &World) -> HudStatus {
        let registry = query::pickup_registry(world);
        let player = query::player(world);
        HudStatus {
            level: query::level(world),
            remaining_pickups: registry.remaining(),
            empowered: player.is_some_and(|player| player.empowered),
            empowerment_remaining: player
                .map_or(Duration::ZERO, |player| player.empowerment_remaining()),
            outcome: query::outcome(world),
            player_visible: player.is_some_and(|player| {
                player.active
                    && (!player.empowered || blink_visible(player.empowerment_elapsed))
            }),
        }
    }
}

/// Snapshot of everything the heads-up display shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudStatus {
    /// Level currently loaded.
    pub level: Option<LevelId>,
    /// Pickups left to collect.
    pub remaining_pickups: u32,
    /// Whether the player is empowered.
    pub empowered: bool,
    /// Time left in the empowerment window.
    pub empowerment_remaining: Duration,
    /// Outcome of the level instance.
    pub outcome: Outcome,
    /// Whether the player sprite is drawn this frame.
    pub player_visible: bool,
}

impl fmt::Display for HudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "level {}", level.get())?,
            None => write!(f, "no level")?,
        }
        write!(f, " | pickups {}", self.remaining_pickups)?;
        if self.empowered {
            write!(
                f,
                " | empowered {:.1}s",
                self.empowerment_remaining.as_secs_f32()
            )?;
        }
        match self.outcome {
            Outcome::Ongoing => Ok(()),
            Outcome::Victory => write!(f, " | victory"),
            Outcome::Defeat => write!(f, " | defeat"),
        }
    }
}

/// Blink phase of the empowered player: visible on even half-periods.
#[must_use]
pub fn blink_visible(elapsed: Duration) -> bool {
    let phase = (elapsed.as_secs_f32() * BLINK_RATE_HZ).round() as u64;
    phase % 2 == 0
}
