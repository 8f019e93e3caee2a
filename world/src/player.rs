//! Player locomotion, empowerment timer, and terminal outcome latch.

use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{Event, MoveInput, Outcome, PlayerSnapshot, PlayerSpawn};
use tracing::{debug, info};

/// Authoritative status of the player within a level instance.
///
/// Every mutation is gated on the outcome latch: once the level reaches
/// victory or defeat the status is frozen until the level is replaced.
#[derive(Clone, Debug)]
pub(crate) struct PlayerStatus {
    position: Vec2,
    velocity: Vec2,
    move_speed: f32,
    empowered: bool,
    empowerment_elapsed: Duration,
    empowerment_duration: Duration,
    active: bool,
    outcome: Outcome,
}

impl PlayerStatus {
    /// Creates the player described by the level layout.
    pub(crate) fn spawn(spawn: PlayerSpawn) -> Self {
        Self {
            position: spawn.position,
            velocity: Vec2::ZERO,
            move_speed: spawn.move_speed,
            empowered: false,
            empowerment_elapsed: Duration::ZERO,
            empowerment_duration: spawn.empowerment_duration,
            active: true,
            outcome: Outcome::Ongoing,
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn is_empowered(&self) -> bool {
        self.empowered
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Integrates motion and advances the empowerment timer for one tick.
    pub(crate) fn tick(&mut self, dt: Duration, input: MoveInput, out_events: &mut Vec<Event>) {
        if self.is_terminal() {
            return;
        }

        self.velocity = input.direction() * self.move_speed;
        if self.velocity != Vec2::ZERO {
            let from = self.position;
            self.position += self.velocity * dt.as_secs_f32();
            out_events.push(Event::PlayerMoved {
                from,
                to: self.position,
            });
        }

        if !self.empowered {
            return;
        }

        self.empowerment_elapsed = self.empowerment_elapsed.saturating_add(dt);
        if self.empowerment_elapsed >= self.empowerment_duration {
            self.empowered = false;
            self.empowerment_elapsed = Duration::ZERO;
            debug!("empowerment expired");
            out_events.push(Event::EmpowermentExpired);
        }
    }

    /// Starts empowerment, restarting the timer when already empowered.
    pub(crate) fn start_empowerment(&mut self, out_events: &mut Vec<Event>) {
        if self.is_terminal() {
            return;
        }

        self.empowered = true;
        self.empowerment_elapsed = Duration::ZERO;
        debug!(duration = ?self.empowerment_duration, "empowerment started");
        out_events.push(Event::EmpowermentStarted {
            duration: self.empowerment_duration,
        });
    }

    /// Latches a terminal outcome. Returns `false` if one was already latched.
    pub(crate) fn conclude(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) -> bool {
        if self.is_terminal() || !outcome.is_terminal() {
            return false;
        }

        self.outcome = outcome;
        self.velocity = Vec2::ZERO;
        if outcome == Outcome::Defeat {
            self.active = false;
            out_events.push(Event::PlayerDeactivated);
        }
        info!(?outcome, "level outcome decided");
        out_events.push(Event::OutcomeDecided { outcome });
        true
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.position,
            velocity: self.velocity,
            empowered: self.empowered,
            empowerment_elapsed: self.empowerment_elapsed,
            empowerment_duration: self.empowerment_duration,
            active: self.active,
            outcome: self.outcome,
        }
    }
}
