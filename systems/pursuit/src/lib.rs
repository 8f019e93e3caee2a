#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reactive pursuit system that chooses enemy destinations from the player's status.
//!
//! Every agent is a pure function of the current player snapshot: the player's
//! position while the player is vulnerable, the agent's home while the player
//! is empowered. Agents keep no timers and never coordinate, so several agents
//! reading the same snapshot always agree with the player's current status.

use glam::Vec2;
use maze_chase_core::{Command, EnemyId, Event, PlayerSnapshot};
use thiserror::Error;
use tracing::{debug, error};

/// Behavioral mode of an agent, derived anew on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentMode {
    /// Chasing the player.
    Pursuing,
    /// Returning home while the player is empowered.
    Retreating,
}

impl AgentMode {
    /// Mode every agent adopts for the provided empowerment flag.
    #[must_use]
    pub const fn for_empowerment(empowered: bool) -> Self {
        if empowered {
            Self::Retreating
        } else {
            Self::Pursuing
        }
    }
}

/// Reasons an agent could not be bound to its dependencies.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PursuitError {
    /// The level has no player, so no destination can ever be computed.
    #[error("enemy {} has no player to pursue", .enemy.get())]
    MissingPlayer {
        /// Enemy that failed to bind.
        enemy: EnemyId,
    },
}

/// Destination selector bound to a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PursuitAgent {
    enemy: EnemyId,
    home: Vec2,
}

impl PursuitAgent {
    /// Binds an agent to its enemy, failing when the level has no player.
    pub fn bind(
        enemy: EnemyId,
        home: Vec2,
        player: Option<&PlayerSnapshot>,
    ) -> Result<Self, PursuitError> {
        if player.is_none() {
            return Err(PursuitError::MissingPlayer { enemy });
        }
        Ok(Self { enemy, home })
    }

    /// Enemy driven by the agent.
    #[must_use]
    pub const fn enemy(&self) -> EnemyId {
        self.enemy
    }

    /// Fixed retreat point of the agent.
    #[must_use]
    pub const fn home(&self) -> Vec2 {
        self.home
    }

    /// Mode the agent adopts for the provided player status.
    #[must_use]
    pub const fn mode(&self, player: &PlayerSnapshot) -> AgentMode {
        AgentMode::for_empowerment(player.empowered)
    }

    /// Destination the agent should travel toward for the provided player status.
    #[must_use]
    pub fn destination(&self, player: &PlayerSnapshot) -> Vec2 {
        match self.mode(player) {
            AgentMode::Pursuing => player.position,
            AgentMode::Retreating => self.home,
        }
    }
}

/// Pursuit system that emits one destination command per bound agent and tick.
#[derive(Debug, Default)]
pub struct Pursuit {
    agents: Vec<PursuitAgent>,
    inert: Vec<EnemyId>,
}

impl Pursuit {
    /// Creates a pursuit system with no bound agents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the player's status to emit destination commands.
    ///
    /// Callers must pass the snapshot taken after the tick's collisions were
    /// applied so that agents react to the freshest status.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: Option<&PlayerSnapshot>,
        out: &mut Vec<Command>,
    ) {
        let mut ticked = false;
        for event in events {
            match event {
                Event::LevelLoaded { .. } => {
                    self.agents.clear();
                    self.inert.clear();
                }
                Event::EnemySpawned { enemy, home, .. } => self.bind(*enemy, *home, player),
                Event::TimeAdvanced { .. } => ticked = true,
                _ => {}
            }
        }

        if !ticked {
            return;
        }

        let Some(player) = player else {
            return;
        };

        out.reserve(self.agents.len());
        for agent in &self.agents {
            out.push(Command::SetEnemyDestination {
                enemy: agent.enemy,
                destination: agent.destination(player),
            });
        }
    }

    /// Agents currently bound to enemies, ordered by spawn.
    #[must_use]
    pub fn agents(&self) -> &[PursuitAgent] {
        &self.agents
    }

    /// Enemies whose agents failed to bind and stay inert.
    #[must_use]
    pub fn inert(&self) -> &[EnemyId] {
        &self.inert
    }

    fn bind(&mut self, enemy: EnemyId, home: Vec2, player: Option<&PlayerSnapshot>) {
        match PursuitAgent::bind(enemy, home, player) {
            Ok(agent) => {
                debug!(enemy = enemy.get(), ?home, "pursuit agent bound");
                self.agents.push(agent);
            }
            Err(bind_error) => {
                error!(%bind_error, "pursuit agent left inert");
                self.inert.push(enemy);
            }
        }
    }
}
