//! Fixed-step headless session wiring the world, systems, and stand-ins.

use std::time::Duration;

use anyhow::Result;
use maze_chase_core::{Command, Event, LevelId, Outcome, SceneId};
use maze_chase_system_hud::Hud;
use maze_chase_system_outcome::OutcomeRouter;
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World};
use tracing::{debug, info, trace};

use crate::{
    collaborators::{Autopilot, LoggingAudio, ProximityOverlaps, StraightLineNavigator},
    config::GameConfig,
    transition::FadeTransition,
};

/// Summary reported once the session stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SessionSummary {
    pub(crate) ticks: u32,
    pub(crate) outcome: Outcome,
    pub(crate) scene: Option<SceneId>,
    pub(crate) cues: u32,
}

pub(crate) struct Session {
    world: World,
    hud: Hud,
    pursuit: Pursuit,
    router: OutcomeRouter,
    autopilot: Autopilot,
    navigator: StraightLineNavigator,
    overlaps: ProximityOverlaps,
    audio: LoggingAudio,
    transition: FadeTransition,
    dt: Duration,
    ticks: u32,
}

impl Session {
    /// Loads `level` from the configuration and arms every system.
    pub(crate) fn start(config: &GameConfig, level: LevelId, dt: Duration) -> Result<Self> {
        let tuning = config.tuning();
        let mut session = Self {
            world: World::new(),
            hud: Hud,
            pursuit: Pursuit::new(),
            router: OutcomeRouter::new(config.victory_routes()?, config.defeat_scene()),
            autopilot: Autopilot,
            navigator: StraightLineNavigator::new(tuning.enemy_speed()),
            overlaps: ProximityOverlaps::new(tuning.contact_radius()),
            audio: LoggingAudio::default(),
            transition: FadeTransition::new(tuning.fade_duration()),
            dt,
            ticks: 0,
        };

        info!("{}", session.hud.welcome_banner(&session.world));
        let layout = config.layout(level)?;
        let mut events = Vec::new();
        world::apply(
            &mut session.world,
            Command::LoadLevel { level, layout },
            &mut events,
        );
        session.dispatch(&mut events);
        Ok(session)
    }

    /// Runs one simulation step: input, tick, overlaps, systems, navigation, fade.
    pub(crate) fn step(&mut self) {
        let mut events = Vec::new();
        let input = self.autopilot.sample(&self.world);
        world::apply(
            &mut self.world,
            Command::Tick { dt: self.dt, input },
            &mut events,
        );

        let mut collisions = Vec::new();
        self.overlaps.detect(&self.world, &mut collisions);
        for command in collisions {
            world::apply(&mut self.world, command, &mut events);
        }

        self.dispatch(&mut events);

        let mut moves = Vec::new();
        self.navigator.advance(&self.world, self.dt, &mut moves);
        for command in moves {
            world::apply(&mut self.world, command, &mut events);
        }

        self.transition.advance(self.dt);
        self.ticks += 1;

        for event in &events {
            trace!(?event, "world event");
        }
        debug!(
            tick = self.ticks,
            fade = self.transition.alpha(),
            "{}",
            self.hud.status(&self.world)
        );
    }

    /// Steps until a scene finishes loading or `max_ticks` elapse.
    pub(crate) fn run(mut self, max_ticks: u32) -> SessionSummary {
        while self.ticks < max_ticks && self.transition.loaded_scene().is_none() {
            self.step();
        }

        let summary = SessionSummary {
            ticks: self.ticks,
            outcome: query::outcome(&self.world),
            scene: self.transition.loaded_scene(),
            cues: self.audio.played(),
        };
        info!(ticks = summary.ticks, "{}", self.hud.status(&self.world));
        summary
    }

    fn dispatch(&mut self, events: &mut Vec<Event>) {
        let player = query::player(&self.world);
        let mut commands = Vec::new();
        self.pursuit.handle(events, player.as_ref(), &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
        self.router.handle(events, &mut self.transition);
        self.audio.play_requested(events);
    }
}
