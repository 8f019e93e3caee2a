#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Outcome routing system that maps terminal outcomes onto scene requests.

use std::collections::BTreeMap;

use maze_chase_core::{Event, LevelId, Outcome, SceneId, SceneTransitions};
use tracing::{info, warn};

/// Static table from level identifiers to their victory scenes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VictoryRoutes {
    routes: BTreeMap<LevelId, SceneId>,
    fallback: SceneId,
}

impl VictoryRoutes {
    /// Creates an empty table that sends every level to `fallback`.
    #[must_use]
    pub fn new(fallback: SceneId) -> Self {
        Self {
            routes: BTreeMap::new(),
            fallback,
        }
    }

    /// Adds a route, replacing any previous scene for the level.
    #[must_use]
    pub fn with_route(mut self, level: LevelId, scene: SceneId) -> Self {
        let _ = self.routes.insert(level, scene);
        self
    }

    /// Scene mapped to the level, if any.
    #[must_use]
    pub fn lookup(&self, level: LevelId) -> Option<SceneId> {
        self.routes.get(&level).copied()
    }

    /// Scene used for levels without a mapping.
    #[must_use]
    pub const fn fallback(&self) -> SceneId {
        self.fallback
    }
}

/// Routes the end of a level instance to the matching outcome scene.
///
/// The router fires at most once per level instance; it is re-armed when it
/// observes [`Event::LevelLoaded`].
#[derive(Clone, Debug)]
pub struct OutcomeRouter {
    victory: VictoryRoutes,
    defeat_scene: SceneId,
    level: Option<LevelId>,
    routed: Option<SceneId>,
}

impl OutcomeRouter {
    /// Creates a router using the provided victory table and defeat scene.
    #[must_use]
    pub fn new(victory: VictoryRoutes, defeat_scene: SceneId) -> Self {
        Self {
            victory,
            defeat_scene,
            level: None,
            routed: None,
        }
    }

    /// Consumes world events and issues at most one scene request.
    pub fn handle<S>(&mut self, events: &[Event], scenes: &mut S)
    where
        S: SceneTransitions + ?Sized,
    {
        for event in events {
            match event {
                Event::LevelLoaded { level, .. } => {
                    self.level = Some(*level);
                    self.routed = None;
                }
                Event::OutcomeDecided {
                    outcome: Outcome::Victory,
                } => match self.level {
                    Some(level) => self.route_victory(level, scenes),
                    None => {
                        warn!("victory decided before any level was loaded; using fallback scene");
                        self.fire(self.victory.fallback(), scenes);
                    }
                },
                Event::OutcomeDecided {
                    outcome: Outcome::Defeat,
                } => self.route_defeat(scenes),
                _ => {}
            }
        }
    }

    /// Requests the victory scene mapped to `level`.
    ///
    /// Unmapped levels fall back to the table's default scene with a warning.
    pub fn route_victory<S>(&mut self, level: LevelId, scenes: &mut S)
    where
        S: SceneTransitions + ?Sized,
    {
        let scene = match self.victory.lookup(level) {
            Some(scene) => scene,
            None => {
                let fallback = self.victory.fallback();
                warn!(
                    level = level.get(),
                    fallback = fallback.get(),
                    "level has no victory scene; using fallback"
                );
                fallback
            }
        };
        self.fire(scene, scenes);
    }

    /// Requests the defeat scene.
    pub fn route_defeat<S>(&mut self, scenes: &mut S)
    where
        S: SceneTransitions + ?Sized,
    {
        self.fire(self.defeat_scene, scenes);
    }

    /// Scene requested for the current level instance, if any.
    #[must_use]
    pub const fn routed_scene(&self) -> Option<SceneId> {
        self.routed
    }

    /// Reports whether the router already fired for the current level instance.
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.routed.is_some()
    }

    fn fire<S>(&mut self, scene: SceneId, scenes: &mut S)
    where
        S: SceneTransitions + ?Sized,
    {
        if let Some(previous) = self.routed {
            warn!(
                previous = previous.get(),
                requested = scene.get(),
                "outcome already routed for this level; ignoring"
            );
            return;
        }

        info!(scene = scene.get(), "routing level outcome");
        self.routed = Some(scene);
        scenes.request_scene_change(scene);
    }
}
