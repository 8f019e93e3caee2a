//! Fade-out scene transition driven by an unscaled clock.

use std::time::Duration;

use maze_chase_core::{SceneId, SceneTransitions};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FadeState {
    Idle,
    Fading { scene: SceneId, elapsed: Duration },
    Done(SceneId),
}

/// Fades the screen out and then reports the requested scene as loaded.
///
/// Only the first request is honoured; later requests are logged and dropped.
#[derive(Debug)]
pub(crate) struct FadeTransition {
    duration: Duration,
    state: FadeState,
}

impl FadeTransition {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: FadeState::Idle,
        }
    }

    /// Advances the fade by real time, independent of any simulation scaling.
    pub(crate) fn advance(&mut self, dt: Duration) {
        if let FadeState::Fading { scene, elapsed } = self.state {
            let elapsed = elapsed.saturating_add(dt);
            self.state = if elapsed >= self.duration {
                info!(scene = scene.get(), "scene loaded");
                FadeState::Done(scene)
            } else {
                FadeState::Fading { scene, elapsed }
            };
        }
    }

    /// Screen opacity of the fade overlay in `0.0..=1.0`.
    pub(crate) fn alpha(&self) -> f32 {
        match self.state {
            FadeState::Idle => 0.0,
            FadeState::Fading { elapsed, .. } => {
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
            FadeState::Done(_) => 1.0,
        }
    }

    /// Scene that finished loading, if the fade completed.
    pub(crate) fn loaded_scene(&self) -> Option<SceneId> {
        match self.state {
            FadeState::Done(scene) => Some(scene),
            FadeState::Idle | FadeState::Fading { .. } => None,
        }
    }
}

impl SceneTransitions for FadeTransition {
    fn request_scene_change(&mut self, scene: SceneId) {
        if self.state != FadeState::Idle {
            warn!(scene = scene.get(), "transition already in progress; request ignored");
            return;
        }

        info!(scene = scene.get(), "fading out");
        self.state = FadeState::Fading {
            scene,
            elapsed: Duration::ZERO,
        };
        self.advance(Duration::ZERO);
    }
}
