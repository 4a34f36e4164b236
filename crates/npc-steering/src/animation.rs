use npc_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const IDLE_SPEED: f32 = 0.1;
pub const RUN_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimationKind {
    #[default]
    Idle,
    Walk,
    Run,
}

impl AnimationKind {
    pub fn for_speed(speed: f32) -> Self {
        if speed < IDLE_SPEED {
            AnimationKind::Idle
        } else if speed < RUN_SPEED {
            AnimationKind::Walk
        } else {
            AnimationKind::Run
        }
    }
}

/// Picks a locomotion animation from velocity and tracks how long it has been playing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MovementAnimator {
    current: AnimationKind,
    time: f32,
}

impl MovementAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the animation changed this update.
    pub fn update(&mut self, velocity: Vec3, dt: f32) -> bool {
        self.time += dt;
        let next = AnimationKind::for_speed(velocity.magnitude());
        if next == self.current {
            return false;
        }
        self.current = next;
        self.time = 0.0;
        true
    }

    pub fn current(&self) -> AnimationKind {
        self.current
    }

    /// Seconds spent in the current animation.
    pub fn time(&self) -> f32 {
        self.time
    }
}
