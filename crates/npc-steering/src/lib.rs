//! Steering behaviors blended into per-agent forces, plus locomotion animation state and flock
//! analysis.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod animation;
pub mod behaviors;
pub mod controller;
pub mod flock;

pub use animation::{AnimationKind, MovementAnimator};
pub use behaviors::{
    Alignment, Avoidance, BehaviorKind, Cohesion, Flee, Obstacle, Seek, Separation,
    SteeringBehavior, Wander,
};
pub use controller::{BehaviorId, SteeringConfig, SteeringController};
pub use flock::{
    alignment_level, cohesion_level, detect_pattern, local_density, velocity_variance,
    FlockMetrics, FlockPattern,
};
