//! Vector math, deterministic RNG and the agent contract shared by the `npc-*` crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod math;
pub mod rng;
pub mod timer;

pub use agent::{Agent, AgentBody, AgentId, Neighbor, MAX_ATTRIBUTE, MIN_ATTRIBUTE};
pub use error::{AgentError, Result};
pub use math::{
    angle_between, clamp, lerp, lerp_vec3, normalize_angle, wrap_angle, Vec2, Vec3,
};
pub use rng::{derive_seed, hash_str, DeterministicRng, SplitMix64};
pub use timer::Timer;
