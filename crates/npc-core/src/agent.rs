use core::borrow::Borrow;
use core::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{AgentError, Vec3};

pub const MIN_ATTRIBUTE: f32 = 0.0;
pub const MAX_ATTRIBUTE: f32 = 100.0;

/// Unique, immutable agent identifier.
///
/// Cheap to clone (shared string); borrows as `str` so maps keyed by `AgentId` can be queried with
/// plain string slices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(Arc<str>);

impl AgentId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, AgentError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(AgentError::EmptyId);
        }
        Ok(Self(Arc::from(id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AgentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for AgentId {
    type Error = AgentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kinematic state and scalar attributes shared by every agent kind.
///
/// `health` and `energy` are private: every write goes through a setter that clamps into
/// `[0, 100]`.
#[derive(Debug, Clone)]
pub struct AgentBody {
    id: AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
    health: f32,
    energy: f32,
    created_at: Instant,
}

impl AgentBody {
    pub fn new(id: impl AsRef<str>, position: Vec3) -> Result<Self, AgentError> {
        Ok(Self::with_id(AgentId::new(id)?, position))
    }

    pub fn with_id(id: AgentId, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            health: MAX_ATTRIBUTE,
            energy: MAX_ATTRIBUTE,
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn set_health(&mut self, health: f32) {
        if let Some(h) = clamp_attribute(health) {
            self.health = h;
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: f32) {
        if let Some(e) = clamp_attribute(energy) {
            self.energy = e;
        }
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Wall-clock time since creation.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

// NaN leaves the attribute untouched.
fn clamp_attribute(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(MIN_ATTRIBUTE, MAX_ATTRIBUTE))
    }
}

/// Frozen, read-only view of another agent captured before a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: AgentId,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Neighbor {
    pub fn of(body: &AgentBody) -> Self {
        Self {
            id: body.id.clone(),
            position: body.position,
            velocity: body.velocity,
        }
    }
}

/// The update contract every mobile entity implements.
///
/// Agents are stepped once per tick by their owner. An agent may read the neighbor snapshot it was
/// handed but never another agent's live state, so updates are order-independent.
pub trait Agent: Send + 'static {
    fn body(&self) -> &AgentBody;

    fn body_mut(&mut self) -> &mut AgentBody;

    fn update(&mut self, dt: f32);

    /// Receive this tick's neighbor snapshot. Agents that don't flock ignore it.
    fn set_neighbors(&mut self, _neighbors: Vec<Neighbor>) {}

    fn id(&self) -> &AgentId {
        self.body().id()
    }
}

impl<A> Agent for Box<A>
where
    A: Agent + ?Sized,
{
    fn body(&self) -> &AgentBody {
        (**self).body()
    }

    fn body_mut(&mut self) -> &mut AgentBody {
        (**self).body_mut()
    }

    fn update(&mut self, dt: f32) {
        (**self).update(dt)
    }

    fn set_neighbors(&mut self, neighbors: Vec<Neighbor>) {
        (**self).set_neighbors(neighbors)
    }
}
