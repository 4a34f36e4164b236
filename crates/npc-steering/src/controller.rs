use npc_core::{AgentBody, Neighbor, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::behaviors::SteeringBehavior;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringConfig {
    /// Upper bound on the agent's speed after integration.
    pub max_speed: f32,
    /// Upper bound on the length of the blended steering force.
    pub max_force: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            max_force: 5.0,
        }
    }
}

/// Stable handle for a behavior added to a [`SteeringController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BehaviorId(u32);

/// Blends an ordered list of behaviors and integrates the result into an [`AgentBody`].
///
/// The controller does not own the body it steers; the owning agent passes it to
/// [`update`](Self::update) each tick.
#[derive(Debug, Clone, Default)]
pub struct SteeringController {
    config: SteeringConfig,
    behaviors: Vec<(BehaviorId, SteeringBehavior)>,
    next_id: u32,
    last_force: Vec3,
}

impl SteeringController {
    pub fn new(config: SteeringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> SteeringConfig {
        self.config
    }

    pub fn set_config(&mut self, config: SteeringConfig) {
        self.config = config;
    }

    pub fn add_behavior(&mut self, behavior: SteeringBehavior) -> BehaviorId {
        let id = BehaviorId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.behaviors.push((id, behavior));
        id
    }

    pub fn remove_behavior(&mut self, id: BehaviorId) -> Option<SteeringBehavior> {
        let idx = self.behaviors.iter().position(|(bid, _)| *bid == id)?;
        Some(self.behaviors.remove(idx).1)
    }

    pub fn clear_behaviors(&mut self) {
        self.behaviors.clear();
    }

    pub fn behavior(&self, id: BehaviorId) -> Option<&SteeringBehavior> {
        self.behaviors
            .iter()
            .find(|(bid, _)| *bid == id)
            .map(|(_, b)| b)
    }

    pub fn behavior_mut(&mut self, id: BehaviorId) -> Option<&mut SteeringBehavior> {
        self.behaviors
            .iter_mut()
            .find(|(bid, _)| *bid == id)
            .map(|(_, b)| b)
    }

    pub fn behaviors(&self) -> impl Iterator<Item = &SteeringBehavior> {
        self.behaviors.iter().map(|(_, b)| b)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Force applied by the most recent [`update`](Self::update), after clamping.
    pub fn last_force(&self) -> Vec3 {
        self.last_force
    }

    /// Weighted sum of all enabled behaviors, truncated to `max_force`.
    pub fn steering_force(&mut self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        let mut total = Vec3::ZERO;
        for (_, behavior) in self.behaviors.iter_mut() {
            if behavior.enabled {
                total += behavior.calculate(body, neighbors) * behavior.weight;
            }
        }
        total.truncate(self.config.max_force)
    }

    /// Advance `body` by one step and return the force that was applied.
    ///
    /// Order: clamp force, integrate velocity, clamp speed, integrate position.
    pub fn update(&mut self, body: &mut AgentBody, neighbors: &[Neighbor], dt: f32) -> Vec3 {
        let force = self.steering_force(body, neighbors);
        body.velocity = (body.velocity + force * dt).truncate(self.config.max_speed);
        body.position += body.velocity * dt;
        self.last_force = force;
        force
    }
}
