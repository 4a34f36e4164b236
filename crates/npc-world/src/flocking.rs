use npc_core::{derive_seed, hash_str, Agent, AgentBody, AgentError, Neighbor, Vec3};
use npc_steering::{
    Alignment, Cohesion, MovementAnimator, Separation, SteeringBehavior, SteeringConfig,
    SteeringController, Wander,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlockingConfig {
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub wander_weight: f32,
    pub steering: SteeringConfig,
    /// Global seed; each agent's wander stream is derived from it and the agent id.
    pub seed: u64,
}

impl Default for FlockingConfig {
    fn default() -> Self {
        Self {
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            wander_weight: 0.1,
            steering: SteeringConfig::default(),
            seed: 0,
        }
    }
}

/// Boid steered by separation, alignment, cohesion and a little wander.
#[derive(Debug, Clone)]
pub struct FlockingAgent {
    body: AgentBody,
    controller: SteeringController,
    animator: MovementAnimator,
    neighbors: Vec<Neighbor>,
}

impl FlockingAgent {
    pub fn new(id: impl AsRef<str>, position: Vec3) -> Result<Self, AgentError> {
        Self::with_config(id, position, FlockingConfig::default())
    }

    pub fn with_config(
        id: impl AsRef<str>,
        position: Vec3,
        config: FlockingConfig,
    ) -> Result<Self, AgentError> {
        let body = AgentBody::new(id, position)?;
        let wander_seed = derive_seed(config.seed, hash_str(body.id().as_str()), 0);

        let mut controller = SteeringController::new(config.steering);
        controller.add_behavior(SteeringBehavior::weighted(
            Separation::default(),
            config.separation_weight,
        ));
        controller.add_behavior(SteeringBehavior::weighted(
            Alignment::default(),
            config.alignment_weight,
        ));
        controller.add_behavior(SteeringBehavior::weighted(
            Cohesion::default(),
            config.cohesion_weight,
        ));
        controller.add_behavior(SteeringBehavior::weighted(
            Wander::new(wander_seed),
            config.wander_weight,
        ));

        Ok(Self {
            body,
            controller,
            animator: MovementAnimator::new(),
            neighbors: Vec::new(),
        })
    }

    pub fn controller(&self) -> &SteeringController {
        &self.controller
    }

    /// Add, remove or retune behaviors.
    pub fn controller_mut(&mut self) -> &mut SteeringController {
        &mut self.controller
    }

    pub fn animator(&self) -> &MovementAnimator {
        &self.animator
    }

    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }
}

impl Agent for FlockingAgent {
    fn body(&self) -> &AgentBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut AgentBody {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.controller.update(&mut self.body, &self.neighbors, dt);
        self.animator.update(self.body.velocity, dt);
    }

    fn set_neighbors(&mut self, neighbors: Vec<Neighbor>) {
        self.neighbors = neighbors;
    }
}
