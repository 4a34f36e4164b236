use std::collections::VecDeque;
use std::sync::Arc;

use npc_bt::BehaviorTree;
use npc_core::{Agent, AgentBody, AgentError, Vec2, Vec3};
use npc_nav::Navigator;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanningConfig {
    /// Distance on the ground plane at which a waypoint counts as reached.
    pub arrival_radius: f32,
    /// Speed used while following a plan.
    pub speed: f32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            arrival_radius: 1.0,
            speed: 5.0,
        }
    }
}

/// Scratch state shared between a planning agent and its behavior tree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanningMemory {
    /// Set when the last waypoint of a plan is reached; cleared by a new plan.
    pub plan_complete: bool,
    /// Next patrol waypoint.
    pub waypoint_index: usize,
    pub search_target: Option<Vec2>,
    /// Seconds the current behavior tree has been ticking. Advanced by the agent before every
    /// tree tick and zeroed when a new tree is set.
    pub search_time: f32,
}

/// Everything a planning agent's behavior tree may read or change during a tick.
pub struct PlanningState {
    pub body: AgentBody,
    pub memory: PlanningMemory,
    pub config: PlanningConfig,
    plan: VecDeque<Vec2>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl PlanningState {
    fn new(body: AgentBody) -> Self {
        Self {
            body,
            memory: PlanningMemory::default(),
            config: PlanningConfig::default(),
            plan: VecDeque::new(),
            navigator: None,
        }
    }

    /// Position projected onto the planning plane (`x`, `z`).
    pub fn position_2d(&self) -> Vec2 {
        self.body.position.xz()
    }

    pub fn plan(&self) -> &VecDeque<Vec2> {
        &self.plan
    }

    pub fn has_plan(&self) -> bool {
        !self.plan.is_empty()
    }

    pub fn clear_plan(&mut self) {
        self.plan.clear();
    }

    pub fn has_navigator(&self) -> bool {
        self.navigator.is_some()
    }

    /// Replace the current plan with a path from the agent to `goal`.
    ///
    /// Returns `false`, leaving the current plan untouched, when there is no navigator or no path.
    pub fn plan_path_to(&mut self, goal: Vec2) -> bool {
        let Some(navigator) = self.navigator.as_ref() else {
            return false;
        };
        let path = navigator.find_path(self.position_2d(), goal);
        if path.is_empty() {
            debug!(id = %self.body.id(), ?goal, "no path to goal");
            return false;
        }
        self.plan = path.into();
        self.memory.plan_complete = false;
        true
    }

    /// Set a ground-plane velocity of `speed` towards `target`. Vertical velocity is zeroed.
    pub fn head_towards(&mut self, target: Vec2, speed: f32) {
        let direction = target - self.position_2d();
        if direction.magnitude() > 0.0 {
            self.body.velocity = direction.normalize().to_xz(0.0) * speed;
        }
    }

    /// Move along the front of the plan, dropping waypoints as they are reached.
    pub fn follow_plan(&mut self, dt: f32) {
        let Some(&next) = self.plan.front() else {
            return;
        };

        let target = if self.position_2d().distance(next) < self.config.arrival_radius {
            self.plan.pop_front();
            match self.plan.front() {
                Some(&t) => t,
                None => {
                    self.memory.plan_complete = true;
                    self.body.velocity = Vec3::ZERO;
                    return;
                }
            }
        } else {
            next
        };

        self.head_towards(target, self.config.speed);
        self.body.position += self.body.velocity * dt;
    }
}

impl core::fmt::Debug for PlanningState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlanningState")
            .field("body", &self.body)
            .field("memory", &self.memory)
            .field("config", &self.config)
            .field("plan", &self.plan)
            .field("has_navigator", &self.navigator.is_some())
            .finish()
    }
}

/// Agent that runs an optional behavior tree and walks A* plans on a shared grid.
///
/// Each tick the tree runs first; then the agent follows its plan if it has one, otherwise it
/// drifts with whatever velocity the tree left it.
#[derive(Debug)]
pub struct PlanningAgent {
    state: PlanningState,
    tree: Option<BehaviorTree<PlanningState>>,
}

impl PlanningAgent {
    pub fn new(id: impl AsRef<str>, position: Vec3) -> Result<Self, AgentError> {
        Ok(Self::with_body(AgentBody::new(id, position)?))
    }

    pub fn with_body(body: AgentBody) -> Self {
        Self {
            state: PlanningState::new(body),
            tree: None,
        }
    }

    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.state.config = config;
        self
    }

    /// Attach `tree`, restarting the tree clock in `memory.search_time`.
    pub fn set_behavior_tree(&mut self, tree: BehaviorTree<PlanningState>) {
        self.state.memory.search_time = 0.0;
        self.tree = Some(tree);
    }

    pub fn take_behavior_tree(&mut self) -> Option<BehaviorTree<PlanningState>> {
        self.tree.take()
    }

    pub fn behavior_tree(&self) -> Option<&BehaviorTree<PlanningState>> {
        self.tree.as_ref()
    }

    pub fn set_pathfinder(&mut self, navigator: Arc<dyn Navigator>) {
        self.state.navigator = Some(navigator);
    }

    pub fn state(&self) -> &PlanningState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PlanningState {
        &mut self.state
    }

    pub fn memory(&self) -> &PlanningMemory {
        &self.state.memory
    }

    pub fn plan(&self) -> &VecDeque<Vec2> {
        self.state.plan()
    }

    pub fn plan_path_to(&mut self, goal: Vec2) -> bool {
        self.state.plan_path_to(goal)
    }

    pub fn follow_plan(&mut self, dt: f32) {
        self.state.follow_plan(dt);
    }
}

impl Agent for PlanningAgent {
    fn body(&self) -> &AgentBody {
        &self.state.body
    }

    fn body_mut(&mut self) -> &mut AgentBody {
        &mut self.state.body
    }

    fn update(&mut self, dt: f32) {
        if let Some(tree) = self.tree.as_mut() {
            self.state.memory.search_time += dt;
            tree.tick(&mut self.state);
        }

        if self.state.has_plan() {
            self.state.follow_plan(dt);
        } else {
            let velocity = self.state.body.velocity;
            self.state.body.position += velocity * dt;
        }
    }
}
