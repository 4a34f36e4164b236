use std::collections::BTreeMap;

use npc_core::{Agent, AgentId, Neighbor, Vec3};
use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned soft walls.
///
/// An agent within `margin` of a wall is pushed back inward with `strength`, applied to its
/// velocity scaled by the tick's `dt`. Positions are never clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
    pub margin: f32,
    pub strength: f32,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            margin: 5.0,
            strength: 20.0,
        }
    }

    /// Inward push for a position; zero when well inside.
    pub fn push(&self, p: Vec3) -> Vec3 {
        let axis = |v: f32, lo: f32, hi: f32| {
            let mut f = 0.0;
            if v < lo + self.margin {
                f += self.strength;
            }
            if v > hi - self.margin {
                f -= self.strength;
            }
            f
        };
        Vec3::new(
            axis(p.x, self.min.x, self.max.x),
            axis(p.y, self.min.y, self.max.y),
            axis(p.z, self.min.z, self.max.z),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvironmentConfig {
    /// When set, every tick hands each agent the snapshot of all others within this radius before
    /// any agent updates.
    pub neighbor_radius: Option<f32>,
    pub bounds: Option<Bounds>,
}

/// Sole owner of every agent in a simulation.
///
/// Agents are keyed by id; adding an agent whose id is already present replaces the old one.
pub struct Environment<A: Agent = Box<dyn Agent>> {
    agents: BTreeMap<AgentId, A>,
    global_time: f64,
    config: EnvironmentConfig,
}

impl<A: Agent> Default for Environment<A> {
    fn default() -> Self {
        Self::new(EnvironmentConfig::default())
    }
}

impl<A: Agent> Environment<A> {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            agents: BTreeMap::new(),
            global_time: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EnvironmentConfig {
        &mut self.config
    }

    /// Seconds of simulation time advanced so far.
    pub fn global_time(&self) -> f64 {
        self.global_time
    }

    /// Insert an agent, returning the one it replaced (same id), if any.
    pub fn add_agent(&mut self, agent: A) -> Option<A> {
        let id = agent.id().clone();
        let replaced = self.agents.insert(id.clone(), agent);
        if replaced.is_some() {
            debug!(%id, "agent replaced");
        } else {
            debug!(%id, "agent added");
        }
        replaced
    }

    pub fn remove_agent(&mut self, id: &str) -> Option<A> {
        let removed = self.agents.remove(id);
        if removed.is_some() {
            debug!(id, "agent removed");
        }
        removed
    }

    pub fn agent(&self, id: &str) -> Option<&A> {
        self.agents.get(id)
    }

    pub fn agent_mut(&mut self, id: &str) -> Option<&mut A> {
        self.agents.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All agents in id order.
    pub fn agents(&self) -> impl Iterator<Item = &A> {
        self.agents.values()
    }

    pub fn agents_mut(&mut self) -> impl Iterator<Item = &mut A> {
        self.agents.values_mut()
    }

    /// Every agent whose position lies within `radius` of `center`, boundary included.
    pub fn agents_in_radius(&self, center: Vec3, radius: f32) -> Vec<&A> {
        self.agents
            .values()
            .filter(|a| a.body().position.distance(center) <= radius)
            .collect()
    }

    /// Frozen snapshot of every agent.
    pub fn snapshot(&self) -> Vec<Neighbor> {
        self.agents.values().map(|a| Neighbor::of(a.body())).collect()
    }

    /// Hand each agent the snapshot of all other agents within `radius` of it.
    ///
    /// Snapshots are taken before any agent is touched, so the result does not depend on
    /// iteration order.
    pub fn assign_neighbors(&mut self, radius: f32) {
        let snapshot = self.snapshot();
        for agent in self.agents.values_mut() {
            let (id, position) = (agent.id().clone(), agent.body().position);
            let neighbors = snapshot
                .iter()
                .filter(|n| n.id != id && n.position.distance(position) <= radius)
                .cloned()
                .collect();
            agent.set_neighbors(neighbors);
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Non-positive or non-finite `dt` is rejected and the tick is skipped.
    pub fn update(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "skipping environment tick with invalid dt");
            return;
        }

        self.global_time += f64::from(dt);
        if let Some(radius) = self.config.neighbor_radius {
            self.assign_neighbors(radius);
        }

        let bounds = self.config.bounds;

        #[cfg(not(feature = "parallel"))]
        {
            for agent in self.agents.values_mut() {
                step_agent(agent, dt, bounds.as_ref());
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.agents
                .par_iter_mut()
                .for_each(|(_, agent)| step_agent(agent, dt, bounds.as_ref()));
        }

        trace!(
            global_time = self.global_time,
            agents = self.agents.len(),
            "environment tick"
        );
    }
}

fn step_agent<A: Agent>(agent: &mut A, dt: f32, bounds: Option<&Bounds>) {
    agent.update(dt);
    if let Some(bounds) = bounds {
        let push = bounds.push(agent.body().position);
        if push != Vec3::ZERO {
            agent.body_mut().velocity += push * dt;
        }
    }
}

impl<A: Agent> core::fmt::Debug for Environment<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Environment")
            .field("agents", &self.agents.keys().collect::<Vec<_>>())
            .field("global_time", &self.global_time)
            .field("config", &self.config)
            .finish()
    }
}
