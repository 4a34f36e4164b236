use npc_core::{AgentBody, Vec2, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seeks along a list of waypoints, advancing when the body gets within `arrival_radius`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathFollower {
    waypoints: Vec<Vec3>,
    current: usize,
    pub looping: bool,
    pub arrival_radius: f32,
    pub speed: f32,
}

impl PathFollower {
    pub fn new(waypoints: Vec<Vec3>, looping: bool) -> Self {
        Self {
            waypoints,
            current: 0,
            looping,
            arrival_radius: 1.0,
            speed: 10.0,
        }
    }

    /// Lift a 2D plan (as returned by A*) onto the `y` plane.
    pub fn from_plan(plan: &[Vec2], y: f32) -> Self {
        Self::new(plan.iter().map(|p| p.to_xz(y)).collect(), false)
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current).copied()
    }

    pub fn steering_force(&mut self, body: &AgentBody) -> Vec3 {
        let Some(target) = self.current_waypoint() else {
            return Vec3::ZERO;
        };

        if body.position.distance(target) < self.arrival_radius {
            self.current += 1;
            if self.current >= self.waypoints.len() {
                if !self.looping {
                    return Vec3::ZERO;
                }
                self.current = 0;
            }
        }

        match self.current_waypoint() {
            Some(target) => (target - body.position).normalize() * self.speed - body.velocity,
            None => Vec3::ZERO,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.looping && self.current >= self.waypoints.len()
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
