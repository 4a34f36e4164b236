//! Force-generating steering behaviors.
//!
//! Every behavior maps the steered body and a frozen neighbor snapshot to a force vector. All of
//! them are pure functions of that input except [`Wander`], which keeps a drifting target and its
//! own RNG between calls.

use npc_core::{AgentBody, DeterministicRng, Neighbor, SplitMix64, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Desired speed of the "full speed" behaviors.
pub const DEFAULT_DESIRED_SPEED: f32 = 10.0;

/// Speed below which wander treats the agent as stationary and projects along [`Vec3::FORWARD`].
pub const WANDER_STATIONARY_SPEED: f32 = 0.1;

/// Reynolds-style steering: desired velocity minus current velocity.
fn steer_towards(direction: Vec3, speed: f32, velocity: Vec3) -> Vec3 {
    direction.normalize() * speed - velocity
}

/// Neighbors other than `body` strictly inside `(0, radius)`, with their distance.
fn in_range<'a>(
    body: &'a AgentBody,
    neighbors: &'a [Neighbor],
    radius: f32,
) -> impl Iterator<Item = (&'a Neighbor, f32)> + 'a {
    neighbors
        .iter()
        .filter(move |n| n.id != *body.id())
        .map(move |n| (n, body.position.distance(n.position)))
        .filter(move |&(_, d)| d > 0.0 && d < radius)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Seek {
    pub target: Vec3,
    pub speed: f32,
}

impl Seek {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            speed: DEFAULT_DESIRED_SPEED,
        }
    }

    pub fn calculate(&self, body: &AgentBody) -> Vec3 {
        steer_towards(self.target - body.position, self.speed, body.velocity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flee {
    pub threat: Vec3,
    pub speed: f32,
}

impl Flee {
    pub fn new(threat: Vec3) -> Self {
        Self {
            threat,
            speed: DEFAULT_DESIRED_SPEED,
        }
    }

    pub fn calculate(&self, body: &AgentBody) -> Vec3 {
        steer_towards(body.position - self.threat, self.speed, body.velocity)
    }
}

/// Persistent random drift.
///
/// Each call jitters a point on a circle of `radius` (in the x/z plane), places the circle
/// `distance` ahead of the agent and seeks the resulting point at `speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wander {
    pub radius: f32,
    pub distance: f32,
    pub jitter: f32,
    pub speed: f32,
    target: Vec3,
    rng: SplitMix64,
}

impl Wander {
    pub fn new(seed: u64) -> Self {
        Self {
            radius: 2.0,
            distance: 5.0,
            jitter: 1.0,
            speed: 5.0,
            target: Vec3::FORWARD,
            rng: SplitMix64::new(seed),
        }
    }

    pub fn with_params(seed: u64, radius: f32, distance: f32, jitter: f32) -> Self {
        Self {
            radius,
            distance,
            jitter,
            ..Self::new(seed)
        }
    }

    /// Current offset of the wander point from the circle center.
    pub fn wander_target(&self) -> Vec3 {
        self.target
    }

    pub fn calculate(&mut self, body: &AgentBody) -> Vec3 {
        let jitter = Vec3::new(
            self.rng.uniform(-self.jitter, self.jitter),
            0.0,
            self.rng.uniform(-self.jitter, self.jitter),
        );
        self.target = (self.target + jitter).normalize() * self.radius;

        let heading = if body.velocity.magnitude() > WANDER_STATIONARY_SPEED {
            body.velocity.normalize()
        } else {
            Vec3::FORWARD
        };
        let circle_center = body.position + heading * self.distance;
        let point = circle_center + self.target;

        steer_towards(point - body.position, self.speed, body.velocity)
    }
}

impl Default for Wander {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Inverse-distance push away from close neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Separation {
    pub radius: f32,
    pub speed: f32,
}

impl Separation {
    pub fn calculate(&self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        let mut steer = Vec3::ZERO;
        let mut count = 0usize;
        for (n, d) in in_range(body, neighbors, self.radius) {
            steer += (body.position - n.position).normalize() * (1.0 / d);
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        steer_towards(steer / count as f32, self.speed, body.velocity)
    }
}

impl Default for Separation {
    fn default() -> Self {
        Self {
            radius: 3.0,
            speed: DEFAULT_DESIRED_SPEED,
        }
    }
}

/// Match the average heading of nearby neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    pub radius: f32,
    pub speed: f32,
}

impl Alignment {
    pub fn calculate(&self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;
        for (n, _) in in_range(body, neighbors, self.radius) {
            sum += n.velocity;
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        steer_towards(sum / count as f32, self.speed, body.velocity)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: DEFAULT_DESIRED_SPEED,
        }
    }
}

/// Seek the centroid of nearby neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cohesion {
    pub radius: f32,
    pub speed: f32,
}

impl Cohesion {
    pub fn calculate(&self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;
        for (n, _) in in_range(body, neighbors, self.radius) {
            sum += n.position;
            count += 1;
        }
        if count == 0 {
            return Vec3::ZERO;
        }
        let center = sum / count as f32;
        steer_towards(center - body.position, self.speed, body.velocity)
    }
}

impl Default for Cohesion {
    fn default() -> Self {
        Self {
            radius: 8.0,
            speed: DEFAULT_DESIRED_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    pub position: Vec3,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Repulsion from neighbors and registered static obstacles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Avoidance {
    pub radius: f32,
    /// Radius of the steered agent, added to each obstacle's radius.
    pub agent_radius: f32,
    pub speed: f32,
    obstacles: Vec<Obstacle>,
}

impl Avoidance {
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn calculate(&self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        let mut steer = Vec3::ZERO;

        for (n, d) in in_range(body, neighbors, self.radius) {
            steer += (body.position - n.position).normalize() * (self.radius / d);
        }

        for obstacle in &self.obstacles {
            let d = body.position.distance(obstacle.position);
            let reach = obstacle.radius + self.agent_radius + self.radius;
            // An agent sitting exactly on the obstacle center has no escape direction.
            if d > 0.0 && d < reach {
                steer += (body.position - obstacle.position).normalize() * (reach / d);
            }
        }

        if steer.magnitude() > 0.0 {
            steer_towards(steer, self.speed, body.velocity)
        } else {
            Vec3::ZERO
        }
    }
}

impl Default for Avoidance {
    fn default() -> Self {
        Self {
            radius: 4.0,
            agent_radius: 1.0,
            speed: DEFAULT_DESIRED_SPEED,
            obstacles: Vec::new(),
        }
    }
}

/// Closed set of behaviors a [`SteeringController`](crate::SteeringController) can run.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorKind {
    Seek(Seek),
    Flee(Flee),
    Wander(Wander),
    Separation(Separation),
    Alignment(Alignment),
    Cohesion(Cohesion),
    Avoidance(Avoidance),
}

impl BehaviorKind {
    pub fn calculate(&mut self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        match self {
            BehaviorKind::Seek(b) => b.calculate(body),
            BehaviorKind::Flee(b) => b.calculate(body),
            BehaviorKind::Wander(b) => b.calculate(body),
            BehaviorKind::Separation(b) => b.calculate(body, neighbors),
            BehaviorKind::Alignment(b) => b.calculate(body, neighbors),
            BehaviorKind::Cohesion(b) => b.calculate(body, neighbors),
            BehaviorKind::Avoidance(b) => b.calculate(body, neighbors),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BehaviorKind::Seek(_) => "seek",
            BehaviorKind::Flee(_) => "flee",
            BehaviorKind::Wander(_) => "wander",
            BehaviorKind::Separation(_) => "separation",
            BehaviorKind::Alignment(_) => "alignment",
            BehaviorKind::Cohesion(_) => "cohesion",
            BehaviorKind::Avoidance(_) => "avoidance",
        }
    }
}

macro_rules! impl_from_behavior {
    ($($ty:ident),+) => {
        $(
            impl From<$ty> for BehaviorKind {
                fn from(b: $ty) -> Self {
                    BehaviorKind::$ty(b)
                }
            }
        )+
    };
}

impl_from_behavior!(Seek, Flee, Wander, Separation, Alignment, Cohesion, Avoidance);

/// A behavior plus its blend weight and on/off switch.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringBehavior {
    pub kind: BehaviorKind,
    pub weight: f32,
    pub enabled: bool,
}

impl SteeringBehavior {
    pub fn new(kind: impl Into<BehaviorKind>) -> Self {
        Self {
            kind: kind.into(),
            weight: 1.0,
            enabled: true,
        }
    }

    pub fn weighted(kind: impl Into<BehaviorKind>, weight: f32) -> Self {
        Self {
            weight,
            ..Self::new(kind)
        }
    }

    /// Unweighted force.
    pub fn calculate(&mut self, body: &AgentBody, neighbors: &[Neighbor]) -> Vec3 {
        self.kind.calculate(body, neighbors)
    }
}
