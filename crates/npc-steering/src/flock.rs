//! Whole-group flock metrics and coarse pattern classification.

use core::f32::consts::PI;

use npc_core::{Neighbor, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlockPattern {
    Flocking,
    Schooling,
    Swarming,
    Milling,
    Splitting,
    Unknown,
}

/// Mean heading agreement in `[0, 1]`. Stationary members contribute 0.
pub fn alignment_level(members: &[Neighbor]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    let mean = members
        .iter()
        .fold(Vec3::ZERO, |acc, m| acc + m.velocity)
        / members.len() as f32;
    if mean.magnitude() <= 0.0 {
        return 0.0;
    }
    let mean_dir = mean.normalize();

    let total: f32 = members
        .iter()
        .filter(|m| m.velocity.magnitude() > 0.0)
        .map(|m| (m.velocity.normalize().dot(mean_dir) + 1.0) / 2.0)
        .sum();
    total / members.len() as f32
}

/// `1 / (1 + 0.1 * mean distance to centroid)`, so a tight group approaches 1.
pub fn cohesion_level(members: &[Neighbor]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    let n = members.len() as f32;
    let center = members
        .iter()
        .fold(Vec3::ZERO, |acc, m| acc + m.position)
        / n;
    let mean_distance = members
        .iter()
        .map(|m| m.position.distance(center))
        .sum::<f32>()
        / n;
    1.0 / (1.0 + mean_distance * 0.1)
}

/// Standard deviation of speed relative to mean speed.
pub fn velocity_variance(members: &[Neighbor]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    let n = members.len() as f32;
    let mean = members.iter().map(|m| m.velocity.magnitude()).sum::<f32>() / n;
    let variance = members
        .iter()
        .map(|m| {
            let d = m.velocity.magnitude() - mean;
            d * d
        })
        .sum::<f32>()
        / n;
    variance.sqrt() / (mean + 0.1)
}

/// Members per unit area within `radius` of `center` (boundary inclusive).
pub fn local_density(members: &[Neighbor], center: Vec3, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    let count = members
        .iter()
        .filter(|m| m.position.distance(center) <= radius)
        .count();
    count as f32 / (PI * radius * radius)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlockMetrics {
    pub alignment: f32,
    pub cohesion: f32,
    pub velocity_variance: f32,
}

impl FlockMetrics {
    pub fn measure(members: &[Neighbor]) -> Self {
        Self {
            alignment: alignment_level(members),
            cohesion: cohesion_level(members),
            velocity_variance: velocity_variance(members),
        }
    }

    pub fn pattern(&self) -> FlockPattern {
        let Self {
            alignment,
            cohesion,
            velocity_variance: variance,
        } = *self;

        if alignment > 0.8 && cohesion > 0.7 && variance < 0.3 {
            FlockPattern::Flocking
        } else if cohesion > 0.8 && variance > 0.6 {
            FlockPattern::Swarming
        } else if alignment < 0.3 && variance > 0.7 {
            FlockPattern::Milling
        } else if cohesion < 0.4 {
            FlockPattern::Splitting
        } else {
            FlockPattern::Schooling
        }
    }
}

/// Classify a group; fewer than three members is [`FlockPattern::Unknown`].
pub fn detect_pattern(members: &[Neighbor]) -> FlockPattern {
    if members.len() < 3 {
        return FlockPattern::Unknown;
    }
    FlockMetrics::measure(members).pattern()
}
