#![cfg(feature = "serde")]

use npc_core::Vec3;
use npc_steering::{Avoidance, MovementAnimator, Obstacle, SteeringConfig};

#[test]
fn steering_config_roundtrip() {
    let config = SteeringConfig {
        max_speed: 7.5,
        max_force: 2.0,
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: SteeringConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn avoidance_keeps_obstacles() {
    let mut avoid = Avoidance::default();
    avoid.add_obstacle(Obstacle::new(Vec3::new(1.0, 0.0, 2.0), 0.5));

    let json = serde_json::to_string(&avoid).expect("serialize");
    let back: Avoidance = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, avoid);
}

#[test]
fn animator_roundtrip() {
    let mut anim = MovementAnimator::new();
    anim.update(Vec3::new(6.0, 0.0, 0.0), 0.1);
    let json = serde_json::to_string(&anim).expect("serialize");
    let back: MovementAnimator = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, anim);
}
