#![cfg(feature = "serde")]

use npc_core::{Vec2, Vec3};
use npc_world::{Bounds, EnvironmentConfig, FlockingConfig, PlanningMemory};

#[test]
fn environment_config_roundtrip() {
    let config = EnvironmentConfig {
        neighbor_radius: Some(6.0),
        bounds: Some(Bounds::new(Vec3::ZERO, Vec3::new(100.0, 10.0, 100.0))),
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: EnvironmentConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn flocking_config_roundtrip() {
    let config = FlockingConfig {
        wander_weight: 0.3,
        seed: 99,
        ..FlockingConfig::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: FlockingConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}

#[test]
fn planning_memory_roundtrip() {
    let memory = PlanningMemory {
        plan_complete: true,
        waypoint_index: 3,
        search_target: Some(Vec2::new(1.0, -2.0)),
        search_time: 4.5,
    };
    let json = serde_json::to_string(&memory).expect("serialize");
    let back: PlanningMemory = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, memory);
}
