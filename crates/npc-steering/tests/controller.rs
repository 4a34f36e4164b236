use npc_core::{AgentBody, Vec3};
use npc_steering::{
    Flee, Seek, Separation, SteeringBehavior, SteeringConfig, SteeringController,
};
use proptest::prelude::*;

fn body(position: Vec3, velocity: Vec3) -> AgentBody {
    let mut b = AgentBody::new("steered", position).expect("valid id");
    b.velocity = velocity;
    b
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

#[test]
fn force_is_clamped_before_velocity_and_speed_after() {
    let mut ctl = SteeringController::new(SteeringConfig {
        max_speed: 2.0,
        max_force: 5.0,
    });
    ctl.add_behavior(SteeringBehavior::new(Seek::new(Vec3::new(100.0, 0.0, 0.0))));
    let mut b = body(Vec3::ZERO, Vec3::ZERO);

    let force = ctl.update(&mut b, &[], 1.0);

    assert_eq!(force, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(ctl.last_force(), force);
    assert_eq!(b.velocity, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(b.position, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn sub_max_force_passes_through() {
    let mut ctl = SteeringController::default();
    ctl.add_behavior(SteeringBehavior::weighted(
        Seek::new(Vec3::new(0.0, 0.0, 10.0)),
        0.25,
    ));
    let mut b = body(Vec3::ZERO, Vec3::ZERO);

    let force = ctl.update(&mut b, &[], 0.5);

    assert_eq!(force, Vec3::new(0.0, 0.0, 2.5));
    assert_eq!(b.velocity, Vec3::new(0.0, 0.0, 1.25));
    assert_eq!(b.position, Vec3::new(0.0, 0.0, 0.625));
}

#[test]
fn weights_blend_and_disabled_behaviors_are_skipped() {
    let target = Vec3::new(1.0, 0.0, 0.0);
    let mut ctl = SteeringController::new(SteeringConfig {
        max_speed: 10.0,
        max_force: 100.0,
    });
    let seek = ctl.add_behavior(SteeringBehavior::weighted(Seek::new(target), 1.0));
    let flee = ctl.add_behavior(SteeringBehavior::weighted(Flee::new(target), 0.5));
    let b = body(Vec3::ZERO, Vec3::ZERO);

    assert_eq!(ctl.steering_force(&b, &[]), Vec3::new(5.0, 0.0, 0.0));

    ctl.behavior_mut(flee).expect("flee").enabled = false;
    assert_eq!(ctl.steering_force(&b, &[]), Vec3::new(10.0, 0.0, 0.0));

    let removed = ctl.remove_behavior(seek).expect("seek");
    assert_eq!(removed.kind.name(), "seek");
    assert!(ctl.remove_behavior(seek).is_none());
    assert_eq!(ctl.len(), 1);
    assert_eq!(ctl.steering_force(&b, &[]), Vec3::ZERO);

    ctl.clear_behaviors();
    assert!(ctl.is_empty());
}

#[test]
fn handles_stay_valid_after_removal() {
    let mut ctl = SteeringController::default();
    let a = ctl.add_behavior(SteeringBehavior::new(Separation::default()));
    let b = ctl.add_behavior(SteeringBehavior::new(Seek::new(Vec3::ZERO)));
    ctl.remove_behavior(a);

    assert!(ctl.behavior(a).is_none());
    assert_eq!(ctl.behavior(b).map(|s| s.kind.name()), Some("seek"));
}

#[test]
fn zero_force_leaves_stationary_agent_untouched() {
    let start = Vec3::new(4.0, 1.0, -2.0);
    let mut ctl = SteeringController::default();
    // Seeking your own position yields zero force for a stationary agent.
    ctl.add_behavior(SteeringBehavior::new(Seek::new(start)));
    let mut b = body(start, Vec3::ZERO);

    for _ in 0..10 {
        ctl.update(&mut b, &[], 0.1);
    }

    assert_eq!(b.position, start);
    assert_eq!(b.velocity, Vec3::ZERO);
}

proptest! {
    #[test]
    fn seek_respects_force_and_speed_limits(
        position in vec3(),
        velocity in vec3(),
        target in vec3(),
        dt in 0.001f32..2.0,
        max_speed in 0.1f32..20.0,
        max_force in 0.1f32..20.0,
    ) {
        let mut ctl = SteeringController::new(SteeringConfig { max_speed, max_force });
        ctl.add_behavior(SteeringBehavior::new(Seek::new(target)));
        let mut b = body(position, velocity);

        let force = ctl.update(&mut b, &[], dt);

        prop_assert!(force.magnitude() <= max_force * (1.0 + 1e-4));
        prop_assert!(b.velocity.magnitude() <= max_speed * (1.0 + 1e-4));
    }

    #[test]
    fn no_behaviors_keeps_velocity_under_limit(velocity in vec3(), dt in 0.001f32..1.0) {
        let mut ctl = SteeringController::default();
        let mut b = body(Vec3::ZERO, velocity);
        let force = ctl.update(&mut b, &[], dt);

        prop_assert_eq!(force, Vec3::ZERO);
        let expected = velocity.truncate(ctl.config().max_speed);
        prop_assert_eq!(b.velocity, expected);
    }
}
