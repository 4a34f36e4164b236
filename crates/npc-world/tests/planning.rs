use std::sync::Arc;

use npc_bt::BtStatus;
use npc_core::{Agent, Vec2, Vec3};
use npc_nav::{AStarPathfinder, GridWorld, Navigator};
use npc_world::{
    patrol_tree, search_tree, Environment, EnvironmentConfig, PlanningAgent, PlanningConfig,
};

fn shared_grid(width: u32, height: u32) -> Arc<AStarPathfinder> {
    Arc::new(AStarPathfinder::new(
        GridWorld::new(width, height, 1.0).expect("valid grid"),
    ))
}

fn planner(id: &str, position: Vec3, navigator: Arc<dyn Navigator>) -> PlanningAgent {
    let mut agent = PlanningAgent::new(id, position).expect("valid id");
    agent.set_pathfinder(navigator);
    agent
}

#[test]
fn planning_without_navigator_fails() {
    let mut agent = PlanningAgent::new("lost", Vec3::ZERO).expect("valid id");
    assert!(!agent.plan_path_to(Vec2::new(3.0, 3.0)));
    assert!(agent.plan().is_empty());
}

#[test]
fn plans_from_ground_plane_position() {
    let grid = shared_grid(8, 8);
    // y is ignored; x and z select the start cell.
    let mut agent = planner("p", Vec3::new(1.5, 40.0, 2.5), grid);

    assert!(agent.plan_path_to(Vec2::new(1.5, 6.5)));
    let plan: Vec<_> = agent.plan().iter().copied().collect();
    assert_eq!(plan.first().copied(), Some(Vec2::new(1.0, 2.0)));
    assert_eq!(plan.last().copied(), Some(Vec2::new(1.0, 6.0)));
    assert!(!agent.memory().plan_complete);
}

#[test]
fn unreachable_goal_keeps_previous_plan() {
    let grid = shared_grid(8, 8);
    let mut agent = planner("p", Vec3::new(0.5, 0.0, 0.5), grid.clone());
    assert!(agent.plan_path_to(Vec2::new(4.5, 0.5)));
    let before = agent.plan().clone();

    grid.set_walkable(7, 7, false);
    assert!(!agent.plan_path_to(Vec2::new(7.5, 7.5)));
    assert_eq!(agent.plan(), &before);
}

#[test]
fn follows_plan_to_completion() {
    let grid = shared_grid(10, 10);
    let mut agent = planner("walker", Vec3::new(0.5, 0.0, 0.5), grid);
    assert!(agent.plan_path_to(Vec2::new(5.5, 5.5)));

    for _ in 0..200 {
        agent.update(0.1);
        if agent.memory().plan_complete {
            break;
        }
    }

    assert!(agent.memory().plan_complete);
    assert!(agent.plan().is_empty());
    assert!(agent.state().position_2d().distance(Vec2::new(5.0, 5.0)) < 1.0);
    assert_eq!(agent.body().velocity, Vec3::ZERO);

    // A finished agent stays put.
    let resting = agent.body().position;
    agent.update(0.1);
    assert_eq!(agent.body().position, resting);
}

#[test]
fn follow_plan_moves_at_configured_speed_on_ground_plane() {
    let grid = shared_grid(10, 1);
    let mut agent = planner("p", Vec3::new(0.0, 2.0, 0.0), grid).with_config(PlanningConfig {
        arrival_radius: 0.5,
        speed: 2.0,
    });
    assert!(agent.plan_path_to(Vec2::new(9.0, 0.0)));

    // First waypoint is the start cell corner, reached immediately.
    agent.follow_plan(0.5);

    assert_eq!(agent.body().velocity, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(agent.body().position, Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn patrol_cycles_waypoints() {
    let mut agent = PlanningAgent::new("guard", Vec3::ZERO).expect("valid id");
    agent.set_behavior_tree(patrol_tree(vec![Vec2::new(4.0, 0.0), Vec2::new(4.0, 4.0)]));

    let mut ticks = 0;
    while agent.memory().waypoint_index == 0 && ticks < 100 {
        agent.update(0.1);
        ticks += 1;
    }
    assert_eq!(agent.memory().waypoint_index, 1);
    assert!(agent.state().position_2d().distance(Vec2::new(4.0, 0.0)) < 1.0);

    while agent.memory().waypoint_index == 1 && ticks < 200 {
        agent.update(0.1);
        ticks += 1;
    }
    assert_eq!(agent.memory().waypoint_index, 0, "wraps after the last waypoint");
}

#[test]
fn patrol_moves_at_patrol_speed() {
    let mut agent = PlanningAgent::new("guard", Vec3::ZERO).expect("valid id");
    agent.set_behavior_tree(patrol_tree(vec![Vec2::new(0.0, 10.0)]));

    agent.update(0.5);

    assert_eq!(agent.body().velocity, Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(agent.body().position, Vec3::new(0.0, 0.0, 1.5));
    assert_eq!(
        agent.behavior_tree().and_then(|t| t.last_status()),
        Some(BtStatus::Running)
    );
}

#[test]
fn empty_patrol_fails() {
    let mut agent = PlanningAgent::new("idle", Vec3::ZERO).expect("valid id");
    agent.set_behavior_tree(patrol_tree(Vec::new()));
    agent.update(0.1);
    assert_eq!(
        agent.behavior_tree().and_then(|t| t.last_status()),
        Some(BtStatus::Failure)
    );
    assert_eq!(agent.body().position, Vec3::ZERO);
}

#[test]
fn search_roams_near_area_then_finishes() {
    let area = Vec2::new(20.0, 20.0);
    let mut agent = PlanningAgent::new("seeker", area.to_xz(0.0)).expect("valid id");
    agent.set_behavior_tree(search_tree(area, 6.0, 11));

    for _ in 0..50 {
        agent.update(0.1);
        let target = agent.memory().search_target.expect("target picked");
        assert!(target.distance(area) <= 6.0 + 1e-4);
    }
    assert!((agent.memory().search_time - 5.0).abs() < 1e-3);

    for _ in 0..60 {
        agent.update(0.1);
    }
    assert!(agent.memory().search_time > 10.0);
    assert_eq!(
        agent.behavior_tree().and_then(|t| t.last_status()),
        Some(BtStatus::Success)
    );
    assert_eq!(agent.body().velocity, Vec3::ZERO);
}

#[test]
fn search_clock_follows_ticks_through_a_long_leg() {
    // Far from the area, so the first leg takes well over the search duration.
    let mut agent = PlanningAgent::new("seeker", Vec3::new(100.0, 0.0, 100.0)).expect("valid id");
    agent.set_behavior_tree(search_tree(Vec2::ZERO, 5.0, 4));
    let dt = 0.25;

    for n in 1..=40 {
        agent.update(dt);
        assert_eq!(agent.memory().search_time, n as f32 * dt);
        assert_eq!(
            agent.behavior_tree().and_then(|t| t.last_status()),
            Some(BtStatus::Running),
            "tick {n}"
        );
    }
    let target = agent.memory().search_target;
    assert!(agent.body().velocity.magnitude() > 0.0);

    // 10.25 s: the leg is abandoned and the search ends on this tick.
    agent.update(dt);
    assert_eq!(
        agent.behavior_tree().and_then(|t| t.last_status()),
        Some(BtStatus::Success)
    );
    assert_eq!(agent.body().velocity, Vec3::ZERO);
    assert_eq!(agent.memory().search_target, target, "no new point is picked");

    let resting = agent.body().position;
    agent.update(dt);
    assert_eq!(agent.body().position, resting);
}

#[test]
fn new_tree_restarts_search_clock() {
    let mut agent = PlanningAgent::new("seeker", Vec3::ZERO).expect("valid id");
    agent.set_behavior_tree(search_tree(Vec2::ZERO, 5.0, 1));
    for _ in 0..8 {
        agent.update(0.5);
    }
    assert_eq!(agent.memory().search_time, 4.0);

    agent.set_behavior_tree(search_tree(Vec2::ZERO, 5.0, 1));
    assert_eq!(agent.memory().search_time, 0.0);
}

#[test]
fn search_is_reproducible_per_seed() {
    let run = |seed| {
        let mut agent = PlanningAgent::new("seeker", Vec3::ZERO).expect("valid id");
        agent.set_behavior_tree(search_tree(Vec2::ZERO, 8.0, seed));
        (0..40)
            .map(|_| {
                agent.update(0.1);
                agent.body().position
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(3), run(3));
}

#[test]
fn agents_share_one_pathfinder() {
    let grid = shared_grid(12, 12);
    let mut env = Environment::<PlanningAgent>::new(EnvironmentConfig::default());
    for (i, start) in [Vec3::new(0.5, 0.0, 0.5), Vec3::new(0.5, 0.0, 11.5)]
        .into_iter()
        .enumerate()
    {
        let mut agent = planner(&format!("p{i}"), start, grid.clone());
        assert!(agent.plan_path_to(Vec2::new(11.5, 5.5)));
        env.add_agent(agent);
    }

    // Grid edits land between ticks and are seen by later queries.
    grid.set_walkable(6, 6, false);
    assert!(!env
        .agent_mut("p0")
        .expect("p0")
        .plan_path_to(Vec2::new(6.5, 6.5)));

    for _ in 0..300 {
        env.update(0.1);
    }
    assert!(env.agents().all(|a| a.memory().plan_complete));
}
