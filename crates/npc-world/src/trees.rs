//! Ready-made behavior trees for [`PlanningAgent`](crate::PlanningAgent).

use npc_bt::{Action, BehaviorTree, BtNode, BtStatus, Condition, Selector, Sequence};
use npc_core::{DeterministicRng, SplitMix64, Vec2, Vec3};

use crate::planning::PlanningState;

pub const PATROL_SPEED: f32 = 3.0;
pub const SEARCH_SPEED: f32 = 4.0;
/// Seconds of searching before the search tree reports success.
pub const SEARCH_DURATION: f32 = 10.0;

/// Walk the waypoints in order, wrapping around forever.
///
/// Each tick heads towards the current waypoint and returns `Running`; reaching it advances
/// `memory.waypoint_index` and returns `Success`. An empty waypoint list fails.
pub fn patrol_tree(waypoints: Vec<Vec2>) -> BehaviorTree<PlanningState> {
    let patrol = Action::new(move |s: &mut PlanningState| {
        let len = waypoints.len();
        let Some(&target) = waypoints.get(s.memory.waypoint_index % len.max(1)) else {
            return BtStatus::Failure;
        };

        if s.position_2d().distance(target) < s.config.arrival_radius {
            s.memory.waypoint_index = (s.memory.waypoint_index + 1) % len;
            return BtStatus::Success;
        }
        s.head_towards(target, PATROL_SPEED);
        BtStatus::Running
    });
    BehaviorTree::new(patrol.boxed())
}

/// Roam between random points within `radius` of `area` until [`SEARCH_DURATION`] has passed.
///
/// `Selector[Sequence[still searching, pick random point, move to it], Sequence[search over,
/// stop]]`. The clock is `memory.search_time`, advanced by the agent every tick. A leg in
/// progress gives up as soon as the clock runs out, so the tree reports `Success` on the first
/// tick past the duration. Points come from an RNG seeded with `seed`, so a search is
/// reproducible.
pub fn search_tree(area: Vec2, radius: f32, seed: u64) -> BehaviorTree<PlanningState> {
    let searching = Condition::new(|s: &PlanningState| s.memory.search_time <= SEARCH_DURATION);

    let mut rng = SplitMix64::new(seed);
    let pick_point = Action::new(move |s: &mut PlanningState| {
        let angle = rng.uniform(0.0, core::f32::consts::TAU);
        let distance = rng.uniform(0.0, radius);
        s.memory.search_target = Some(Vec2::new(
            area.x + distance * angle.cos(),
            area.y + distance * angle.sin(),
        ));
        BtStatus::Success
    });

    let move_to_point = Action::new(|s: &mut PlanningState| {
        if s.memory.search_time > SEARCH_DURATION {
            return BtStatus::Failure;
        }
        let Some(target) = s.memory.search_target else {
            return BtStatus::Failure;
        };
        if s.position_2d().distance(target) < s.config.arrival_radius {
            return BtStatus::Success;
        }
        s.head_towards(target, SEARCH_SPEED);
        BtStatus::Running
    });

    let search_over = Condition::new(|s: &PlanningState| s.memory.search_time > SEARCH_DURATION);
    let stop = Action::new(|s: &mut PlanningState| {
        s.body.velocity = Vec3::ZERO;
        BtStatus::Success
    });

    let roam: Vec<Box<dyn BtNode<PlanningState>>> = vec![
        Box::new(searching),
        Box::new(pick_point),
        Box::new(move_to_point),
    ];
    let finish: Vec<Box<dyn BtNode<PlanningState>>> = vec![Box::new(search_over), Box::new(stop)];
    let root: Vec<Box<dyn BtNode<PlanningState>>> = vec![
        Box::new(Sequence::new(roam)),
        Box::new(Sequence::new(finish)),
    ];
    BehaviorTree::new(Box::new(Selector::new(root)))
}
