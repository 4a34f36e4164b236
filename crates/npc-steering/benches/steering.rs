use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use npc_core::{AgentBody, Neighbor, Vec3};
use npc_steering::{
    Alignment, Cohesion, Separation, SteeringBehavior, SteeringController, Wander,
};

fn make_neighbors(count: usize, spacing: f32) -> Vec<Neighbor> {
    let side = (count as f32).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let x = (i % side) as f32 * spacing;
            let z = (i / side) as f32 * spacing;
            let mut body =
                AgentBody::new(format!("n{i}"), Vec3::new(x, 0.0, z)).expect("valid id");
            body.velocity = Vec3::new(1.0, 0.0, 0.5);
            Neighbor::of(&body)
        })
        .collect()
}

fn flocking_controller() -> SteeringController {
    let mut ctl = SteeringController::default();
    ctl.add_behavior(SteeringBehavior::weighted(Separation::default(), 1.5));
    ctl.add_behavior(SteeringBehavior::weighted(Alignment::default(), 1.0));
    ctl.add_behavior(SteeringBehavior::weighted(Cohesion::default(), 1.0));
    ctl.add_behavior(SteeringBehavior::weighted(Wander::new(1), 0.1));
    ctl
}

fn bench_steering(c: &mut Criterion) {
    let dt = 1.0 / 60.0;
    let mut group = c.benchmark_group("npc-steering/flocking_update");

    for &n in &[8usize, 64, 512] {
        let neighbors = make_neighbors(n, 1.0);
        let mut ctl = flocking_controller();
        let mut body = AgentBody::new("bench", Vec3::new(2.5, 0.0, 2.5)).expect("valid id");
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &_n| {
            b.iter(|| {
                ctl.update(&mut body, &neighbors, dt);
                black_box(body.velocity);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_steering);
criterion_main!(benches);
