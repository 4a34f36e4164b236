use criterion::{black_box, criterion_group, criterion_main, Criterion};
use npc_bt::{Action, BehaviorTree, BtNode, BtStatus, Condition, Selector, Sequence};

#[derive(Default)]
struct Counter {
    ticks: u64,
}

fn bench_bt_tick(c: &mut Criterion) {
    let conditions = (0..32)
        .map(|_| Box::new(Condition::new(|_: &Counter| true)) as Box<dyn BtNode<Counter>>)
        .collect::<Vec<_>>();

    let root: Box<dyn BtNode<Counter>> = Box::new(Selector::new(vec![
        Box::new(Sequence::new(conditions)) as Box<dyn BtNode<Counter>>,
        Box::new(Action::new(|c: &mut Counter| {
            c.ticks += 1;
            BtStatus::Success
        })),
    ]));
    let mut tree = BehaviorTree::new(root);
    let mut ctx = Counter::default();

    c.bench_function("npc-bt/tick(conditions=32)", |b| {
        b.iter(|| {
            black_box(tree.tick(&mut ctx));
        })
    });
}

criterion_group!(benches, bench_bt_tick);
criterion_main!(benches);
