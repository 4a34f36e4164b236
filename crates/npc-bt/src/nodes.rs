use crate::bt::{BtNode, BtStatus};

/// Leaf that runs a closure and returns its status unchanged.
pub struct Action<F> {
    run: F,
}

impl<F> Action<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<C, F> BtNode<C> for Action<F>
where
    F: FnMut(&mut C) -> BtStatus + Send,
{
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        (self.run)(ctx)
    }

    fn reset(&mut self) {}
}

/// Leaf predicate. Never returns `Running`.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<C, F> BtNode<C> for Condition<F>
where
    F: FnMut(&C) -> bool + Send,
{
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        BtStatus::from((self.cond)(&*ctx))
    }

    fn reset(&mut self) {}
}

/// Runs children in order until one fails.
///
/// A `Running` child is resumed on the next tick without re-ticking the children before it.
pub struct Sequence<C> {
    children: Vec<Box<dyn BtNode<C>>>,
    index: usize,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Box<dyn BtNode<C>>>) -> Self {
        Self { children, index: 0 }
    }

    pub fn current_child(&self) -> usize {
        self.index
    }
}

impl<C> BtNode<C> for Sequence<C> {
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Failure => {
                    self.reset();
                    return BtStatus::Failure;
                }
                BtStatus::Success => self.index += 1,
            }
        }

        self.reset();
        BtStatus::Success
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Tries children in order until one succeeds.
pub struct Selector<C> {
    children: Vec<Box<dyn BtNode<C>>>,
    index: usize,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Box<dyn BtNode<C>>>) -> Self {
        Self { children, index: 0 }
    }

    pub fn current_child(&self) -> usize {
        self.index
    }
}

impl<C> BtNode<C> for Selector<C> {
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                BtStatus::Running => return BtStatus::Running,
                BtStatus::Success => {
                    self.reset();
                    return BtStatus::Success;
                }
                BtStatus::Failure => self.index += 1,
            }
        }

        self.reset();
        BtStatus::Failure
    }

    fn reset(&mut self) {
        self.index = 0;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Ticks every child on every tick and decides from the counts of that pass.
///
/// The success threshold is checked before the failure threshold, so a pass that meets both
/// returns `Success`. A threshold of 0 is met by any pass.
pub struct Parallel<C> {
    children: Vec<Box<dyn BtNode<C>>>,
    success_policy: usize,
    failure_policy: usize,
}

impl<C> Parallel<C> {
    pub fn new(
        success_policy: usize,
        failure_policy: usize,
        children: Vec<Box<dyn BtNode<C>>>,
    ) -> Self {
        Self {
            children,
            success_policy,
            failure_policy,
        }
    }

    pub fn success_policy(&self) -> usize {
        self.success_policy
    }

    pub fn failure_policy(&self) -> usize {
        self.failure_policy
    }
}

impl<C> BtNode<C> for Parallel<C> {
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        let mut successes = 0;
        let mut failures = 0;
        for child in self.children.iter_mut() {
            match child.tick(ctx) {
                BtStatus::Success => successes += 1,
                BtStatus::Failure => failures += 1,
                BtStatus::Running => {}
            }
        }

        let status = if successes >= self.success_policy {
            BtStatus::Success
        } else if failures >= self.failure_policy {
            BtStatus::Failure
        } else {
            BtStatus::Running
        };

        // Children still running when the node settles must not resume on the next pass.
        if status.is_terminal() {
            self.reset();
        }
        status
    }

    fn reset(&mut self) {
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}
