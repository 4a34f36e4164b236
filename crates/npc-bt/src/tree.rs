use tracing::trace;

use crate::bt::{BtNode, BtStatus};

/// Root wrapper ticked once per simulation step.
pub struct BehaviorTree<C> {
    root: Box<dyn BtNode<C>>,
    last: Option<BtStatus>,
}

impl<C> BehaviorTree<C> {
    pub fn new(root: Box<dyn BtNode<C>>) -> Self {
        Self { root, last: None }
    }

    /// Status of the most recent tick, or `None` before the first one.
    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn tick(&mut self, ctx: &mut C) -> BtStatus {
        let status = self.root.tick(ctx);
        self.last = Some(status);
        if status.is_terminal() {
            trace!(?status, "behavior tree finished");
            self.root.reset();
        }
        status
    }

    /// Abort any running branch so the next tick starts from the root's first child.
    pub fn reset(&mut self) {
        self.root.reset();
        self.last = None;
    }
}

impl<C> core::fmt::Debug for BehaviorTree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
