#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn is_terminal(self) -> bool {
        self != BtStatus::Running
    }
}

impl From<bool> for BtStatus {
    fn from(ok: bool) -> Self {
        if ok {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}

/// A behavior tree node evaluated against a caller-owned context `C`.
///
/// `tick` must leave the node's internal state consistent with the status it returns: after
/// `Running` the next tick resumes where this one stopped, after a terminal status the node starts
/// over. `reset` aborts an in-flight execution and recursively clears all children.
pub trait BtNode<C>: Send {
    fn tick(&mut self, ctx: &mut C) -> BtStatus;

    fn reset(&mut self);

    fn boxed(self) -> Box<dyn BtNode<C>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<C, N> BtNode<C> for Box<N>
where
    N: BtNode<C> + ?Sized,
{
    fn tick(&mut self, ctx: &mut C) -> BtStatus {
        (**self).tick(ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
