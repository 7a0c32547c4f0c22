//! Custom actions for the Order actor.
//!
//! Status writes go through actions rather than the generic update so the actor can apply
//! a compare-and-swap atomically: the check and the write happen inside one message.

use crate::model::StatusId;

/// Status writes against a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Overwrite the status unconditionally.
    SetStatus(StatusId),
    /// Write `status` only if the stored status still equals `expected`.
    CompareAndSetStatus { expected: StatusId, status: StatusId },
}

/// Outcome of an [`OrderAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActionResult {
    /// The status was written; carries the value it replaced.
    Written { previous: StatusId },
    /// A conditional write found another status and left it untouched.
    Conflict { actual: StatusId },
}
