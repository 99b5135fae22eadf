use crate::input::{Direction, direction_change_is_valid};

/// Resolves turn requests into at most one accepted heading change per tick.
///
/// Reversals are judged against the heading committed on the last completed
/// tick, not against a turn already pending. Once a turn is accepted, every
/// further request is dropped until the engine calls [`DirectionArbiter::tick`],
/// so two quick perpendicular turns can never fold into a reversal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionArbiter {
    committed: Direction,
    pending: Direction,
    accepted_this_tick: bool,
}

impl DirectionArbiter {
    /// Creates an arbiter whose committed and pending headings are `heading`.
    #[must_use]
    pub fn new(heading: Direction) -> Self {
        Self {
            committed: heading,
            pending: heading,
            accepted_this_tick: false,
        }
    }

    /// Offers a new heading. Returns whether it was accepted.
    ///
    /// Rejected requests leave the arbiter untouched.
    pub fn request_turn(&mut self, heading: Direction) -> bool {
        if self.accepted_this_tick || !direction_change_is_valid(self.committed, heading) {
            return false;
        }

        self.pending = heading;
        self.accepted_this_tick = true;
        true
    }

    /// Commits the pending heading and reopens input for the next tick.
    pub fn tick(&mut self) {
        self.committed = self.pending;
        self.accepted_this_tick = false;
    }

    /// Heading the next movement will use.
    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Heading applied on the last completed tick.
    #[must_use]
    pub fn committed(&self) -> Direction {
        self.committed
    }

    #[cfg(test)]
    #[must_use]
    pub fn accepted_this_tick(&self) -> bool {
        self.accepted_this_tick
    }
}
