//! The per-frame indicator sync loop, modeled as an explicit handle.
//!
//! The loop is not a timer. Each fired frame decides whether to arm the
//! next one; the host (render loop, test, CLI) asks for the pending ticket
//! and fires it when its next frame comes around. Cancelling drops the
//! ticket, so a late fire of an old ticket is recognized as stale.

/// Identifies one armed frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(u64);

/// Result of firing a frame ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Indicators refreshed and the next frame is armed.
    Rearmed,
    /// Indicators refreshed (or drag in progress) and the loop stopped.
    Stopped,
    /// The ticket was cancelled or already fired; nothing happened.
    Stale,
}

/// Self-terminating recurring frame request.
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    armed: Option<FrameTicket>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next frame, replacing any pending ticket.
    pub fn arm(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_id);
        self.next_id += 1;
        self.armed = Some(ticket);
        ticket
    }

    /// Arm a frame only if none is pending.
    pub fn ensure_armed(&mut self) -> FrameTicket {
        match self.armed {
            Some(ticket) => ticket,
            None => self.arm(),
        }
    }

    /// Drop the pending ticket. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    /// The ticket the host should fire next, if the loop is running.
    pub fn pending(&self) -> Option<FrameTicket> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Consume `ticket` if it is the armed one.
    pub fn fire(&mut self, ticket: FrameTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
