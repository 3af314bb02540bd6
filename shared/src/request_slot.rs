//! Single-slot request tracking.
//!
//! A [`RequestSlot`] remembers at most one in-flight request. Starting a new
//! one aborts the previous handle, and only the ticket of the latest request
//! is accepted when results come back.

/// Something that can cancel an in-flight request.
pub trait AbortHandle {
    fn abort(&self);
}

/// Identifies one request started through a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct RequestSlot<H: AbortHandle> {
    current: Option<(Ticket, H)>,
    next: u64,
}

impl<H: AbortHandle> RequestSlot<H> {
    pub fn new() -> Self {
        Self { current: None, next: 0 }
    }

    /// Abort whatever is in flight and track `handle` instead.
    pub fn begin(&mut self, handle: H) -> Ticket {
        self.cancel();
        self.next += 1;
        let ticket = Ticket(self.next);
        self.current = Some((ticket, handle));
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        matches!(&self.current, Some((current, _)) if *current == ticket)
    }

    /// Release the slot if `ticket` is still the latest request. Returns
    /// whether the caller may apply its result.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Abort the in-flight request, if any. Used on teardown.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.current.take() {
            handle.abort();
        }
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

impl<H: AbortHandle> Default for RequestSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::AbortHandle;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Handle that records whether it was aborted
    #[derive(Clone, Default)]
    pub struct FlagHandle(pub Rc<Cell<bool>>);

    impl FlagHandle {
        pub fn aborted(&self) -> bool {
            self.0.get()
        }
    }

    impl AbortHandle for FlagHandle {
        fn abort(&self) {
            self.0.set(true);
        }
    }
}
