//! State behind the schedule list hook.

use crate::events::CalendarEvent;
use crate::request_slot::{AbortHandle, RequestSlot, Ticket};
use crate::{ApiError, FetchParams, ScheduleRecord};

/// What a completed fetch did to the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The event list was replaced with this many events
    Replaced(usize),
    /// The fetch failed; the message was stored and should be shown
    Failed(String),
    /// Superseded or cancelled; nothing changed
    Ignored,
}

/// Calendar events for one calendar, plus the request currently filling them.
pub struct ScheduleFeed<H: AbortHandle> {
    slot: RequestSlot<H>,
    events: Vec<CalendarEvent>,
    error: Option<String>,
}

impl<H: AbortHandle> ScheduleFeed<H> {
    pub fn new() -> Self {
        Self {
            slot: RequestSlot::new(),
            events: Vec::new(),
            error: None,
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.slot.in_flight()
    }

    /// Start a fetch.
    ///
    /// The previous request is aborted first, even if `params` turn out to
    /// be invalid. Invalid params record a validation error and return it;
    /// the caller must not touch the network in that case.
    pub fn begin(&mut self, params: &FetchParams, handle: H) -> Result<Ticket, ApiError> {
        self.slot.cancel();
        self.error = None;

        if let Err(e) = params.validate() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        Ok(self.slot.begin(handle))
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<ScheduleRecord>, ApiError>,
    ) -> FeedUpdate {
        if !self.slot.finish(ticket) {
            return FeedUpdate::Ignored;
        }

        match result {
            Ok(records) => {
                self.events = CalendarEvent::from_records(&records);
                FeedUpdate::Replaced(self.events.len())
            }
            Err(e) if e.is_cancelled() => FeedUpdate::Ignored,
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                FeedUpdate::Failed(message)
            }
        }
    }

    /// Abort the outstanding request. Later completions are ignored.
    pub fn teardown(&mut self) {
        self.slot.cancel();
    }
}

impl<H: AbortHandle> Default for ScheduleFeed<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request_slot::testing::FlagHandle;
    use crate::ScheduleScope;

    fn record(id: i64, title: &str) -> ScheduleRecord {
        ScheduleRecord {
            id,
            title: Some(title.to_string()),
            content: None,
            spot: None,
            start_date: "2025-01-10".to_string(),
            end_date: "2025-01-10".to_string(),
            club_id: Some(5),
            club_name: None,
            check_list_id: None,
        }
    }

    fn january() -> FetchParams {
        FetchParams::new(ScheduleScope::Club(Some(5))).with_range("2025-01-01", "2025-01-31")
    }

    #[test]
    fn test_missing_club_id_never_starts_a_request() {
        let mut feed = ScheduleFeed::new();
        let handle = FlagHandle::default();

        let result = feed.begin(&FetchParams::new(ScheduleScope::Club(None)), handle);

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(feed.error(), Some("유효하지 않은 모임입니다."));
        assert!(!feed.loading());
    }

    #[test]
    fn test_successful_fetch_replaces_events() {
        let mut feed = ScheduleFeed::new();
        let ticket = feed.begin(&january(), FlagHandle::default()).unwrap();
        assert!(feed.loading());

        let update = feed.complete(ticket, Ok(vec![record(10, "Demo")]));

        assert_eq!(update, FeedUpdate::Replaced(1));
        assert_eq!(feed.events()[0].id, "10");
        assert!(!feed.loading());

        let ticket = feed.begin(&january(), FlagHandle::default()).unwrap();
        feed.complete(ticket, Ok(vec![]));
        assert!(feed.events().is_empty());
    }

    #[test]
    fn test_superseded_fetch_cannot_overwrite() {
        let mut feed = ScheduleFeed::new();
        let handle_a = FlagHandle::default();
        let a = feed.begin(&january(), handle_a.clone()).unwrap();
        let b = feed.begin(&january(), FlagHandle::default()).unwrap();
        assert!(handle_a.aborted());

        assert_eq!(feed.complete(b, Ok(vec![record(2, "B")])), FeedUpdate::Replaced(1));
        // A resolves late, e.g. the response was already buffered
        assert_eq!(feed.complete(a, Ok(vec![record(1, "A")])), FeedUpdate::Ignored);

        assert_eq!(feed.events().len(), 1);
        assert_eq!(feed.events()[0].title, "B");
    }

    #[test]
    fn test_stale_failure_is_not_recorded() {
        let mut feed = ScheduleFeed::new();
        let a = feed.begin(&january(), FlagHandle::default()).unwrap();
        let _b = feed.begin(&january(), FlagHandle::default()).unwrap();

        let update = feed.complete(a, Err(ApiError::Network("reset".to_string())));

        assert_eq!(update, FeedUpdate::Ignored);
        assert_eq!(feed.error(), None);
    }

    #[test]
    fn test_cancellation_is_silent() {
        let mut feed = ScheduleFeed::new();
        let ticket = feed.begin(&january(), FlagHandle::default()).unwrap();

        assert_eq!(feed.complete(ticket, Err(ApiError::Cancelled)), FeedUpdate::Ignored);
        assert_eq!(feed.error(), None);
    }

    #[test]
    fn test_failure_is_recorded_and_cleared_by_next_fetch() {
        let mut feed = ScheduleFeed::new();
        let ticket = feed.begin(&january(), FlagHandle::default()).unwrap();
        let update = feed.complete(
            ticket,
            Err(ApiError::AccessDenied { message: "권한이 없습니다.".to_string() }),
        );
        assert_eq!(update, FeedUpdate::Failed("권한이 없습니다.".to_string()));
        assert_eq!(feed.error(), Some("권한이 없습니다."));

        feed.begin(&january(), FlagHandle::default()).unwrap();
        assert_eq!(feed.error(), None);
    }

    #[test]
    fn test_teardown_aborts_and_ignores_late_result() {
        let mut feed = ScheduleFeed::new();
        let handle = FlagHandle::default();
        let ticket = feed.begin(&january(), handle.clone()).unwrap();

        feed.teardown();

        assert!(handle.aborted());
        assert_eq!(feed.complete(ticket, Ok(vec![record(1, "late")])), FeedUpdate::Ignored);
        assert!(feed.events().is_empty());
    }

    #[test]
    fn test_invalid_params_abort_previous_request() {
        let mut feed = ScheduleFeed::new();
        let handle = FlagHandle::default();
        let ticket = feed.begin(&january(), handle.clone()).unwrap();

        let _ = feed.begin(&FetchParams::new(ScheduleScope::Club(None)), FlagHandle::default());

        assert!(handle.aborted());
        assert_eq!(feed.complete(ticket, Ok(vec![record(1, "old")])), FeedUpdate::Ignored);
    }
}
