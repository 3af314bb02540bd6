//! Read/detail modal state and the outcomes modals report to their page.

use crate::request_slot::{AbortHandle, RequestSlot, Ticket};
use crate::{ApiError, ScheduleDetail};

/// Where a modal wants the page to go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Reopen the schedule in the create/edit modal
    EditSchedule { schedule_id: i64 },
    /// Existing checklist linked to a schedule
    Checklist { checklist_id: i64 },
    /// Start a new checklist for a schedule
    CreateChecklist { schedule_id: i64 },
}

impl NavTarget {
    /// Page URL for targets outside the calendar. Editing stays in-page.
    pub fn href(&self, club_id: Option<i64>) -> Option<String> {
        match *self {
            NavTarget::EditSchedule { .. } => None,
            NavTarget::Checklist { checklist_id } => Some(match club_id {
                Some(club_id) => format!("/checklists/{}?clubId={}", checklist_id, club_id),
                None => format!("/checklists/{}", checklist_id),
            }),
            NavTarget::CreateChecklist { schedule_id } => Some(match club_id {
                Some(club_id) => format!(
                    "/checklists/create?clubId={}&scheduleId={}",
                    club_id, schedule_id
                ),
                None => format!("/checklists/create?scheduleId={}", schedule_id),
            }),
        }
    }

    /// Toast shown before leaving the calendar
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            NavTarget::EditSchedule { .. } => None,
            NavTarget::Checklist { .. } => Some("체크리스트로 이동합니다."),
            NavTarget::CreateChecklist { .. } => Some("체크리스트 생성 페이지로 이동합니다."),
        }
    }
}

/// How a modal closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Nothing changed
    Closed,
    /// Data changed; the calendar should refetch its range
    Refreshed,
    NavigateTo(NavTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Closed,
    Loading { schedule_id: i64 },
    Loaded { schedule_id: i64, detail: ScheduleDetail },
    Failed { schedule_id: i64, message: String },
}

impl DetailState {
    pub fn schedule_id(&self) -> Option<i64> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { schedule_id }
            | DetailState::Loaded { schedule_id, .. }
            | DetailState::Failed { schedule_id, .. } => Some(*schedule_id),
        }
    }
}

/// Detail modal controller: `Closed -> Loading -> {Loaded, Failed}`.
pub struct DetailModal<H: AbortHandle> {
    slot: RequestSlot<H>,
    state: DetailState,
    deleting: bool,
}

impl<H: AbortHandle> DetailModal<H> {
    pub fn new() -> Self {
        Self {
            slot: RequestSlot::new(),
            state: DetailState::Closed,
            deleting: false,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Start loading `schedule_id`, aborting any earlier detail request.
    pub fn open(&mut self, schedule_id: i64, handle: H) -> Ticket {
        let ticket = self.slot.begin(handle);
        self.state = DetailState::Loading { schedule_id };
        self.deleting = false;
        ticket
    }

    /// Apply a detail response. Returns the error to surface, if any.
    /// Stale responses and cancellations return `None`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<ScheduleDetail, ApiError>,
    ) -> Option<ApiError> {
        if !self.slot.finish(ticket) {
            return None;
        }
        let schedule_id = self.state.schedule_id()?;

        match result {
            Ok(detail) => {
                self.state = DetailState::Loaded { schedule_id, detail };
                None
            }
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                self.state = DetailState::Failed {
                    schedule_id,
                    message: e.to_string(),
                };
                Some(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.slot.cancel();
        self.state = DetailState::Closed;
        self.deleting = false;
    }

    /// Mark a delete as started. Returns the id to delete, or `None` when
    /// nothing is open or a delete is already running.
    pub fn begin_delete(&mut self) -> Option<i64> {
        if self.deleting {
            return None;
        }
        let schedule_id = self.state.schedule_id()?;
        self.deleting = true;
        Some(schedule_id)
    }

    /// A successful delete closes the modal with [`ModalOutcome::Refreshed`].
    /// A failed one keeps it open.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> Option<ModalOutcome> {
        self.deleting = false;
        match result {
            Ok(()) => {
                self.close();
                Some(ModalOutcome::Refreshed)
            }
            Err(_) => None,
        }
    }

    /// Target of the checklist button: the linked checklist when there is
    /// one, otherwise checklist creation for this schedule.
    pub fn checklist_target(&self) -> Option<NavTarget> {
        match &self.state {
            DetailState::Closed => None,
            DetailState::Loaded {
                detail:
                    ScheduleDetail {
                        check_list_id: Some(checklist_id),
                        ..
                    },
                ..
            } => Some(NavTarget::Checklist {
                checklist_id: *checklist_id,
            }),
            other => other
                .schedule_id()
                .map(|schedule_id| NavTarget::CreateChecklist { schedule_id }),
        }
    }

    pub fn edit_target(&self) -> Option<NavTarget> {
        self.state
            .schedule_id()
            .map(|schedule_id| NavTarget::EditSchedule { schedule_id })
    }
}

impl<H: AbortHandle> Default for DetailModal<H> {
    fn default() -> Self {
        Self::new()
    }
}
