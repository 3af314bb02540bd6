use serde::{Deserialize, Serialize};

pub mod calendar_grid;
pub mod detail;
pub mod error;
pub mod events;
pub mod feed;
pub mod form;
pub mod request_slot;

pub use calendar_grid::{CalendarView, DateRange, DateSelection, MonthView, WeekView};
pub use detail::{DetailModal, DetailState, ModalOutcome, NavTarget};
pub use error::{ApiError, ResourceKind};
pub use events::{CalendarEvent, EventDisplay};
pub use feed::{FeedUpdate, ScheduleFeed};
pub use form::{EditMode, EditPhase, FieldChange, FormField, ScheduleForm};
pub use request_slot::{AbortHandle, RequestSlot, Ticket};

/// A schedule as returned by the list endpoints.
///
/// Records from `/schedules/me` additionally carry the owning club's id and
/// name; records from `/schedules/clubs/{id}` usually don't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub spot: Option<String>,
    /// ISO 8601, either `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM[:SS]`
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub club_id: Option<i64>,
    #[serde(default)]
    pub club_name: Option<String>,
    #[serde(default)]
    pub check_list_id: Option<i64>,
}

/// Single schedule payload from `GET /api/v1/schedules/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetail {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub spot: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub club_id: Option<i64>,
    /// Linked checklist, if one was already created for this schedule
    #[serde(default)]
    pub check_list_id: Option<i64>,
}

/// Body of `POST /api/v1/schedules` and `PUT /api/v1/schedules/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWriteRequest {
    pub club_id: i64,
    pub title: String,
    pub content: String,
    /// Combined `YYYY-MM-DDTHH:MM:00`
    pub start_date: String,
    pub end_date: String,
    pub spot: String,
}

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RsData<T> {
    /// Either a number or a string like `"200-1"`
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClubRole {
    Host,
    Manager,
    Participant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipState {
    Joining,
    Pending,
    Invited,
    #[serde(other)]
    Other,
}

/// The caller's membership in a club, from `GET /api/v1/my-clubs/{clubId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyInfoInClub {
    #[serde(default)]
    pub role: Option<ClubRole>,
    #[serde(default)]
    pub state: Option<MembershipState>,
}

/// Whether a calendar viewer may create, edit and delete schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    #[default]
    ReadOnly,
    Editable,
}

impl CalendarMode {
    /// Hosts and managers edit; participants, pending or invited members and
    /// unknown viewers only read.
    pub fn for_member(info: Option<&MyInfoInClub>) -> Self {
        let Some(info) = info else {
            return CalendarMode::ReadOnly;
        };
        let joined = matches!(info.state, None | Some(MembershipState::Joining));
        match info.role {
            Some(ClubRole::Host) | Some(ClubRole::Manager) if joined => CalendarMode::Editable,
            _ => CalendarMode::ReadOnly,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, CalendarMode::ReadOnly)
    }
}

/// Which schedule list a calendar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleScope {
    /// Every schedule across the caller's clubs
    Mine,
    /// One club's schedules. `None` means the page had no usable club id.
    Club(Option<i64>),
}

/// Query for a schedule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub scope: ScheduleScope,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FetchParams {
    pub fn new(scope: ScheduleScope) -> Self {
        Self {
            scope,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_range(mut self, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self.end_date = Some(end_date.into());
        self
    }

    /// Club-scoped queries need a positive club id. Runs before any request.
    pub fn validate(&self) -> Result<(), ApiError> {
        self.base_path().map(|_| ())
    }

    /// Path plus query string relative to the API base URL
    pub fn path(&self) -> Result<String, ApiError> {
        let base = self.base_path()?;
        let query = self.query_string();
        if query.is_empty() {
            Ok(base)
        } else {
            Ok(format!("{}?{}", base, query))
        }
    }

    fn base_path(&self) -> Result<String, ApiError> {
        match self.scope {
            ScheduleScope::Club(Some(id)) if id > 0 => Ok(format!("/api/v1/schedules/clubs/{}", id)),
            ScheduleScope::Club(_) => Err(ApiError::Validation(
                "유효하지 않은 모임입니다.".to_string(),
            )),
            ScheduleScope::Mine => Ok("/api/v1/schedules/me".to_string()),
        }
    }

    fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("startDate={}", start));
        }
        if let Some(end) = self.end_date.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("endDate={}", end));
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_record_from_wire() {
        let json = r#"{
            "id": 10,
            "title": "Demo",
            "startDate": "2025-01-10",
            "endDate": "2025-01-10",
            "clubId": 5
        }"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 10);
        assert_eq!(record.title.as_deref(), Some("Demo"));
        assert_eq!(record.club_id, Some(5));
        assert_eq!(record.club_name, None);
        assert_eq!(record.check_list_id, None);
    }

    #[test]
    fn test_envelope_with_list() {
        let json = r#"{"code":"200-1","message":"ok","data":[{"id":1,"startDate":"2025-01-01","endDate":"2025-01-02"}]}"#;
        let envelope: RsData<Vec<ScheduleRecord>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.unwrap().len(), 1);
        assert_eq!(envelope.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_write_request_uses_camel_case() {
        let request = ScheduleWriteRequest {
            club_id: 3,
            title: "정기 모임".to_string(),
            content: String::new(),
            start_date: "2025-02-01T10:00:00".to_string(),
            end_date: "2025-02-01T11:00:00".to_string(),
            spot: "강남역".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["clubId"], 3);
        assert_eq!(value["startDate"], "2025-02-01T10:00:00");
        assert_eq!(value["spot"], "강남역");
    }

    #[test]
    fn test_club_scope_requires_id() {
        assert!(FetchParams::new(ScheduleScope::Club(None)).validate().is_err());
        assert!(FetchParams::new(ScheduleScope::Club(Some(0))).validate().is_err());
        assert!(FetchParams::new(ScheduleScope::Club(Some(5))).validate().is_ok());
        assert!(FetchParams::new(ScheduleScope::Mine).validate().is_ok());
    }

    #[test]
    fn test_fetch_params_path() {
        let params = FetchParams::new(ScheduleScope::Club(Some(5))).with_range("2025-01-01", "2025-01-31");
        assert_eq!(
            params.path().unwrap(),
            "/api/v1/schedules/clubs/5?startDate=2025-01-01&endDate=2025-01-31"
        );

        let mine = FetchParams::new(ScheduleScope::Mine);
        assert_eq!(mine.path().unwrap(), "/api/v1/schedules/me");

        let missing = FetchParams::new(ScheduleScope::Club(None));
        assert!(matches!(missing.path(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_calendar_mode_for_member() {
        let host = MyInfoInClub { role: Some(ClubRole::Host), state: Some(MembershipState::Joining) };
        let manager = MyInfoInClub { role: Some(ClubRole::Manager), state: None };
        let participant = MyInfoInClub { role: Some(ClubRole::Participant), state: Some(MembershipState::Joining) };
        let invited_host = MyInfoInClub { role: Some(ClubRole::Host), state: Some(MembershipState::Invited) };

        assert_eq!(CalendarMode::for_member(Some(&host)), CalendarMode::Editable);
        assert_eq!(CalendarMode::for_member(Some(&manager)), CalendarMode::Editable);
        assert_eq!(CalendarMode::for_member(Some(&participant)), CalendarMode::ReadOnly);
        assert_eq!(CalendarMode::for_member(Some(&invited_host)), CalendarMode::ReadOnly);
        assert_eq!(CalendarMode::for_member(None), CalendarMode::ReadOnly);
    }

    #[test]
    fn test_membership_state_tolerates_unknown_values() {
        let info: MyInfoInClub = serde_json::from_str(r#"{"role":"PARTICIPANT","state":"BANNED"}"#).unwrap();
        assert_eq!(info.state, Some(MembershipState::Other));
    }
}
