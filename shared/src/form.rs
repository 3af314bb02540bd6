//! Create/edit form for a schedule.
//!
//! Date and time are edited separately and only combined into the wire
//! timestamp on submit. Edits that would put the end before the start are
//! snapped instead of accepted.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::calendar_grid::DateSelection;
use crate::{ApiError, ScheduleDetail, ScheduleWriteRequest};

pub const END_DATE_WARNING: &str = "종료일은 시작일보다 같거나 이후여야 합니다.";
pub const END_TIME_WARNING: &str = "종료시간은 시작시간보다 같거나 이후여야 합니다.";
pub const RANGE_ERROR: &str = "종료일과 종료시간은 시작일과 시작시간보다 같거나 이후여야 합니다.";

const FALLBACK_START_TIME: &str = "09:00";
const FALLBACK_END_TIME: &str = "10:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit { schedule_id: i64 },
}

impl EditMode {
    pub fn from_schedule_id(schedule_id: Option<i64>) -> Self {
        match schedule_id {
            Some(schedule_id) => EditMode::Edit { schedule_id },
            None => EditMode::Create,
        }
    }
}

/// Lifecycle of the create/edit modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Closed,
    /// Loading the stored schedule before editing
    Prefilling,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
    Spot,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

/// Result of applying one field edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChange {
    Applied,
    /// The range was adjusted to keep end >= start
    Snapped { warning: Option<&'static str> },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleForm {
    pub club_id: i64,
    pub title: String,
    pub content: String,
    pub spot: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM`
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

/// Default times for a new schedule: the next full hour and the hour after.
pub fn initial_times(hour: u32, minute: u32) -> (String, String) {
    let mut start = hour % 24;
    if minute > 0 {
        start = (start + 1) % 24;
    }
    let end = (start + 1) % 24;
    (format!("{:02}:00", start), format!("{:02}:00", end))
}

/// `true` only when all four parts are present, parse, and end < start.
pub fn is_end_before_start(start_date: &str, start_time: &str, end_date: &str, end_time: &str) -> bool {
    match (combine(start_date, start_time), combine(end_date, end_time)) {
        (Some(start), Some(end)) => end < start,
        _ => false,
    }
}

fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    if date.is_empty() || time.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{}T{}:00", date, time), "%Y-%m-%dT%H:%M:%S").ok()
}

/// Split `YYYY-MM-DDTHH:MM[:SS]` into date and `HH:MM`
fn split_stamp(stamp: &str) -> (String, Option<String>) {
    let mut parts = stamp.splitn(2, 'T');
    let date = parts.next().unwrap_or_default().to_string();
    let time = parts
        .next()
        .and_then(|t| t.get(..5))
        .map(str::to_string);
    (date, time)
}

impl ScheduleForm {
    /// Blank form for a new schedule, optionally seeded from a calendar
    /// selection. `default_times` is usually [`initial_times`] for now.
    pub fn for_create(
        club_id: i64,
        selection: Option<&DateSelection>,
        default_times: (String, String),
    ) -> Self {
        let (default_start_time, default_end_time) = default_times;
        let mut form = Self {
            club_id,
            start_time: default_start_time,
            end_time: default_end_time,
            ..Self::default()
        };

        let Some(selection) = selection else {
            return form;
        };

        let (start_date, start_time) = split_stamp(&selection.start);
        let (end_date, end_time) = split_stamp(&selection.end);

        if let Some(start_time) = start_time {
            // Time-grid selection: keep the selected times
            form.start_date = start_date;
            form.start_time = start_time;
            if let Some(end_time) = end_time {
                form.end_time = end_time;
            }
            form.end_date = if end_date.is_empty() {
                form.start_date.clone()
            } else {
                end_date
            };
        } else {
            // Day selection: the end day is exclusive
            form.end_date = if !end_date.is_empty() && end_date != start_date {
                NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")
                    .map(|end| (end - Duration::days(1)).format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|_| start_date.clone())
            } else {
                start_date.clone()
            };
            form.start_date = start_date;
        }
        form
    }

    /// Form prefilled from a stored schedule
    pub fn from_detail(club_id: i64, detail: &ScheduleDetail) -> Self {
        let (start_date, start_time) = split_stamp(&detail.start_date);
        let (end_date, end_time) = split_stamp(&detail.end_date);
        Self {
            club_id,
            title: detail.title.clone().unwrap_or_default(),
            content: detail.content.clone().unwrap_or_default(),
            spot: detail.spot.clone().unwrap_or_default(),
            start_date,
            start_time: start_time.unwrap_or_else(|| FALLBACK_START_TIME.to_string()),
            end_date,
            end_time: end_time.unwrap_or_else(|| FALLBACK_END_TIME.to_string()),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Content => &self.content,
            FormField::Spot => &self.spot,
            FormField::StartDate => &self.start_date,
            FormField::StartTime => &self.start_time,
            FormField::EndDate => &self.end_date,
            FormField::EndTime => &self.end_time,
        }
    }

    pub fn is_end_before_start(&self) -> bool {
        is_end_before_start(&self.start_date, &self.start_time, &self.end_date, &self.end_time)
    }

    /// Apply one edit, keeping the combined end at or after the combined start.
    ///
    /// Moving the end before the start snaps the end back with a warning.
    /// Moving the start past the end drags the end along silently.
    pub fn set_field(&mut self, field: FormField, value: String) -> FieldChange {
        match field {
            FormField::Title => self.title = value,
            FormField::Content => self.content = value,
            FormField::Spot => self.spot = value,
            FormField::EndTime => {
                if is_end_before_start(&self.start_date, &self.start_time, &self.end_date, &value) {
                    self.end_time = self.start_time.clone();
                    self.settle_end();
                    return FieldChange::Snapped { warning: Some(END_TIME_WARNING) };
                }
                self.end_time = value;
            }
            FormField::StartTime => {
                if is_end_before_start(&self.start_date, &value, &self.end_date, &self.end_time) {
                    self.start_time = value.clone();
                    self.end_time = value;
                    self.settle_end();
                    return FieldChange::Snapped { warning: None };
                }
                self.start_time = value;
            }
            FormField::EndDate => {
                if is_end_before_start(&self.start_date, &self.start_time, &value, &self.end_time) {
                    self.end_date = self.start_date.clone();
                    self.settle_end();
                    return FieldChange::Snapped { warning: Some(END_DATE_WARNING) };
                }
                self.end_date = value;
            }
            FormField::StartDate => {
                if is_end_before_start(&value, &self.start_time, &self.end_date, &self.end_time) {
                    self.start_date = value.clone();
                    self.end_date = value;
                    self.settle_end();
                    return FieldChange::Snapped { warning: None };
                }
                self.start_date = value;
            }
        }
        FieldChange::Applied
    }

    /// After snapping one half of the end, pull the other half along if the
    /// range is still inverted.
    fn settle_end(&mut self) {
        if self.is_end_before_start() {
            self.end_date = self.start_date.clone();
            if self.is_end_before_start() {
                self.end_time = self.start_time.clone();
            }
        }
    }

    /// Build the request body. Fails without touching the network when a
    /// required field is empty or the range is inverted.
    pub fn to_request(&self) -> Result<ScheduleWriteRequest, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("제목을 입력하세요.".to_string()));
        }
        if self.start_date.is_empty()
            || self.start_time.is_empty()
            || self.end_date.is_empty()
            || self.end_time.is_empty()
        {
            return Err(ApiError::Validation("일시를 입력하세요.".to_string()));
        }
        if self.is_end_before_start() {
            return Err(ApiError::Validation(RANGE_ERROR.to_string()));
        }

        Ok(ScheduleWriteRequest {
            club_id: self.club_id,
            title: self.title.clone(),
            content: self.content.clone(),
            start_date: format!("{}T{}:00", self.start_date, self.start_time),
            end_date: format!("{}T{}:00", self.end_date, self.end_time),
            spot: self.spot.clone(),
        })
    }

    /// Clear the free-text fields after a successful save. Dates stay so the
    /// next schedule starts from the same day.
    pub fn reset_after_submit(&mut self, default_times: (String, String)) {
        self.title.clear();
        self.content.clear();
        self.spot.clear();
        self.start_time = default_times.0;
        self.end_time = default_times.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(start_date: &str, start_time: &str, end_date: &str, end_time: &str) -> ScheduleForm {
        ScheduleForm {
            club_id: 5,
            title: "정기 모임".to_string(),
            start_date: start_date.to_string(),
            start_time: start_time.to_string(),
            end_date: end_date.to_string(),
            end_time: end_time.to_string(),
            ..ScheduleForm::default()
        }
    }

    #[test]
    fn test_initial_times_round_up() {
        assert_eq!(initial_times(9, 0), ("09:00".to_string(), "10:00".to_string()));
        assert_eq!(initial_times(9, 1), ("10:00".to_string(), "11:00".to_string()));
        assert_eq!(initial_times(23, 30), ("00:00".to_string(), "01:00".to_string()));
        assert_eq!(initial_times(22, 45), ("23:00".to_string(), "00:00".to_string()));
    }

    #[test]
    fn test_end_date_before_start_is_snapped_with_warning() {
        let mut form = form("2025-02-01", "10:00", "2025-02-01", "11:00");

        let change = form.set_field(FormField::EndDate, "2025-01-31".to_string());

        assert_eq!(change, FieldChange::Snapped { warning: Some(END_DATE_WARNING) });
        assert_eq!(form.end_date, "2025-02-01");
        assert!(!form.is_end_before_start());
    }

    #[test]
    fn test_end_date_snap_also_fixes_earlier_end_time() {
        let mut form = form("2025-02-01", "10:00", "2025-02-02", "09:00");

        form.set_field(FormField::EndDate, "2025-01-31".to_string());

        assert_eq!(form.end_date, "2025-02-01");
        assert_eq!(form.end_time, "10:00");
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn test_end_time_before_start_is_snapped() {
        let mut form = form("2025-02-01", "10:00", "2025-02-01", "11:00");

        let change = form.set_field(FormField::EndTime, "09:30".to_string());

        assert_eq!(change, FieldChange::Snapped { warning: Some(END_TIME_WARNING) });
        assert_eq!(form.end_time, "10:00");
    }

    #[test]
    fn test_moving_start_past_end_drags_end_along() {
        let mut form = form("2025-02-01", "10:00", "2025-02-01", "11:00");

        let change = form.set_field(FormField::StartTime, "13:00".to_string());
        assert_eq!(change, FieldChange::Snapped { warning: None });
        assert_eq!((form.start_time.as_str(), form.end_time.as_str()), ("13:00", "13:00"));

        let change = form.set_field(FormField::StartDate, "2025-02-05".to_string());
        assert_eq!(change, FieldChange::Snapped { warning: None });
        assert_eq!((form.start_date.as_str(), form.end_date.as_str()), ("2025-02-05", "2025-02-05"));
    }

    #[test]
    fn test_valid_edits_apply() {
        let mut form = form("2025-02-01", "10:00", "2025-02-01", "11:00");
        assert_eq!(form.set_field(FormField::EndDate, "2025-02-03".to_string()), FieldChange::Applied);
        assert_eq!(form.set_field(FormField::EndTime, "08:00".to_string()), FieldChange::Applied);
        assert_eq!(form.set_field(FormField::Spot, "강남역".to_string()), FieldChange::Applied);
        assert_eq!(form.value(FormField::EndTime), "08:00");
        assert_eq!(form.value(FormField::Spot), "강남역");
    }

    #[test]
    fn test_incomplete_range_is_not_inverted() {
        assert!(!is_end_before_start("2025-02-01", "", "2025-01-01", "10:00"));
        assert!(!is_end_before_start("not-a-date", "10:00", "2025-01-01", "10:00"));
    }

    #[test]
    fn test_submit_blocked_while_inverted() {
        let inverted = form("2025-02-01", "10:00", "2025-01-31", "10:00");
        assert_eq!(inverted.to_request(), Err(ApiError::Validation(RANGE_ERROR.to_string())));

        let mut untitled = form("2025-02-01", "10:00", "2025-02-01", "11:00");
        untitled.title = "  ".to_string();
        assert!(matches!(untitled.to_request(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_request_combines_date_and_time() {
        let request = form("2025-02-01", "10:00", "2025-02-01", "11:30").to_request().unwrap();
        assert_eq!(request.start_date, "2025-02-01T10:00:00");
        assert_eq!(request.end_date, "2025-02-01T11:30:00");
        assert_eq!(request.club_id, 5);
    }

    #[test]
    fn test_create_from_day_selection_drops_exclusive_end() {
        let selection = DateSelection {
            start: "2025-03-10".to_string(),
            end: "2025-03-13".to_string(),
        };
        let form = ScheduleForm::for_create(5, Some(&selection), initial_times(9, 0));
        assert_eq!(form.start_date, "2025-03-10");
        assert_eq!(form.end_date, "2025-03-12");
        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.end_time, "10:00");

        let single = DateSelection {
            start: "2025-03-10".to_string(),
            end: "2025-03-11".to_string(),
        };
        let form = ScheduleForm::for_create(5, Some(&single), initial_times(9, 0));
        assert_eq!(form.end_date, "2025-03-10");
    }

    #[test]
    fn test_create_from_timed_selection_keeps_times() {
        let selection = DateSelection {
            start: "2025-03-10T14:00:00".to_string(),
            end: "2025-03-10T15:30:00".to_string(),
        };
        let form = ScheduleForm::for_create(5, Some(&selection), initial_times(9, 0));
        assert_eq!(form.start_date, "2025-03-10");
        assert_eq!(form.start_time, "14:00");
        assert_eq!(form.end_date, "2025-03-10");
        assert_eq!(form.end_time, "15:30");
    }

    #[test]
    fn test_prefill_from_detail() {
        let detail = ScheduleDetail {
            id: 42,
            title: Some("워크숍".to_string()),
            content: None,
            spot: Some("판교".to_string()),
            start_date: "2025-04-01T13:00:00".to_string(),
            end_date: "2025-04-02".to_string(),
            club_id: Some(5),
            check_list_id: None,
        };
        let form = ScheduleForm::from_detail(5, &detail);
        assert_eq!(form.title, "워크숍");
        assert_eq!(form.content, "");
        assert_eq!(form.start_date, "2025-04-01");
        assert_eq!(form.start_time, "13:00");
        assert_eq!(form.end_date, "2025-04-02");
        assert_eq!(form.end_time, FALLBACK_END_TIME);
    }

    #[test]
    fn test_reset_after_submit_keeps_dates() {
        let mut form = form("2025-02-01", "10:00", "2025-02-01", "11:00");
        form.spot = "강남역".to_string();
        form.reset_after_submit(initial_times(14, 10));
        assert_eq!(form.title, "");
        assert_eq!(form.spot, "");
        assert_eq!(form.start_date, "2025-02-01");
        assert_eq!(form.start_time, "15:00");
        assert_eq!(form.end_time, "16:00");
    }

    #[test]
    fn test_edit_mode_from_id() {
        assert_eq!(EditMode::from_schedule_id(None), EditMode::Create);
        assert_eq!(EditMode::from_schedule_id(Some(3)), EditMode::Edit { schedule_id: 3 });
    }
}
