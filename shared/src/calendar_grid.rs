//! Grid math for the schedule calendar.
//!
//! The month grid always shows six full weeks starting on the Sunday on or
//! before the first of the month, so its visible range is 42 days long. The
//! week grid shows one Sunday-start week split into hour slots.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::events::CalendarEvent;
use crate::{ApiError, FetchParams, ScheduleScope};

pub const WEEKS_PER_GRID: usize = 6;
pub const HOURS_PER_DAY: u32 = 24;
pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day < self.end
    }

    /// List query for this range
    pub fn fetch_params(&self, scope: ScheduleScope) -> FetchParams {
        FetchParams::new(scope).with_range(format_day(self.start), format_day(self.end))
    }
}

/// A drag selection on the grid. `end` is exclusive, like the visible range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelection {
    pub start: String,
    pub end: String,
}

impl DateSelection {
    /// Selection covering both days, in whichever order they were picked
    pub fn between(anchor: NaiveDate, focus: NaiveDate) -> Self {
        let (first, last) = if anchor <= focus { (anchor, focus) } else { (focus, anchor) };
        Self {
            start: format_day(first),
            end: format_day(last + Duration::days(1)),
        }
    }

    /// Selection over hour slots, from the start of the earlier slot to the
    /// end of the later one. Both bounds carry a time part.
    pub fn between_slots(anchor: NaiveDateTime, focus: NaiveDateTime) -> Self {
        let (first, last) = if anchor <= focus { (anchor, focus) } else { (focus, anchor) };
        Self {
            start: first.format(SLOT_FORMAT).to_string(),
            end: (last + Duration::hours(1)).format(SLOT_FORMAT).to_string(),
        }
    }
}

/// Start of the hour slot `hour` on `day`
pub fn slot_start(day: NaiveDate, hour: u32) -> NaiveDateTime {
    NaiveDateTime::new(day, NaiveTime::from_hms_opt(hour % HOURS_PER_DAY, 0, 0).unwrap_or_default())
}

/// The month a calendar is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn title(&self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }

    pub fn grid_start(&self) -> NaiveDate {
        let first = self.first_day();
        first - Duration::days(first.weekday().num_days_from_sunday() as i64)
    }

    pub fn visible_range(&self) -> DateRange {
        let start = self.grid_start();
        DateRange {
            start,
            end: start + Duration::days((WEEKS_PER_GRID * 7) as i64),
        }
    }

    pub fn weeks(&self) -> Vec<[NaiveDate; 7]> {
        let start = self.grid_start();
        (0..WEEKS_PER_GRID)
            .map(|week| {
                std::array::from_fn(|weekday| start + Duration::days((week * 7 + weekday) as i64))
            })
            .collect()
    }

    pub fn is_in_month(&self, day: NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month
    }
}

/// The week a calendar is showing, starting on Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekView {
    pub start: NaiveDate,
}

impl WeekView {
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            start: day - Duration::days(day.weekday().num_days_from_sunday() as i64),
        }
    }

    pub fn prev(&self) -> Self {
        Self { start: self.start - Duration::days(7) }
    }

    pub fn next(&self) -> Self {
        Self { start: self.start + Duration::days(7) }
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|weekday| self.start + Duration::days(weekday as i64))
    }

    pub fn visible_range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.start + Duration::days(7),
        }
    }

    pub fn title(&self) -> String {
        let last = self.start + Duration::days(6);
        format!("{} ~ {}", self.start.format("%Y.%m.%d"), last.format("%Y.%m.%d"))
    }
}

/// Month grid or week time grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
}

impl CalendarView {
    pub fn visible_range(&self, anchor: NaiveDate) -> DateRange {
        match self {
            CalendarView::Month => MonthView::containing(anchor).visible_range(),
            CalendarView::Week => WeekView::containing(anchor).visible_range(),
        }
    }

    pub fn title(&self, anchor: NaiveDate) -> String {
        match self {
            CalendarView::Month => MonthView::containing(anchor).title(),
            CalendarView::Week => WeekView::containing(anchor).title(),
        }
    }

    /// Anchor one page back or forward
    pub fn step(&self, anchor: NaiveDate, forward: bool) -> NaiveDate {
        match (self, forward) {
            (CalendarView::Month, false) => MonthView::containing(anchor).prev().first_day(),
            (CalendarView::Month, true) => MonthView::containing(anchor).next().first_day(),
            (CalendarView::Week, false) => anchor - Duration::days(7),
            (CalendarView::Week, true) => anchor + Duration::days(7),
        }
    }
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Date part of an ISO 8601 stamp, checked to be `YYYY-MM-DD`
pub fn extract_date_from_iso(stamp: &str) -> Result<String, ApiError> {
    let date_part = stamp.split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(|_| date_part.to_string())
        .map_err(|_| {
            ApiError::Validation(
                "올바르지 않은 날짜 형식입니다. YYYY-MM-DD 형식이어야 합니다.".to_string(),
            )
        })
}

/// Events that touch `day`, in list order
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| event.occurs_on(day)).collect()
}

/// Timed events starting in the given hour slot
pub fn events_in_slot(events: &[CalendarEvent], day: NaiveDate, hour: u32) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.start_slot() == Some((day, hour)))
        .collect()
}

/// Events for the all-day row of a week column: everything touching `day`
/// that does not start in one of its hour slots.
pub fn banner_events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.occurs_on(day))
        .filter(|event| event.start_slot().map(|(start, _)| start != day).unwrap_or(true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventDisplay;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_visible_range_starts_on_sunday() {
        // 2025-01-01 is a Wednesday
        let january = MonthView { year: 2025, month: 1 };
        let range = january.visible_range();
        assert_eq!(range.start, day(2024, 12, 29));
        assert_eq!(range.end, day(2025, 2, 9));
        assert_eq!((range.end - range.start).num_days(), 42);
        assert!(range.contains(day(2025, 1, 31)));
        assert!(!range.contains(day(2025, 2, 9)));
    }

    #[test]
    fn test_month_starting_on_sunday() {
        // 2025-06-01 is a Sunday
        let june = MonthView { year: 2025, month: 6 };
        assert_eq!(june.grid_start(), day(2025, 6, 1));
        let weeks = june.weeks();
        assert_eq!(weeks.len(), WEEKS_PER_GRID);
        assert_eq!(weeks[0][0], day(2025, 6, 1));
        assert_eq!(weeks[5][6], day(2025, 7, 12));
        assert!(june.is_in_month(day(2025, 6, 30)));
        assert!(!june.is_in_month(day(2025, 7, 1)));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let january = MonthView { year: 2025, month: 1 };
        assert_eq!(january.prev(), MonthView { year: 2024, month: 12 });
        assert_eq!(january.prev().next(), january);
        assert_eq!(MonthView { year: 2025, month: 12 }.next(), MonthView { year: 2026, month: 1 });
        assert_eq!(january.title(), "2025년 1월");
        assert_eq!(MonthView::containing(day(2025, 3, 15)), MonthView { year: 2025, month: 3 });
    }

    #[test]
    fn test_range_to_fetch_params() {
        let params = MonthView { year: 2025, month: 1 }
            .visible_range()
            .fetch_params(ScheduleScope::Club(Some(5)));
        assert_eq!(
            params.path().unwrap(),
            "/api/v1/schedules/clubs/5?startDate=2024-12-29&endDate=2025-02-09"
        );
    }

    #[test]
    fn test_selection_is_ordered_and_end_exclusive() {
        let forward = DateSelection::between(day(2025, 3, 10), day(2025, 3, 12));
        let backward = DateSelection::between(day(2025, 3, 12), day(2025, 3, 10));
        assert_eq!(forward, backward);
        assert_eq!(forward.start, "2025-03-10");
        assert_eq!(forward.end, "2025-03-13");
    }

    #[test]
    fn test_week_view_starts_on_sunday() {
        // 2025-03-12 is a Wednesday
        let week = WeekView::containing(day(2025, 3, 12));
        assert_eq!(week.start, day(2025, 3, 9));
        assert_eq!(week.days()[6], day(2025, 3, 15));
        assert_eq!(
            week.visible_range(),
            DateRange { start: day(2025, 3, 9), end: day(2025, 3, 16) }
        );
        assert_eq!(week.title(), "2025.03.09 ~ 2025.03.15");
        assert_eq!(week.next().prev(), week);
        assert_eq!(WeekView::containing(day(2025, 3, 9)), week);
    }

    #[test]
    fn test_calendar_view_paging() {
        let anchor = day(2025, 1, 31);
        assert_eq!(CalendarView::Month.step(anchor, true), day(2025, 2, 1));
        assert_eq!(CalendarView::Month.step(anchor, false), day(2024, 12, 1));
        assert_eq!(CalendarView::Week.step(anchor, true), day(2025, 2, 7));

        assert_eq!(CalendarView::Month.visible_range(anchor).start, day(2024, 12, 29));
        assert_eq!(
            CalendarView::Week.visible_range(anchor),
            DateRange { start: day(2025, 1, 26), end: day(2025, 2, 2) }
        );
        assert_eq!(CalendarView::Month.title(anchor), "2025년 1월");
    }

    #[test]
    fn test_slot_selection_carries_times() {
        let forward = DateSelection::between_slots(slot_start(day(2025, 3, 10), 9), slot_start(day(2025, 3, 10), 11));
        let backward = DateSelection::between_slots(slot_start(day(2025, 3, 10), 11), slot_start(day(2025, 3, 10), 9));
        assert_eq!(forward, backward);
        assert_eq!(forward.start, "2025-03-10T09:00:00");
        assert_eq!(forward.end, "2025-03-10T12:00:00");

        let late = DateSelection::between_slots(slot_start(day(2025, 3, 10), 23), slot_start(day(2025, 3, 10), 23));
        assert_eq!(late.end, "2025-03-11T00:00:00");
    }

    #[test]
    fn test_slot_selection_prefills_form_times() {
        let selection = DateSelection::between_slots(slot_start(day(2025, 3, 10), 14), slot_start(day(2025, 3, 10), 15));
        let form = crate::ScheduleForm::for_create(5, Some(&selection), ("09:00".to_string(), "10:00".to_string()));
        assert_eq!(form.start_date, "2025-03-10");
        assert_eq!(form.start_time, "14:00");
        assert_eq!(form.end_date, "2025-03-10");
        assert_eq!(form.end_time, "16:00");
    }

    #[test]
    fn test_events_split_between_slots_and_banner() {
        let event = |id: &str, start: &str, end: &str, all_day: bool| CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            all_day,
            color: "#A1C6F8".to_string(),
            display: EventDisplay::Block,
        };
        let events = vec![
            event("meeting", "2025-03-10T09:30:00", "2025-03-10T10:30:00", false),
            event("trip", "2025-03-09T18:00:00", "2025-03-11T12:00:00", false),
            event("holiday", "2025-03-10", "2025-03-10", true),
        ];
        let ids = |found: Vec<&CalendarEvent>| found.iter().map(|e| e.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(events_in_slot(&events, day(2025, 3, 10), 9)), vec!["meeting"]);
        assert!(events_in_slot(&events, day(2025, 3, 10), 10).is_empty());
        assert_eq!(ids(events_in_slot(&events, day(2025, 3, 9), 18)), vec!["trip"]);
        assert_eq!(ids(banner_events_on(&events, day(2025, 3, 10))), vec!["trip", "holiday"]);
        assert!(banner_events_on(&events, day(2025, 3, 9)).is_empty());
    }

    #[test]
    fn test_extract_date_from_iso() {
        assert_eq!(extract_date_from_iso("2025-01-31T15:00:00.000Z").unwrap(), "2025-01-31");
        assert_eq!(extract_date_from_iso("2025-01-31").unwrap(), "2025-01-31");
        assert!(extract_date_from_iso("").is_err());
        assert!(extract_date_from_iso("31/01/2025").is_err());
    }

    #[test]
    fn test_events_on_day() {
        let event = |id: &str, start: &str, end: &str| CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            all_day: true,
            color: "#A1C6F8".to_string(),
            display: EventDisplay::Block,
        };
        let events = vec![
            event("a", "2025-01-10", "2025-01-12"),
            event("b", "2025-01-11", "2025-01-11"),
            event("c", "2025-01-20", "2025-01-20"),
        ];
        let ids: Vec<&str> = events_on(&events, day(2025, 1, 11)).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(events_on(&events, day(2025, 1, 13)).is_empty());
    }
}
