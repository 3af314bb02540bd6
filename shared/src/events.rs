//! Calendar-ready view of schedule records.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::ScheduleRecord;

pub const COLOR_INDIGO: &str = "#A1C6F8";

/// Per-club bar colours, picked by `club_id mod len`
pub const SCHEDULE_COLORS: [&str; 9] = [
    COLOR_INDIGO,
    "#81D4FA", // sky blue
    "#80CBC4", // mint
    "#FFCC80", // apricot
    "#B39DDB", // lavender
    "#EF9A9A", // pink
    "#C5E1A5", // lime
    "#A1887F", // beige
    "#B0BEC5", // gray
];

/// Used when a record has no club attached
pub const DEFAULT_EVENT_COLOR: &str = COLOR_INDIGO;

pub const UNTITLED: &str = "제목 없음";

/// Rendering hint for the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDisplay {
    Block,
}

/// A schedule as the calendar draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub all_day: bool,
    pub color: String,
    pub display: EventDisplay,
}

/// Colour for a club. Same id, same colour.
pub fn schedule_color(club_id: i64) -> &'static str {
    let index = club_id.rem_euclid(SCHEDULE_COLORS.len() as i64) as usize;
    SCHEDULE_COLORS[index]
}

/// Date-only stamps (`YYYY-MM-DD`, or nothing) on both ends mean an all-day event.
pub fn is_all_day(start_date: &str, end_date: &str) -> bool {
    start_date.chars().count() <= 10 && end_date.chars().count() <= 10
}

pub fn display_title(title: Option<&str>, club_name: Option<&str>) -> String {
    let title = title.filter(|t| !t.is_empty()).unwrap_or(UNTITLED);
    match club_name.filter(|n| !n.is_empty()) {
        Some(name) => format!("[{}] {}", name, title),
        None => title.to_string(),
    }
}

impl CalendarEvent {
    pub fn from_record(record: &ScheduleRecord) -> Self {
        let color = record
            .club_id
            .map(schedule_color)
            .unwrap_or(DEFAULT_EVENT_COLOR);

        Self {
            id: record.id.to_string(),
            title: display_title(record.title.as_deref(), record.club_name.as_deref()),
            start: record.start_date.clone(),
            end: record.end_date.clone(),
            all_day: is_all_day(&record.start_date, &record.end_date),
            color: color.to_string(),
            display: EventDisplay::Block,
        }
    }

    pub fn from_records(records: &[ScheduleRecord]) -> Vec<Self> {
        records.iter().map(Self::from_record).collect()
    }

    /// First and last calendar day the event touches. `None` if the start
    /// stamp carries no readable date; such events are not placed on the grid.
    pub fn day_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = parse_day(&self.start)?;
        let last = parse_day(&self.end).filter(|last| *last >= first).unwrap_or(first);
        Some((first, last))
    }

    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        self.day_span()
            .map(|(first, last)| first <= day && day <= last)
            .unwrap_or(false)
    }

    /// `HH:MM` of the start for timed events
    pub fn time_text(&self) -> Option<&str> {
        if self.all_day {
            return None;
        }
        self.start.split('T').nth(1).and_then(|time| time.get(..5))
    }

    /// Day and hour a timed event starts in. `None` for all-day events.
    pub fn start_slot(&self) -> Option<(NaiveDate, u32)> {
        if self.all_day {
            return None;
        }
        let start = NaiveDateTime::parse_from_str(self.start.get(..16)?, "%Y-%m-%dT%H:%M").ok()?;
        Some((start.date(), start.hour()))
    }
}

fn parse_day(stamp: &str) -> Option<NaiveDate> {
    let date_part = stamp.split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, start: &str, end: &str) -> ScheduleRecord {
        ScheduleRecord {
            id,
            title: Some("Demo".to_string()),
            content: None,
            spot: None,
            start_date: start.to_string(),
            end_date: end.to_string(),
            club_id: None,
            club_name: None,
            check_list_id: None,
        }
    }

    #[test]
    fn test_club_schedule_scenario() {
        let mut demo = record(10, "2025-01-10", "2025-01-10");
        demo.club_id = Some(5);

        let event = CalendarEvent::from_record(&demo);
        assert_eq!(event.id, "10");
        assert_eq!(event.title, "Demo");
        assert!(event.all_day);
        assert_eq!(event.color, SCHEDULE_COLORS[5 % SCHEDULE_COLORS.len()]);
        assert_eq!(event.display, EventDisplay::Block);
    }

    #[test]
    fn test_all_day_depends_on_both_ends() {
        assert!(is_all_day("2025-01-10", "2025-01-11"));
        assert!(!is_all_day("2025-01-10T09:00:00", "2025-01-10"));
        assert!(!is_all_day("2025-01-10", "2025-01-10T18:00"));
        assert!(is_all_day("", ""));
    }

    #[test]
    fn test_title_prefix_and_fallback() {
        assert_eq!(display_title(Some("정모"), Some("등산회")), "[등산회] 정모");
        assert_eq!(display_title(None, Some("등산회")), "[등산회] 제목 없음");
        assert_eq!(display_title(Some(""), None), "제목 없음");
        assert_eq!(display_title(Some("정모"), Some("")), "정모");
    }

    #[test]
    fn test_color_is_stable_per_club() {
        assert_eq!(schedule_color(3), schedule_color(3));
        assert_eq!(schedule_color(0), SCHEDULE_COLORS[0]);
        assert_eq!(schedule_color(9), SCHEDULE_COLORS[0]);
        assert_eq!(schedule_color(13), SCHEDULE_COLORS[4]);
        // Negative ids still land inside the palette
        assert_eq!(schedule_color(-1), SCHEDULE_COLORS[8]);

        let without_club = CalendarEvent::from_record(&record(1, "2025-01-01", "2025-01-01"));
        assert_eq!(without_club.color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_palette_entries_are_distinct() {
        let mut colors = SCHEDULE_COLORS.to_vec();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), SCHEDULE_COLORS.len());
    }

    #[test]
    fn test_day_span_and_time_text() {
        let event = CalendarEvent::from_record(&record(2, "2025-03-01T10:30:00", "2025-03-03T09:00:00"));
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        assert_eq!(event.day_span(), Some((day(1), day(3))));
        assert!(event.occurs_on(day(2)));
        assert!(!event.occurs_on(day(4)));
        assert_eq!(event.time_text(), Some("10:30"));

        // End before start collapses to a single day
        let odd = CalendarEvent::from_record(&record(3, "2025-03-05", "2025-03-01"));
        assert_eq!(odd.day_span(), Some((day(5), day(5))));
        assert_eq!(odd.time_text(), None);

        let undated = CalendarEvent::from_record(&record(4, "", ""));
        assert_eq!(undated.day_span(), None);
    }

    #[test]
    fn test_start_slot() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let timed = CalendarEvent::from_record(&record(5, "2025-03-01T10:30:00", "2025-03-01T12:00:00"));
        assert_eq!(timed.start_slot(), Some((day, 10)));

        let all_day = CalendarEvent::from_record(&record(6, "2025-03-01", "2025-03-01"));
        assert_eq!(all_day.start_slot(), None);

        let broken = CalendarEvent::from_record(&record(7, "2025-03-01T", "2025-03-01T12:00:00"));
        assert_eq!(broken.start_slot(), None);
    }
}
