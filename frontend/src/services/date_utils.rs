use chrono::NaiveDate;
use js_sys::Date;
use shared::form::initial_times;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Start/end time defaults for a new schedule: the next full hour and the
/// hour after, as `HH:MM`.
pub fn default_times() -> (String, String) {
    let now = Date::new_0();
    initial_times(now.get_hours(), now.get_minutes())
}
