pub mod club_schedule_page;
pub mod my_schedule_page;
pub mod schedule_calendar;
pub mod schedule_detail_modal;
pub mod schedule_edit_modal;
