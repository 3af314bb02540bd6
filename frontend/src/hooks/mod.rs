pub mod use_club_role;
pub mod use_schedules;
