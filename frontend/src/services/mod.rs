pub mod abort;
pub mod api;
pub mod date_utils;
pub mod logging;
pub mod session;
pub mod toast;
