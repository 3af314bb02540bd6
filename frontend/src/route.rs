use crate::services::logging::Logger;

/// Pages this bundle serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/schedule?clubId={id}`
    ClubSchedule { club_id: Option<i64> },
    /// `/schedule/my`
    MySchedules,
    NotFound,
}

impl Route {
    pub fn parse(pathname: &str, search: &str) -> Self {
        match pathname.trim_end_matches('/') {
            "" | "/schedule" => Route::ClubSchedule {
                club_id: query_param(search, "clubId").and_then(|id| id.parse().ok()),
            },
            "/schedule/my" => Route::MySchedules,
            _ => Route::NotFound,
        }
    }

    /// Route for the page the browser is on
    pub fn current() -> Self {
        let Some(window) = web_sys::window() else {
            return Route::NotFound;
        };
        let location = window.location();
        let pathname = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        Self::parse(&pathname, &search)
    }
}

fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Full page navigation, used for pages outside this bundle
pub fn navigate(href: &str) {
    Logger::info_with_component("route", &format!("navigating to {}", href));
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(href) {
        Logger::error_with_component("route", &format!("navigation to {} failed: {:?}", href, e));
    }
}
