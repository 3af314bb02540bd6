use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use shared::{ApiError, CalendarEvent, FeedUpdate, FetchParams, ScheduleFeed, ScheduleRecord};
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortSignal;
use yew::prelude::*;

use crate::services::abort::BrowserAbort;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{report_error, SessionContext};
use crate::services::toast::use_toast;

/// Loads one list of schedules. The signal aborts the request.
pub type ScheduleFetcher =
    Rc<dyn Fn(FetchParams, AbortSignal) -> LocalBoxFuture<'static, Result<Vec<ScheduleRecord>, ApiError>>>;

/// Fetcher backed by the REST API
pub fn api_fetcher(api_client: ApiClient) -> ScheduleFetcher {
    Rc::new(move |params, signal| {
        let api_client = api_client.clone();
        async move { api_client.fetch_schedules(params, Some(signal)).await }.boxed_local()
    })
}

pub struct UseSchedulesResult {
    pub events: Vec<CalendarEvent>,
    pub error: Option<String>,
    pub loading: bool,
    pub fetch_schedules: Callback<FetchParams>,
}

/// Calendar events for whatever range was fetched last.
///
/// A new fetch aborts the one in flight; only the latest completion is
/// applied. Unmounting aborts the outstanding request.
#[hook]
pub fn use_schedules(fetcher: ScheduleFetcher) -> UseSchedulesResult {
    let feed = use_mut_ref(ScheduleFeed::<BrowserAbort>::new);
    let fetcher_ref = use_mut_ref(|| fetcher.clone());
    *fetcher_ref.borrow_mut() = fetcher;

    let redraw = use_force_update();
    let toast = use_toast();
    let session = use_context::<SessionContext>();

    {
        let feed = feed.clone();
        use_effect_with((), move |_| move || feed.borrow_mut().teardown());
    }

    let fetch_schedules = {
        let feed = feed.clone();
        let fetcher_ref = fetcher_ref.clone();
        let redraw = redraw.clone();

        use_callback((), move |params: FetchParams, _| {
            let Some((handle, signal)) = BrowserAbort::new() else {
                return;
            };

            let ticket = match feed.borrow_mut().begin(&params, handle) {
                Ok(ticket) => ticket,
                Err(e) => {
                    Logger::warn_with_component("use-schedules", &e.to_string());
                    redraw.force_update();
                    return;
                }
            };
            redraw.force_update();

            let fetcher = fetcher_ref.borrow().clone();
            let request = fetcher(params, signal);
            let feed = feed.clone();
            let redraw = redraw.clone();
            let toast = toast.clone();
            let session = session.clone();

            spawn_local(async move {
                let result = request.await;
                let failure = result.as_ref().err().cloned();

                let update = feed.borrow_mut().complete(ticket, result);
                match update {
                    FeedUpdate::Replaced(count) => {
                        Logger::debug_with_component("use-schedules", &format!("loaded {} schedules", count));
                    }
                    FeedUpdate::Failed(_) => {
                        if let Some(e) = failure {
                            report_error("use-schedules", &e, &toast, session.as_ref());
                        }
                    }
                    FeedUpdate::Ignored => {}
                }
                redraw.force_update();
            });
        })
    };

    let feed = feed.borrow();
    UseSchedulesResult {
        events: feed.events().to_vec(),
        error: feed.error().map(str::to_string),
        loading: feed.loading(),
        fetch_schedules,
    }
}
