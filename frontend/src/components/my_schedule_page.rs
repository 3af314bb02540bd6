use shared::{DateRange, ModalOutcome, ScheduleScope};
use yew::prelude::*;

use crate::components::schedule_calendar::ScheduleCalendar;
use crate::components::schedule_detail_modal::ScheduleDetailModal;
use crate::hooks::use_schedules::{api_fetcher, use_schedules};
use crate::route::navigate;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::toast::use_toast;

#[derive(Properties, PartialEq)]
pub struct MySchedulePageProps {
    pub api_client: ApiClient,
}

/// Every schedule across the user's clubs. Read-only.
#[function_component(MySchedulePage)]
pub fn my_schedule_page(props: &MySchedulePageProps) -> Html {
    let fetcher = use_memo(props.api_client.clone(), |api_client| api_fetcher(api_client.clone()));
    let schedules = use_schedules((*fetcher).clone());
    let selected = use_state(|| None::<i64>);
    let toast = use_toast();
    let last_range = use_mut_ref(|| None::<DateRange>);

    let on_dates_set = {
        let fetch_schedules = schedules.fetch_schedules.clone();
        let last_range = last_range.clone();
        Callback::from(move |range: DateRange| {
            *last_range.borrow_mut() = Some(range);
            fetch_schedules.emit(range.fetch_params(ScheduleScope::Mine));
        })
    };

    let on_retry = {
        let fetch_schedules = schedules.fetch_schedules.clone();
        let last_range = last_range.clone();
        Callback::from(move |_: MouseEvent| {
            let range = *last_range.borrow();
            if let Some(range) = range {
                fetch_schedules.emit(range.fetch_params(ScheduleScope::Mine));
            }
        })
    };

    let on_event_click = {
        let selected = selected.clone();
        Callback::from(move |id: String| match id.parse::<i64>() {
            Ok(schedule_id) => selected.set(Some(schedule_id)),
            Err(_) => Logger::warn_with_component("my-schedules", &format!("unknown event id {}", id)),
        })
    };

    let on_modal_close = {
        let selected = selected.clone();
        let toast = toast.clone();
        Callback::from(move |outcome: ModalOutcome| {
            selected.set(None);
            if let ModalOutcome::NavigateTo(target) = outcome {
                // The checklist page resolves the club from the checklist itself
                if let Some(href) = target.href(None) {
                    if let Some(notice) = target.notice() {
                        toast.success(notice);
                    }
                    navigate(&href);
                }
            }
        })
    };

    html! {
        <div class="schedule-page">
            <div class="schedule-page-header">
                <h1>{"내 일정"}</h1>
            </div>

            if let Some(error) = schedules.error.clone() {
                <div class="schedule-error">
                    <span>{error}</span>
                    <button class="btn btn-secondary" onclick={on_retry}>{"다시 시도"}</button>
                </div>
            }

            <ScheduleCalendar
                events={schedules.events.clone()}
                loading={schedules.loading}
                on_dates_set={on_dates_set}
                on_event_click={on_event_click}
            />

            <ScheduleDetailModal
                api_client={props.api_client.clone()}
                schedule_id={*selected}
                read_only=true
                on_close={on_modal_close}
            />
        </div>
    }
}
