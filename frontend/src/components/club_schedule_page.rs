use shared::{DateRange, DateSelection, ModalOutcome, NavTarget, ScheduleScope};
use yew::prelude::*;

use crate::components::schedule_calendar::ScheduleCalendar;
use crate::components::schedule_detail_modal::ScheduleDetailModal;
use crate::components::schedule_edit_modal::ScheduleEditModal;
use crate::hooks::use_club_role::use_club_role;
use crate::hooks::use_schedules::{api_fetcher, use_schedules};
use crate::route::navigate;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::toast::use_toast;

/// Which modal sits on top of the calendar
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveModal {
    None,
    Detail { schedule_id: i64 },
    Edit {
        schedule_id: Option<i64>,
        selection: Option<DateSelection>,
    },
}

#[derive(Properties, PartialEq)]
pub struct ClubSchedulePageProps {
    pub api_client: ApiClient,
    pub club_id: Option<i64>,
}

#[function_component(ClubSchedulePage)]
pub fn club_schedule_page(props: &ClubSchedulePageProps) -> Html {
    let fetcher = use_memo(props.api_client.clone(), |api_client| api_fetcher(api_client.clone()));
    let schedules = use_schedules((*fetcher).clone());
    let mode = use_club_role(&props.api_client, props.club_id);
    let active = use_state(|| ActiveModal::None);
    let toast = use_toast();
    let last_range = use_mut_ref(|| None::<DateRange>);
    let editable = !mode.is_read_only() && props.club_id.is_some();

    let scope = ScheduleScope::Club(props.club_id);

    let on_dates_set = {
        let fetch_schedules = schedules.fetch_schedules.clone();
        let last_range = last_range.clone();
        Callback::from(move |range: DateRange| {
            *last_range.borrow_mut() = Some(range);
            fetch_schedules.emit(range.fetch_params(scope));
        })
    };

    let refresh = {
        let fetch_schedules = schedules.fetch_schedules.clone();
        let last_range = last_range.clone();
        Callback::from(move |_: ()| {
            let range = *last_range.borrow();
            if let Some(range) = range {
                fetch_schedules.emit(range.fetch_params(scope));
            }
        })
    };

    let on_event_click = {
        let active = active.clone();
        Callback::from(move |id: String| match id.parse::<i64>() {
            Ok(schedule_id) => active.set(ActiveModal::Detail { schedule_id }),
            Err(_) => Logger::warn_with_component("club-schedule", &format!("unknown event id {}", id)),
        })
    };

    let on_date_select = editable.then(|| {
        let active = active.clone();
        Callback::from(move |selection: DateSelection| {
            active.set(ActiveModal::Edit {
                schedule_id: None,
                selection: Some(selection),
            })
        })
    });

    let on_add = {
        let active = active.clone();
        Callback::from(move |_: MouseEvent| {
            active.set(ActiveModal::Edit {
                schedule_id: None,
                selection: None,
            })
        })
    };

    let on_modal_close = {
        let active = active.clone();
        let refresh = refresh.clone();
        let toast = toast.clone();
        let club_id = props.club_id;
        Callback::from(move |outcome: ModalOutcome| match outcome {
            ModalOutcome::Closed => active.set(ActiveModal::None),
            ModalOutcome::Refreshed => {
                active.set(ActiveModal::None);
                refresh.emit(());
            }
            ModalOutcome::NavigateTo(NavTarget::EditSchedule { schedule_id }) => {
                active.set(ActiveModal::Edit {
                    schedule_id: Some(schedule_id),
                    selection: None,
                });
            }
            ModalOutcome::NavigateTo(target) => {
                active.set(ActiveModal::None);
                if let Some(href) = target.href(club_id) {
                    if let Some(notice) = target.notice() {
                        toast.success(notice);
                    }
                    navigate(&href);
                }
            }
        })
    };

    let modal = match ((*active).clone(), props.club_id) {
        (ActiveModal::Detail { schedule_id }, _) => html! {
            <ScheduleDetailModal
                api_client={props.api_client.clone()}
                schedule_id={Some(schedule_id)}
                read_only={!editable}
                club_id={props.club_id}
                on_close={on_modal_close.clone()}
            />
        },
        (ActiveModal::Edit { schedule_id, selection }, Some(club_id)) if editable => html! {
            <ScheduleEditModal
                api_client={props.api_client.clone()}
                club_id={club_id}
                schedule_id={schedule_id}
                selection={selection}
                on_close={on_modal_close.clone()}
            />
        },
        _ => html! {},
    };

    html! {
        <div class="schedule-page">
            <div class="schedule-page-header">
                <h1>{"모임 일정"}</h1>
                if editable {
                    <button class="btn btn-primary" onclick={on_add}>{"일정 추가"}</button>
                }
            </div>

            if let Some(error) = schedules.error.clone() {
                <div class="schedule-error">
                    <span>{error}</span>
                    <button class="btn btn-secondary" onclick={refresh.reform(|_: MouseEvent| ())}>
                        {"다시 시도"}
                    </button>
                </div>
            }

            <ScheduleCalendar
                events={schedules.events.clone()}
                loading={schedules.loading}
                on_dates_set={on_dates_set}
                on_event_click={on_event_click}
                on_date_select={on_date_select}
            />

            { modal }
        </div>
    }
}
