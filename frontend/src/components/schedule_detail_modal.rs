use gloo::dialogs::confirm;
use shared::{DetailModal, DetailState, ModalOutcome, ScheduleDetail};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::abort::BrowserAbort;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{report_error, SessionContext};
use crate::services::toast::use_toast;

const DELETE_CONFIRM: &str = "정말 이 일정을 삭제하시겠습니까?";
const DELETE_SUCCESS: &str = "일정이 삭제되었습니다.";

#[derive(Properties, PartialEq)]
pub struct ScheduleDetailModalProps {
    pub api_client: ApiClient,
    /// Open while set
    pub schedule_id: Option<i64>,
    #[prop_or_default]
    pub read_only: bool,
    #[prop_or_default]
    pub club_id: Option<i64>,
    pub on_close: Callback<ModalOutcome>,
}

#[function_component(ScheduleDetailModal)]
pub fn schedule_detail_modal(props: &ScheduleDetailModalProps) -> Html {
    let modal = use_mut_ref(DetailModal::<BrowserAbort>::new);
    let redraw = use_force_update();
    let toast = use_toast();
    let session = use_context::<SessionContext>();

    // Load whenever the schedule id changes; leaving aborts the request
    {
        let modal = modal.clone();
        let redraw = redraw.clone();
        let api_client = props.api_client.clone();
        let toast = toast.clone();
        let session = session.clone();
        use_effect_with(props.schedule_id, move |schedule_id| {
            if let Some(schedule_id) = *schedule_id {
                if let Some((handle, signal)) = BrowserAbort::new() {
                    let ticket = modal.borrow_mut().open(schedule_id, handle);
                    Logger::debug_with_component("schedule-detail", &format!("loading schedule {}", schedule_id));
                    redraw.force_update();

                    let modal = modal.clone();
                    let redraw = redraw.clone();
                    spawn_local(async move {
                        let result = api_client.get_schedule(schedule_id, Some(signal)).await;

                        let failure = modal.borrow_mut().complete(ticket, result);
                        if let Some(e) = failure {
                            report_error("schedule-detail", &e, &toast, session.as_ref());
                        }
                        redraw.force_update();
                    });
                }
            }

            move || modal.borrow_mut().close()
        });
    }

    let close_with = {
        let modal = modal.clone();
        let on_close = props.on_close.clone();
        move |outcome: ModalOutcome| {
            modal.borrow_mut().close();
            on_close.emit(outcome);
        }
    };

    let on_backdrop_click = {
        let close_with = close_with.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            close_with(ModalOutcome::Closed);
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let close_with = close_with.clone();
        Callback::from(move |_: MouseEvent| close_with(ModalOutcome::Closed))
    };

    let on_checklist = {
        let modal = modal.clone();
        let close_with = close_with.clone();
        Callback::from(move |_: MouseEvent| {
            let target = modal.borrow().checklist_target();
            if let Some(target) = target {
                close_with(ModalOutcome::NavigateTo(target));
            }
        })
    };

    let on_edit = {
        let modal = modal.clone();
        let close_with = close_with.clone();
        Callback::from(move |_: MouseEvent| {
            let target = modal.borrow().edit_target();
            if let Some(target) = target {
                close_with(ModalOutcome::NavigateTo(target));
            }
        })
    };

    let on_delete = {
        let modal = modal.clone();
        let redraw = redraw.clone();
        let api_client = props.api_client.clone();
        let on_close = props.on_close.clone();
        let toast = toast.clone();
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            if !confirm(DELETE_CONFIRM) {
                return;
            }
            let Some(schedule_id) = modal.borrow_mut().begin_delete() else {
                return;
            };
            redraw.force_update();

            let modal = modal.clone();
            let redraw = redraw.clone();
            let api_client = api_client.clone();
            let on_close = on_close.clone();
            let toast = toast.clone();
            let session = session.clone();
            spawn_local(async move {
                let result = match api_client.delete_schedule(schedule_id).await {
                    Ok(message) => {
                        toast.success(message.filter(|m| !m.is_empty()).unwrap_or_else(|| DELETE_SUCCESS.to_string()));
                        Ok(())
                    }
                    Err(e) => {
                        report_error("schedule-detail", &e, &toast, session.as_ref());
                        Err(e)
                    }
                };

                let outcome = modal.borrow_mut().finish_delete(result);
                match outcome {
                    Some(outcome) => on_close.emit(outcome),
                    None => redraw.force_update(),
                }
            });
        })
    };

    let modal_ref = modal.borrow();
    let body = match modal_ref.state() {
        DetailState::Closed => return html! {},
        DetailState::Loading { .. } => html! {
            <div class="schedule-detail-loading">{"일정 정보를 불러오는 중..."}</div>
        },
        DetailState::Failed { message, .. } => html! {
            <div class="schedule-detail-error">{message.clone()}</div>
        },
        DetailState::Loaded { detail, .. } => detail_body(detail),
    };
    let loaded = matches!(modal_ref.state(), DetailState::Loaded { .. });
    let deleting = modal_ref.is_deleting();
    let has_checklist = matches!(
        modal_ref.state(),
        DetailState::Loaded { detail: ScheduleDetail { check_list_id: Some(_), .. }, .. }
    );

    html! {
        <div class="schedule-modal-backdrop" onclick={on_backdrop_click}>
            <div class="schedule-modal" onclick={on_modal_click}>
                <div class="schedule-modal-content">
                    { body }

                    <div class="schedule-modal-buttons">
                        if loaded {
                            <button type="button" class="btn btn-secondary" onclick={on_checklist} disabled={deleting}>
                                { if has_checklist { "체크리스트 보기" } else { "체크리스트 만들기" } }
                            </button>
                            if !props.read_only {
                                <button type="button" class="btn btn-primary" onclick={on_edit} disabled={deleting}>
                                    {"수정"}
                                </button>
                                <button type="button" class="btn btn-danger" onclick={on_delete} disabled={deleting}>
                                    { if deleting { "삭제 중..." } else { "삭제" } }
                                </button>
                            }
                        }
                        <button type="button" class="btn btn-secondary" onclick={on_close_click}>
                            {"닫기"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn detail_body(detail: &ScheduleDetail) -> Html {
    let title = detail
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| shared::events::UNTITLED.to_string());

    html! {
        <>
            <h3 class="schedule-detail-title">{title}</h3>
            <div class="schedule-detail-row">
                <span class="schedule-detail-label">{"일시"}</span>
                <span>{period_text(&detail.start_date, &detail.end_date)}</span>
            </div>
            if let Some(spot) = detail.spot.clone().filter(|s| !s.is_empty()) {
                <div class="schedule-detail-row">
                    <span class="schedule-detail-label">{"장소"}</span>
                    <span>{spot}</span>
                </div>
            }
            if let Some(content) = detail.content.clone().filter(|c| !c.is_empty()) {
                <div class="schedule-detail-content">{content}</div>
            }
        </>
    }
}

/// `2025-01-10T09:00:00` → `2025-01-10 09:00`; date-only stamps pass through
fn format_stamp(stamp: &str) -> String {
    match stamp.split_once('T') {
        Some((date, time)) => format!("{} {}", date, time.get(..5).unwrap_or(time)),
        None => stamp.to_string(),
    }
}

fn period_text(start: &str, end: &str) -> String {
    let start = format_stamp(start);
    let end = format_stamp(end);
    if end.is_empty() || start == end {
        start
    } else {
        format!("{} ~ {}", start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stamp() {
        assert_eq!(format_stamp("2025-01-10T09:00:00"), "2025-01-10 09:00");
        assert_eq!(format_stamp("2025-01-10T9"), "2025-01-10 9");
        assert_eq!(format_stamp("2025-01-10"), "2025-01-10");
    }

    #[test]
    fn test_period_text() {
        assert_eq!(
            period_text("2025-01-10T09:00:00", "2025-01-10T10:30:00"),
            "2025-01-10 09:00 ~ 2025-01-10 10:30"
        );
        assert_eq!(period_text("2025-01-10", "2025-01-10"), "2025-01-10");
        assert_eq!(period_text("2025-01-10", ""), "2025-01-10");
    }
}
