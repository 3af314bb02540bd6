use shared::{
    DateSelection, EditMode, EditPhase, FieldChange, FormField, ModalOutcome, RequestSlot, ScheduleForm,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::abort::BrowserAbort;
use crate::services::api::ApiClient;
use crate::services::date_utils::default_times;
use crate::services::logging::Logger;
use crate::services::session::{report_error, SessionContext};
use crate::services::toast::use_toast;

const CREATE_SUCCESS: &str = "일정이 등록되었습니다.";
const MODIFY_SUCCESS: &str = "일정이 수정되었습니다.";

#[derive(Properties, PartialEq)]
pub struct ScheduleEditModalProps {
    pub api_client: ApiClient,
    pub club_id: i64,
    /// Calendar selection that seeds a new schedule
    #[prop_or_default]
    pub selection: Option<DateSelection>,
    /// Set to edit an existing schedule
    #[prop_or_default]
    pub schedule_id: Option<i64>,
    pub on_close: Callback<ModalOutcome>,
}

#[function_component(ScheduleEditModal)]
pub fn schedule_edit_modal(props: &ScheduleEditModalProps) -> Html {
    let mode = EditMode::from_schedule_id(props.schedule_id);
    let form = use_state(|| ScheduleForm {
        club_id: props.club_id,
        ..ScheduleForm::default()
    });
    let phase = use_state(|| EditPhase::Closed);
    let error_message = use_state(|| Option::<String>::None);
    let prefill = use_mut_ref(RequestSlot::<BrowserAbort>::new);
    let toast = use_toast();
    let session = use_context::<SessionContext>();

    // Seed the form when opened, or when the target changes
    {
        let form = form.clone();
        let phase = phase.clone();
        let error_message = error_message.clone();
        let prefill = prefill.clone();
        let api_client = props.api_client.clone();
        let on_close = props.on_close.clone();
        let toast = toast.clone();
        let session = session.clone();
        let club_id = props.club_id;
        use_effect_with((mode, props.selection.clone()), move |(mode, selection)| {
            error_message.set(None);
            match *mode {
                EditMode::Create => {
                    form.set(ScheduleForm::for_create(club_id, selection.as_ref(), default_times()));
                    phase.set(EditPhase::Editing);
                }
                EditMode::Edit { schedule_id } => {
                    phase.set(EditPhase::Prefilling);
                    if let Some((handle, signal)) = BrowserAbort::new() {
                        let ticket = prefill.borrow_mut().begin(handle);
                        let prefill = prefill.clone();
                        spawn_local(async move {
                            let result = api_client.get_schedule(schedule_id, Some(signal)).await;
                            if !prefill.borrow_mut().finish(ticket) {
                                return;
                            }
                            match result {
                                Ok(detail) => {
                                    form.set(ScheduleForm::from_detail(club_id, &detail));
                                    phase.set(EditPhase::Editing);
                                }
                                Err(e) if e.is_cancelled() => {}
                                Err(e) => {
                                    // Nothing sensible to submit without the stored values
                                    report_error("schedule-edit", &e, &toast, session.as_ref());
                                    phase.set(EditPhase::Closed);
                                    on_close.emit(ModalOutcome::Closed);
                                }
                            }
                        });
                    }
                }
            }

            move || prefill.borrow_mut().cancel()
        });
    }

    let on_input = |field: FormField| {
        let form = form.clone();
        let toast = toast.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            if let FieldChange::Snapped { warning: Some(warning) } = next.set_field(field, value) {
                toast.warning(warning);
            }
            form.set(next);
        })
    };
    let text_input = |field: FormField| {
        on_input(field).reform(|e: InputEvent| e.target_unchecked_into::<HtmlInputElement>().value())
    };
    let text_area = |field: FormField| {
        on_input(field).reform(|e: InputEvent| e.target_unchecked_into::<HtmlTextAreaElement>().value())
    };
    let picker = |field: FormField| {
        on_input(field).reform(|e: Event| e.target_unchecked_into::<HtmlInputElement>().value())
    };

    let on_submit = {
        let form = form.clone();
        let phase = phase.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        let on_close = props.on_close.clone();
        let toast = toast.clone();
        let session = session.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *phase != EditPhase::Editing {
                return;
            }

            let request = match form.to_request() {
                Ok(request) => request,
                Err(e) => {
                    toast.error(e.to_string());
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };

            phase.set(EditPhase::Submitting);
            error_message.set(None);

            let form = form.clone();
            let phase = phase.clone();
            let error_message = error_message.clone();
            let api_client = api_client.clone();
            let on_close = on_close.clone();
            let toast = toast.clone();
            let session = session.clone();

            spawn_local(async move {
                let (result, default_message) = match mode {
                    EditMode::Create => (api_client.create_schedule(&request).await, CREATE_SUCCESS),
                    EditMode::Edit { schedule_id } => {
                        (api_client.modify_schedule(schedule_id, &request).await, MODIFY_SUCCESS)
                    }
                };

                match result {
                    Ok(message) => {
                        Logger::info_with_component("schedule-edit", &format!("saved {:?}", mode));
                        toast.success(message.filter(|m| !m.is_empty()).unwrap_or_else(|| default_message.to_string()));
                        let mut cleared = (*form).clone();
                        cleared.reset_after_submit(default_times());
                        form.set(cleared);
                        phase.set(EditPhase::Closed);
                        on_close.emit(ModalOutcome::Refreshed);
                    }
                    Err(e) => {
                        report_error("schedule-edit", &e, &toast, session.as_ref());
                        error_message.set(Some(e.to_string()));
                        phase.set(EditPhase::Editing);
                    }
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(ModalOutcome::Closed);
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(ModalOutcome::Closed))
    };

    if *phase == EditPhase::Closed {
        return html! {};
    }

    let busy = matches!(*phase, EditPhase::Prefilling | EditPhase::Submitting);
    let inverted = form.is_end_before_start();
    let title = match mode {
        EditMode::Create => "일정 등록",
        EditMode::Edit { .. } => "일정 수정",
    };

    html! {
        <div class="schedule-modal-backdrop" onclick={on_backdrop_click}>
            <div class="schedule-modal" onclick={on_modal_click}>
                <div class="schedule-modal-content">
                    <h3 class="schedule-modal-title">{title}</h3>

                    if *phase == EditPhase::Prefilling {
                        <div class="schedule-detail-loading">{"일정 정보를 불러오는 중..."}</div>
                    }

                    if let Some(error) = (*error_message).clone() {
                        <div class="schedule-form-error">{error}</div>
                    }

                    <form class="schedule-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="schedule-title">{"제목"}</label>
                            <input
                                id="schedule-title"
                                type="text"
                                class="schedule-input"
                                value={form.title.clone()}
                                oninput={text_input(FormField::Title)}
                                disabled={busy}
                                autofocus=true
                            />
                        </div>

                        <div class="form-row">
                            <div class="form-group">
                                <label for="schedule-start-date">{"시작일"}</label>
                                <input
                                    id="schedule-start-date"
                                    type="date"
                                    class="schedule-input"
                                    value={form.start_date.clone()}
                                    onchange={picker(FormField::StartDate)}
                                    disabled={busy}
                                />
                            </div>
                            <div class="form-group">
                                <label for="schedule-start-time">{"시작시간"}</label>
                                <input
                                    id="schedule-start-time"
                                    type="time"
                                    class="schedule-input"
                                    value={form.start_time.clone()}
                                    onchange={picker(FormField::StartTime)}
                                    disabled={busy}
                                />
                            </div>
                        </div>

                        <div class="form-row">
                            <div class="form-group">
                                <label for="schedule-end-date">{"종료일"}</label>
                                <input
                                    id="schedule-end-date"
                                    type="date"
                                    class="schedule-input"
                                    min={form.start_date.clone()}
                                    value={form.end_date.clone()}
                                    onchange={picker(FormField::EndDate)}
                                    disabled={busy}
                                />
                            </div>
                            <div class="form-group">
                                <label for="schedule-end-time">{"종료시간"}</label>
                                <input
                                    id="schedule-end-time"
                                    type="time"
                                    class="schedule-input"
                                    value={form.end_time.clone()}
                                    onchange={picker(FormField::EndTime)}
                                    disabled={busy}
                                />
                            </div>
                        </div>

                        <div class="form-group">
                            <label for="schedule-spot">{"장소"}</label>
                            <input
                                id="schedule-spot"
                                type="text"
                                class="schedule-input"
                                value={form.spot.clone()}
                                oninput={text_input(FormField::Spot)}
                                disabled={busy}
                            />
                        </div>

                        <div class="form-group">
                            <label for="schedule-content">{"내용"}</label>
                            <textarea
                                id="schedule-content"
                                class="schedule-input"
                                value={form.content.clone()}
                                oninput={text_area(FormField::Content)}
                                disabled={busy}
                            />
                        </div>

                        <div class="schedule-modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={busy || inverted}>
                                { if *phase == EditPhase::Submitting { "저장 중..." } else { "저장" } }
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                                {"취소"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
