use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const TOAST_DURATION_MS: u32 = 3_000;

static NEXT_TOAST_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastState { toasts })
    }
}

/// Handle for raising toasts. Outside a [`ToastProvider`] messages only go
/// to the console.
#[derive(Clone, Default, PartialEq)]
pub struct ToastHandle {
    dispatcher: Option<UseReducerDispatcher<ToastState>>,
}

impl ToastHandle {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let Some(dispatcher) = self.dispatcher.clone() else {
            gloo::console::log!(format!("toast ({:?}): {}", kind, message));
            return;
        };

        let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
        dispatcher.dispatch(ToastAction::Push(Toast { id, kind, message }));

        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            dispatcher.dispatch(ToastAction::Dismiss(id));
        });
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>().unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);
    let handle = ToastHandle {
        dispatcher: Some(state.dispatcher()),
    };

    let on_dismiss = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            { props.children.clone() }
            <div class="toast-container">
                { for state.toasts.iter().map(|toast| {
                    let on_click = {
                        let on_dismiss = on_dismiss.clone();
                        let id = toast.id;
                        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
                    };
                    html! {
                        <div key={toast.id} class={toast.kind.class()} onclick={on_click}>
                            { toast.message.clone() }
                        </div>
                    }
                }) }
            </div>
        </ContextProvider<ToastHandle>>
    }
}
