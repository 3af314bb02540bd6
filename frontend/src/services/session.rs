use std::rc::Rc;

use shared::ApiError;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::toast::ToastHandle;

/// Login state shared by every page. Set when any request comes back with
/// [`ApiError::LoginRequired`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub login_required: bool,
}

pub enum SessionAction {
    LoginRequired,
    Reset,
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let login_required = matches!(action, SessionAction::LoginRequired);
        if login_required == self.login_required {
            return self;
        }
        Rc::new(Session { login_required })
    }
}

pub type SessionContext = UseReducerHandle<Session>;

/// Route a failed request to the right surface: nothing for cancellations,
/// the session flag for login failures, a toast for the rest.
pub fn report_error(component: &str, error: &ApiError, toast: &ToastHandle, session: Option<&SessionContext>) {
    match error {
        ApiError::Cancelled => {}
        ApiError::LoginRequired { message } => {
            Logger::warn_with_component(component, message);
            match session {
                Some(session) => session.dispatch(SessionAction::LoginRequired),
                None => toast.error(message.clone()),
            }
        }
        other => {
            Logger::error_with_component(component, &other.to_string());
            toast.error(other.to_string());
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(Session::default);

    html! {
        <ContextProvider<SessionContext> context={session}>
            { props.children.clone() }
        </ContextProvider<SessionContext>>
    }
}

/// Banner shown once the backend has rejected the session
#[function_component(LoginNotice)]
pub fn login_notice() -> Html {
    let Some(session) = use_context::<SessionContext>() else {
        return html! {};
    };
    if !session.login_required {
        return html! {};
    }

    let on_dismiss = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| session.dispatch(SessionAction::Reset))
    };

    html! {
        <div class="login-notice">
            <span>{"로그인이 필요합니다."}</span>
            <a href="/login" class="btn btn-primary">{"로그인"}</a>
            <button class="btn btn-secondary" onclick={on_dismiss}>{"닫기"}</button>
        </div>
    }
}
