use std::cell::Cell;
use std::rc::Rc;

use shared::{ApiError, CalendarMode};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{report_error, SessionContext};
use crate::services::toast::use_toast;

const ROLE_LOAD_ERROR: &str = "모임 정보를 불러오지 못했습니다.";

/// Whether the current user may edit this club's calendar. Read-only until
/// the membership lookup answers, and after any failure.
#[hook]
pub fn use_club_role(api_client: &ApiClient, club_id: Option<i64>) -> CalendarMode {
    let mode = use_state(CalendarMode::default);
    let toast = use_toast();
    let session = use_context::<SessionContext>();

    {
        let mode = mode.clone();
        let api_client = api_client.clone();
        use_effect_with(club_id, move |club_id| {
            mode.set(CalendarMode::ReadOnly);
            let stale = Rc::new(Cell::new(false));

            if let Some(club_id) = *club_id {
                let stale = stale.clone();
                spawn_local(async move {
                    let result = api_client.get_my_club_info(club_id).await;
                    if stale.get() {
                        return;
                    }
                    match result {
                        Ok(info) => {
                            let resolved = CalendarMode::for_member(Some(&info));
                            Logger::debug_with_component(
                                "use-club-role",
                                &format!("club {} mode {:?}", club_id, resolved),
                            );
                            mode.set(resolved);
                        }
                        Err(e @ (ApiError::LoginRequired { .. } | ApiError::Cancelled)) => {
                            report_error("use-club-role", &e, &toast, session.as_ref());
                        }
                        Err(e) => {
                            Logger::error_with_component("use-club-role", &e.to_string());
                            toast.error(ROLE_LOAD_ERROR);
                        }
                    }
                });
            }

            move || stale.set(true)
        });
    }

    *mode
}
