use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod route;
mod services;

use components::club_schedule_page::ClubSchedulePage;
use components::my_schedule_page::MySchedulePage;
use config::AppConfig;
use route::Route;
use services::api::ApiClient;
use services::logging::Logger;
use services::session::{LoginNotice, SessionProvider};
use services::toast::ToastProvider;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let route = use_memo((), |_| Route::current());

    let page = match &*route {
        Route::ClubSchedule { club_id } => html! {
            <ClubSchedulePage api_client={(*api_client).clone()} club_id={*club_id} />
        },
        Route::MySchedules => html! {
            <MySchedulePage api_client={(*api_client).clone()} />
        },
        Route::NotFound => html! {
            <div class="not-found">{"페이지를 찾을 수 없습니다."}</div>
        },
    };

    html! {
        <SessionProvider>
            <ToastProvider>
                <LoginNotice />
                { page }
            </ToastProvider>
        </SessionProvider>
    }
}

fn main() {
    let config = AppConfig::from_env();
    Logger::init(&config);
    Logger::info_with_component("app", &format!("starting against {}", config.api_base_url));
    yew::Renderer::<App>::new().render();
}
