use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::error::interpret_response;
use shared::{
    ApiError, FetchParams, MyInfoInClub, ResourceKind, RsData, ScheduleDetail, ScheduleRecord,
    ScheduleWriteRequest,
};
use web_sys::{AbortSignal, RequestCredentials};

use crate::config::AppConfig;
use crate::services::logging::Logger;

/// API client for the club backend.
///
/// Every request carries the session cookie. Failures come back as
/// [`ApiError`]; nothing is retried.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_env().api_base_url)
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Club or personal schedule list for a date range
    pub async fn fetch_schedules(
        &self,
        params: FetchParams,
        signal: Option<AbortSignal>,
    ) -> Result<Vec<ScheduleRecord>, ApiError> {
        let path = params.path()?;
        let envelope: Option<RsData<Vec<ScheduleRecord>>> = self
            .send(Request::get(&self.url(&path)), signal.as_ref(), ResourceKind::ScheduleList)
            .await?;
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }

    /// Get a single schedule
    pub async fn get_schedule(
        &self,
        schedule_id: i64,
        signal: Option<AbortSignal>,
    ) -> Result<ScheduleDetail, ApiError> {
        let url = self.url(&format!("/api/v1/schedules/{}", schedule_id));
        let envelope: Option<RsData<ScheduleDetail>> = self
            .send(Request::get(&url), signal.as_ref(), ResourceKind::Schedule)
            .await?;

        let envelope = envelope.ok_or_else(|| missing(ResourceKind::Schedule, None))?;
        let message = envelope.message;
        envelope
            .data
            .ok_or_else(|| missing(ResourceKind::Schedule, message))
    }

    /// Create a schedule. Returns the server's confirmation message.
    pub async fn create_schedule(&self, request: &ScheduleWriteRequest) -> Result<Option<String>, ApiError> {
        let url = self.url("/api/v1/schedules");
        let envelope: Option<RsData<serde_json::Value>> = self
            .send_json(Request::post(&url), request, ResourceKind::Schedule)
            .await?;
        Ok(envelope.and_then(|e| e.message))
    }

    /// Update a schedule. Returns the server's confirmation message.
    pub async fn modify_schedule(
        &self,
        schedule_id: i64,
        request: &ScheduleWriteRequest,
    ) -> Result<Option<String>, ApiError> {
        let url = self.url(&format!("/api/v1/schedules/{}", schedule_id));
        let envelope: Option<RsData<serde_json::Value>> = self
            .send_json(Request::put(&url), request, ResourceKind::Schedule)
            .await?;
        Ok(envelope.and_then(|e| e.message))
    }

    /// Delete a schedule. A 204 is success with no message.
    pub async fn delete_schedule(&self, schedule_id: i64) -> Result<Option<String>, ApiError> {
        let url = self.url(&format!("/api/v1/schedules/{}", schedule_id));
        let envelope: Option<RsData<serde_json::Value>> = self
            .send(Request::delete(&url), None, ResourceKind::Schedule)
            .await?;
        Ok(envelope.and_then(|e| e.message))
    }

    /// The caller's role and membership state in a club
    pub async fn get_my_club_info(&self, club_id: i64) -> Result<MyInfoInClub, ApiError> {
        let url = self.url(&format!("/api/v1/my-clubs/{}", club_id));
        let envelope: Option<RsData<MyInfoInClub>> = self
            .send(Request::get(&url), None, ResourceKind::Club)
            .await?;

        let envelope = envelope.ok_or_else(|| missing(ResourceKind::Club, None))?;
        let message = envelope.message;
        envelope.data.ok_or_else(|| missing(ResourceKind::Club, message))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        signal: Option<&AbortSignal>,
        resource: ResourceKind,
    ) -> Result<Option<T>, ApiError> {
        let response = builder
            .credentials(RequestCredentials::Include)
            .abort_signal(signal)
            .send()
            .await
            .map_err(transport_error)?;
        read_response(response, signal, resource).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
        resource: ResourceKind,
    ) -> Result<Option<T>, ApiError> {
        let request = builder
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(transport_error)?;
        read_response(response, None, resource).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_response<T: DeserializeOwned>(
    response: Response,
    signal: Option<&AbortSignal>,
    resource: ResourceKind,
) -> Result<Option<T>, ApiError> {
    let status = response.status();
    // No body to read on 204
    let body = if status == 204 {
        String::new()
    } else {
        response.text().await.map_err(transport_error)?
    };

    if signal.map(|s| s.aborted()).unwrap_or(false) {
        return Err(ApiError::Cancelled);
    }

    let result = interpret_response(status, &body, resource);
    if let Err(e) = &result {
        Logger::warn_with_component("api", &format!("{} {}: {}", response.url(), status, e));
    }
    result
}

fn transport_error(err: gloo::net::Error) -> ApiError {
    match err {
        gloo::net::Error::JsError(js) if js.name == "AbortError" => ApiError::Cancelled,
        other => ApiError::Network(other.to_string()),
    }
}

fn missing(resource: ResourceKind, message: Option<String>) -> ApiError {
    ApiError::NotFound {
        resource,
        message: message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| resource.not_found_message().to_string()),
    }
}
