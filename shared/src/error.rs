//! Error taxonomy for backend calls and client-side validation.
//!
//! Every failure a page or modal can see is an [`ApiError`]. The frontend
//! never inspects message text to decide what happened; it matches on the
//! variant.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_FAILURE_MESSAGE: &str = "요청 처리 중 오류가 발생했습니다.";

/// What kind of resource a request was about. Used to word not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Schedule,
    ScheduleList,
    Club,
    Checklist,
}

impl ResourceKind {
    pub fn not_found_message(&self) -> &'static str {
        match self {
            ResourceKind::Schedule => "일정을 찾을 수 없습니다.",
            ResourceKind::ScheduleList => "일정 목록을 찾을 수 없습니다.",
            ResourceKind::Club => "모임을 찾을 수 없습니다.",
            ResourceKind::Checklist => "체크리스트를 찾을 수 없습니다.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Rejected on the client before any request was made
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    LoginRequired { message: String },

    #[error("{message}")]
    AccessDenied { message: String },

    #[error("{message}")]
    NotFound { resource: ResourceKind, message: String },

    #[error("HTTP error! status: {status} - {message}")]
    Http { status: u16, message: String },

    /// The request was aborted because a newer one replaced it or its owner
    /// went away. Never shown to the user.
    #[error("요청이 취소되었습니다.")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    pub fn is_login_required(&self) -> bool {
        matches!(self, ApiError::LoginRequired { .. })
    }
}

/// Error body the backend sends alongside non-2xx statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Numeric status hidden in `code`: `403`, `"403"` or `"403-2"`.
    fn status_hint(&self) -> Option<u16> {
        match self.code.as_ref()? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => {
                let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            }
            _ => None,
        }
    }
}

/// Classify a non-2xx response.
///
/// HTTP 401 always means login required. Otherwise the server-reported code
/// wins over the HTTP status.
pub fn classify_failure(status: u16, body: &str, resource: ResourceKind) -> ApiError {
    let parsed = ErrorBody::parse(body);
    let server_message = parsed.message.clone().filter(|m| !m.trim().is_empty());

    if status == 401 {
        return ApiError::LoginRequired {
            message: server_message.unwrap_or_else(|| "로그인이 필요합니다.".to_string()),
        };
    }

    let effective = parsed.status_hint().unwrap_or(status);
    match effective {
        401 => ApiError::LoginRequired {
            message: server_message.unwrap_or_else(|| "로그인이 필요합니다.".to_string()),
        },
        403 => ApiError::AccessDenied {
            message: server_message.unwrap_or_else(|| "접근 권한이 없습니다.".to_string()),
        },
        404 => ApiError::NotFound {
            resource,
            message: server_message.unwrap_or_else(|| resource.not_found_message().to_string()),
        },
        other => ApiError::Http {
            status: other,
            message: server_message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        },
    }
}

/// Turn a finished response into a payload.
///
/// `Ok(None)` means success without a body (204, or an empty 2xx body).
pub fn interpret_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    resource: ResourceKind,
) -> Result<Option<T>, ApiError> {
    if status == 204 {
        return Ok(None);
    }
    if !(200..300).contains(&status) {
        return Err(classify_failure(status, body, resource));
    }
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(body)
        .map(Some)
        .map_err(|e| ApiError::Parse(e.to_string()))
}
