use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use std::fmt::Display;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Record not found";
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error.";

/// Error part of an envelope. Not-found misses carry a bare message, every
/// other failure carries the structured form.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiErrorBody {
    Message(String),
    Detail {
        field: String,
        message: String,
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn empty() -> Self {
        Self {
            success: true,
            result: None,
            error: None,
        }
    }

    pub fn failure(error: ApiErrorBody) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

/// List-by-year envelope; the mean rides next to `result`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearListResponse<T: Serialize> {
    pub success: bool,
    pub result: Vec<T>,
    pub average_goals_for: f64,
}

pub fn ok() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()>::empty())
}

pub fn ok_with<T: Serialize>(result: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(result))
}

/// Misses are answered with 200 and `success: false`, as existing clients expect.
pub fn not_found() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()>::failure(ApiErrorBody::Message(
        NOT_FOUND_MESSAGE.to_string(),
    )))
}

pub fn bad_request(field: &str, message: impl Into<String>) -> HttpResponse {
    detail(StatusCode::BAD_REQUEST, field, message.into())
}

/// Logs the cause and answers with the generic 500 envelope. The cause never
/// reaches the client.
pub fn server_error(source: &str, err: impl Display) -> HttpResponse {
    error!(source, error = %err, "Request failed");
    detail(
        StatusCode::INTERNAL_SERVER_ERROR,
        "server",
        SERVER_ERROR_MESSAGE.to_string(),
    )
}

fn detail(status: StatusCode, field: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::<()>::failure(ApiErrorBody::Detail {
        field: field.to_string(),
        message,
        status_code: status.as_u16(),
    }))
}
