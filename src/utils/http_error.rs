use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use std::fmt;

/// Every client-facing error renders the same JSON body so the frontend only
/// has to understand one shape.
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown"),
        "message": message,
    }))
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status, &self.message)
    }
}

/// Bodies that fail to parse as JSON render the shared shape too; wire this
/// into `web::JsonConfig` so actix's plain-text 400 never leaks out
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, &message)).into()
}

pub fn unauthorized(message: &str) -> actix_web::Error {
    ApiError {
        status: StatusCode::UNAUTHORIZED,
        message: message.to_string(),
    }
    .into()
}

pub fn forbidden(message: &str) -> actix_web::Error {
    ApiError {
        status: StatusCode::FORBIDDEN,
        message: message.to_string(),
    }
    .into()
}

pub fn not_found(message: &str) -> actix_web::Error {
    ApiError {
        status: StatusCode::NOT_FOUND,
        message: message.to_string(),
    }
    .into()
}
