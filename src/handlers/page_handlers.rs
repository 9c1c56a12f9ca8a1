use actix_web::{HttpResponse, Result, http::StatusCode};

use crate::utils::http_error::error_response;

/// Home page: a map of what the service offers
pub async fn home() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "name": "qrstash",
        "description": "Generate QR codes from URLs and keep them on your account",
        "endpoints": {
            "create": "POST /create-qrcode/",
            "most_recent": "GET /most-recent/qrcode.png",
            "my_qrcodes": "GET /my-qrcodes/",
            "login": "POST /login",
            "logout": "GET /logout",
        }
    })))
}

pub async fn coffee_page() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "POST here to brew coffee"
    })))
}

/// This server is, permanently, a teapot
pub async fn brew_coffee() -> Result<HttpResponse> {
    Ok(error_response(StatusCode::IM_A_TEAPOT, "I'm a teapot"))
}

pub async fn create_qrcode_page() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "POST a JSON body to create a QR code",
        "fields": { "url": "the URL to encode, must be well-formed" }
    })))
}

pub async fn login_page() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "POST a JSON body to log in",
        "fields": { "username": "your username" }
    })))
}

/// Default handler for unmatched routes
pub async fn not_found() -> Result<HttpResponse> {
    Ok(error_response(StatusCode::NOT_FOUND, "Page not found"))
}
