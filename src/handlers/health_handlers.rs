use actix_web::{HttpResponse, Result, http::StatusCode, web};
use mongodb::bson::doc;

use crate::state::app_state::AppState;
use crate::utils::http_error::error_response;

/// Liveness of the service and its backing store
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    if let Err(e) = state.db.run_command(doc! { "ping": 1 }).await {
        log::error!("Health check could not reach MongoDB: {}", e);
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database connection failed",
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": 200,
        "message": "ok"
    })))
}
