use actix_session::Session;
use actix_web::{HttpResponse, Result, error, http::StatusCode, web};
use mongodb::bson::{doc, oid::ObjectId};

use crate::db::mongodb::is_duplicate_key;
use crate::middlewares::session_auth::{LAST_QRCODE_KEY, USER_ID_KEY};
use crate::models::qrcode::Qrcode;
use crate::models::user::User;
use crate::models::user_qrcode::UserQrcode;
use crate::state::app_state::AppState;
use crate::structs::auth::{LoginRequest, LoginResponse};
use crate::utils::http_error::error_response;

/// Username-only login. If the session holds a pending "most recent" QR code,
/// it is linked to the account on the way in.
pub async fn login(
    app_state: web::Data<AppState>,
    session: Session,
    web::Json(req): web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let db = &app_state.db;
    let users_collection = db.collection::<User>("users");

    // Find the user; there is no credential to check
    let user = users_collection
        .find_one(doc! { "username": &req.username })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let Some(user) = user else {
        return Ok(error_response(
            StatusCode::UNAUTHORIZED,
            "Unknown username",
        ));
    };

    let user_id = user
        .id
        .ok_or_else(|| error::ErrorInternalServerError("User record has no id"))?;

    session
        .insert(USER_ID_KEY, user_id.to_hex())
        .map_err(|e| error::ErrorInternalServerError(format!("Session error: {}", e)))?;

    // Claim the pending image, if the session carries one
    let claimed_qrcode = match session.get::<String>(LAST_QRCODE_KEY) {
        Ok(Some(id_hex)) => claim_qrcode(&app_state, user_id, &id_hex).await?,
        _ => None,
    };

    Ok(HttpResponse::Ok().json(LoginResponse {
        username: user.username,
        claimed_qrcode,
    }))
}

/// Link the session's pending QR code to the user. Linking is idempotent: a
/// duplicate-key error from the compound unique index means it was already
/// claimed.
async fn claim_qrcode(
    app_state: &AppState,
    user_id: ObjectId,
    qrcode_id_hex: &str,
) -> Result<Option<String>> {
    let Ok(qrcode_id) = ObjectId::parse_str(qrcode_id_hex) else {
        return Ok(None);
    };
    let db = &app_state.db;

    // A stale session id pointing at a deleted record is silently dropped
    let qrcode = db
        .collection::<Qrcode>("qrcodes")
        .find_one(doc! { "_id": qrcode_id })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;
    if qrcode.is_none() {
        return Ok(None);
    }

    let link = UserQrcode::new(user_id, qrcode_id);
    match db
        .collection::<UserQrcode>("user_qrcodes")
        .insert_one(&link)
        .await
    {
        Ok(_) => Ok(Some(qrcode_id.to_hex())),
        Err(e) if is_duplicate_key(&e) => Ok(Some(qrcode_id.to_hex())),
        Err(e) => Err(error::ErrorInternalServerError(format!(
            "Database error: {}",
            e
        ))),
    }
}

/// Drop the whole session: identity and any pending image
pub async fn logout(session: Session) -> Result<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logged out"
    })))
}
