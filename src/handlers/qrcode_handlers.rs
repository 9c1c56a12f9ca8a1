use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, error, http::StatusCode, web};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use validator::Validate;

use crate::db::mongodb::is_duplicate_key;
use crate::middlewares::session_auth::{CurrentUser, LAST_QRCODE_KEY};
use crate::models::qrcode::Qrcode;
use crate::models::user_qrcode::UserQrcode;
use crate::state::app_state::AppState;
use crate::structs::qrcode_request::{CreateQrcodeRequest, QrcodeResponse};
use crate::utils::http_error;
use crate::utils::qr_image;

/// Create a QR code for a submitted URL, or reuse the existing record when the
/// same URL was submitted before. Either way the record's id becomes the
/// session's "most recent" image.
pub async fn create_qrcode(
    app_state: web::Data<AppState>,
    session: Session,
    web::Json(req): web::Json<CreateQrcodeRequest>,
) -> Result<HttpResponse> {
    // Validate the URL
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let db = &app_state.db;
    let qrcodes_collection = db.collection::<Qrcode>("qrcodes");

    // Find an existing record by exact content match
    let existing = qrcodes_collection
        .find_one(doc! { "content": &req.url })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let (qrcode, created) = match existing {
        Some(qrcode) => (qrcode, false),
        None => {
            let candidate = Qrcode::new(req.url.clone());
            match qrcodes_collection.insert_one(&candidate).await {
                Ok(result) => {
                    let id = result.inserted_id.as_object_id();
                    (Qrcode { id, ..candidate }, true)
                }
                // Lost a race against an identical submission; the unique
                // index on content guarantees the winner is there to fetch
                Err(e) if is_duplicate_key(&e) => {
                    let winner = qrcodes_collection
                        .find_one(doc! { "content": &req.url })
                        .await
                        .map_err(|e| {
                            error::ErrorInternalServerError(format!("Database error: {}", e))
                        })?
                        .ok_or_else(|| {
                            error::ErrorInternalServerError("QR code lost after duplicate insert")
                        })?;
                    (winner, false)
                }
                Err(e) => {
                    return Err(error::ErrorInternalServerError(format!(
                        "Database error: {}",
                        e
                    )));
                }
            }
        }
    };

    // Render the PNG only if it is missing from disk
    let path = app_state.qr_dir.join(&qrcode.filename);
    qr_image::render_to_file(&qrcode.content, &path)
        .map_err(|e| error::ErrorInternalServerError(format!("QR image error: {}", e)))?;

    // Remember this code as the session's most recent image
    let id = qrcode
        .id
        .ok_or_else(|| error::ErrorInternalServerError("QR code record has no id"))?;
    session
        .insert(LAST_QRCODE_KEY, id.to_hex())
        .map_err(|e| error::ErrorInternalServerError(format!("Session error: {}", e)))?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok(HttpResponse::build(status).json(QrcodeResponse::from(qrcode)))
}

/// Serve the image most recently generated in this session; public, no login
pub async fn most_recent_image(
    app_state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse> {
    let id_hex = session
        .get::<String>(LAST_QRCODE_KEY)
        .map_err(|e| error::ErrorInternalServerError(format!("Session error: {}", e)))?
        .ok_or_else(|| http_error::not_found("No QR code generated in this session"))?;
    let id = ObjectId::parse_str(&id_hex)
        .map_err(|_| http_error::not_found("No QR code generated in this session"))?;

    let qrcode = app_state
        .db
        .collection::<Qrcode>("qrcodes")
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?
        .ok_or_else(|| http_error::not_found("QR code not found"))?;

    serve_png(&app_state, &qrcode)
}

/// List the authenticated user's QR codes
pub async fn my_qrcodes(app_state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;
    let db = &app_state.db;

    let links = db
        .collection::<UserQrcode>("user_qrcodes")
        .find(doc! { "user_id": user_id })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?
        .try_collect::<Vec<UserQrcode>>()
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let qrcode_ids: Vec<ObjectId> = links.iter().map(|link| link.qrcode_id).collect();

    let qrcodes = db
        .collection::<Qrcode>("qrcodes")
        .find(doc! { "_id": { "$in": qrcode_ids } })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?
        .try_collect::<Vec<Qrcode>>()
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    let responses: Vec<QrcodeResponse> = qrcodes.into_iter().map(QrcodeResponse::from).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Serve one of the authenticated user's images. Ids not linked to this user
/// answer 404, whether they exist or not.
pub async fn my_qrcode_image(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(&req)?;
    let id = ObjectId::parse_str(&path.into_inner())
        .map_err(|_| http_error::not_found("QR code not found"))?;

    let db = &app_state.db;
    let link = db
        .collection::<UserQrcode>("user_qrcodes")
        .find_one(doc! { "user_id": user_id, "qrcode_id": id })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    if link.is_none() {
        return Err(http_error::not_found("QR code not found"));
    }

    let qrcode = db
        .collection::<Qrcode>("qrcodes")
        .find_one(doc! { "_id": id })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?
        .ok_or_else(|| http_error::not_found("QR code not found"))?;

    serve_png(&app_state, &qrcode)
}

/// Read the cached PNG from disk and hand it back
fn serve_png(app_state: &AppState, qrcode: &Qrcode) -> Result<HttpResponse> {
    let path = app_state.qr_dir.join(&qrcode.filename);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("image/png").body(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(http_error::not_found("QR image missing from storage"))
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(http_error::forbidden("QR image is not readable"))
        }
        Err(e) => Err(error::ErrorInternalServerError(format!(
            "Failed to read QR image: {}",
            e
        ))),
    }
}

/// Identity placed in request extensions by the session-auth middleware
fn current_user_id(req: &HttpRequest) -> Result<ObjectId> {
    req.extensions()
        .get::<CurrentUser>()
        .map(|user| user.id)
        .ok_or_else(|| http_error::unauthorized("Login required"))
}
