use actix_web::{HttpResponse, Result, error, web};
use mongodb::bson::doc;

use crate::db::mongodb::is_duplicate_key;
use crate::models::user::User;
use crate::state::app_state::AppState;
use crate::structs::user::{CreateUserRequest, UserResponse};

/// Create a user. There is no registration flow in the UI; accounts are set
/// up through this endpoint ahead of time.
pub async fn create_user(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let db = &app_state.db;
    let users_collection = db.collection::<User>("users");

    // Check if username already exists
    let existing_user = users_collection
        .find_one(doc! { "username": &req.username })
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;

    if existing_user.is_some() {
        return Err(error::ErrorBadRequest("Username already exists"));
    }

    // Create new user
    let new_user = User::new(req.username, req.full_name);

    // Insert into database; the unique index catches a concurrent signup of
    // the same username
    let result = match users_collection.insert_one(&new_user).await {
        Ok(result) => result,
        Err(e) if is_duplicate_key(&e) => {
            return Err(error::ErrorBadRequest("Username already exists"));
        }
        Err(e) => {
            return Err(error::ErrorInternalServerError(format!(
                "Failed to create user: {}",
                e
            )));
        }
    };

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| error::ErrorInternalServerError("User created without an id"))?;

    let inserted_user = User {
        id: Some(id),
        ..new_user
    };

    Ok(HttpResponse::Created().json(UserResponse::from(inserted_user)))
}
