use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::qrcode::Qrcode;

#[derive(Deserialize, Serialize, Validate)]
pub struct CreateQrcodeRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

#[derive(Serialize)]
pub struct QrcodeResponse {
    pub id: String,
    pub content: String,
    pub filename: String,
    pub created_at: i64,
}

impl From<Qrcode> for QrcodeResponse {
    fn from(qrcode: Qrcode) -> Self {
        Self {
            id: qrcode.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: qrcode.content,
            filename: qrcode.filename,
            created_at: qrcode.created_at,
        }
    }
}
