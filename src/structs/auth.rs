use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    /// Id of the session's pending QR code, if logging in claimed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_qrcode: Option<String>,
}
