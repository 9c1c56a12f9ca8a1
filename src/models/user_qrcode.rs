use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Join document tying a QR code to a user. The (user_id, qrcode_id) pair is
/// unique, so linking the same code twice is a no-op.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserQrcode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub qrcode_id: ObjectId,
    pub linked_at: i64,
}

impl UserQrcode {
    pub fn new(user_id: ObjectId, qrcode_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            qrcode_id,
            linked_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
