use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub created_at: i64,
}

impl User {
    pub fn new(username: String, full_name: Option<String>) -> Self {
        Self {
            id: None,
            username,
            full_name,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
