use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rendered QR code. `content` is the submitted URL and is unique across the
/// collection, so resubmitting a URL reuses the record and its PNG on disk.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Qrcode {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub content: String,
    pub filename: String, // "<uuid-v4>.png", also unique
    pub created_at: i64,
}

impl Qrcode {
    pub fn new(content: String) -> Self {
        Self {
            id: None,
            content,
            filename: format!("{}.png", Uuid::new_v4()),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_a_png_named_by_uuid() {
        let qrcode = Qrcode::new(String::from("https://example.com"));
        let stem = qrcode.filename.strip_suffix(".png").expect("png suffix");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn filenames_are_distinct_per_record() {
        let a = Qrcode::new(String::from("https://example.com"));
        let b = Qrcode::new(String::from("https://example.com"));
        assert_ne!(a.filename, b.filename);
    }
}
