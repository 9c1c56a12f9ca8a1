use anyhow::{Context, Result};
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use std::env;

use crate::models::qrcode::Qrcode;
use crate::models::user::User;
use crate::models::user_qrcode::UserQrcode;

/// Connect to MongoDB and make sure the unique indexes exist
pub async fn get_database() -> Result<Database> {
    let uri = env::var("MONGO_URI").unwrap_or_else(|_| String::from("mongodb://localhost:27017"));
    let db_name = env::var("MONGO_DB").unwrap_or_else(|_| String::from("qrstash"));

    let client = Client::with_uri_str(&uri)
        .await
        .context("Failed to parse MongoDB connection string")?;
    let db = client.database(&db_name);

    // Fail fast if the server is unreachable
    db.run_command(doc! { "ping": 1 })
        .await
        .context("Failed to reach MongoDB server")?;

    ensure_indexes(&db).await?;

    Ok(db)
}

/// Unique indexes back the find-or-create patterns: a lost race surfaces as a
/// duplicate-key error and the caller re-fetches the winning document.
async fn ensure_indexes(db: &Database) -> Result<()> {
    db.collection::<User>("users")
        .create_index(unique_index(doc! { "username": 1 }))
        .await
        .context("Failed to create username index")?;

    db.collection::<Qrcode>("qrcodes")
        .create_index(unique_index(doc! { "content": 1 }))
        .await
        .context("Failed to create qrcode content index")?;
    db.collection::<Qrcode>("qrcodes")
        .create_index(unique_index(doc! { "filename": 1 }))
        .await
        .context("Failed to create qrcode filename index")?;

    db.collection::<UserQrcode>("user_qrcodes")
        .create_index(unique_index(doc! { "user_id": 1, "qrcode_id": 1 }))
        .await
        .context("Failed to create user/qrcode join index")?;

    Ok(())
}

fn unique_index(keys: Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// True when an insert failed because a unique index rejected it (E11000)
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000
    )
}
