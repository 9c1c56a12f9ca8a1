mod db;
mod handlers;
mod middlewares;
mod models;
mod routes;
mod state;
mod structs;
mod utils;

use crate::state::app_state::AppState;
use actix_cors::Cors;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, http, middleware::Logger, web};
use db::mongodb::get_database;
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use std::env;
use std::path::PathBuf;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Initialize the database connection
    let db = match get_database().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error connecting to the database: {}", e);
            std::process::exit(1);
        }
    };

    // Directory holding the rendered QR PNGs
    let qr_dir = PathBuf::from(
        env::var("QR_STORAGE_DIR").unwrap_or_else(|_| String::from("qrcodes")),
    );
    if let Err(e) = std::fs::create_dir_all(&qr_dir) {
        eprintln!("Error creating QR storage directory {}: {}", qr_dir.display(), e);
        std::process::exit(1);
    }

    // Key for signing the session cookie; a generated key means sessions
    // do not survive a restart, which is fine for local use
    let session_key = match env::var("SESSION_SECRET") {
        Ok(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
        _ => {
            log::warn!("SESSION_SECRET not set (or shorter than 64 bytes); using an ephemeral key");
            Key::generate()
        }
    };

    // Create shared state
    let app_state = web::Data::new(AppState { db, qr_dir });

    // Start the Actix Web server
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        // Enable CORS for all origins
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:4173")
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![http::header::ACCEPT, http::header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false) // served over plain http locally
                    .build(),
            )
            .wrap(cors)
            .app_data(app_state.clone())
            .app_data(
                web::JsonConfig::default().error_handler(utils::http_error::json_error_handler),
            )
            .configure(init_routes)
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
