use mongodb::Database;
use std::path::PathBuf;

pub struct AppState {
    pub db: Database,
    /// Directory where rendered QR PNGs are cached, one file per code
    pub qr_dir: PathBuf,
}
