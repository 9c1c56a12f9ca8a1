pub mod auth;
pub mod qrcode_request;
pub mod user;
