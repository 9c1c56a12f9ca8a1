pub mod qrcode;
pub mod user;
pub mod user_qrcode;
