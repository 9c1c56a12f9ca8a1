pub mod auth_handlers;
pub mod health_handlers;
pub mod page_handlers;
pub mod qrcode_handlers;
pub mod user_handlers;
