pub mod http_error;
pub mod qr_image;
