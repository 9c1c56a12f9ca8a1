use actix_web::web;

use crate::handlers::auth_handlers::{login, logout};
use crate::handlers::health_handlers::health_check;
use crate::handlers::page_handlers::{
    brew_coffee, coffee_page, create_qrcode_page, home, login_page, not_found,
};
use crate::handlers::qrcode_handlers::{
    create_qrcode, most_recent_image, my_qrcode_image, my_qrcodes,
};
use crate::handlers::user_handlers::create_user;
use crate::middlewares::session_auth::SessionAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home));
    cfg.route("/brew-coffee/", web::get().to(coffee_page));
    cfg.route("/brew-coffee/", web::post().to(brew_coffee));
    cfg.route("/create-qrcode/", web::get().to(create_qrcode_page));
    cfg.route("/create-qrcode/", web::post().to(create_qrcode));
    // The most recent image is tied to the session, not the account
    cfg.route("/most-recent/qrcode.png", web::get().to(most_recent_image));
    // Account routes - require a logged-in session
    cfg.service(
        web::scope("/my-qrcodes")
            .wrap(SessionAuth)
            .route("/", web::get().to(my_qrcodes))
            .route("/{id}/qrcode.png", web::get().to(my_qrcode_image)),
    );
    cfg.route("/login", web::get().to(login_page));
    cfg.route("/login", web::post().to(login));
    cfg.route("/logout", web::get().to(logout));
    // Out-of-band account creation; the app itself has no signup flow
    cfg.route("/users", web::post().to(create_user));
    cfg.route("/health/check", web::get().to(health_check));
    cfg.default_service(web::route().to(not_found));
}
