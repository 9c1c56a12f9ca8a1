use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::StatusCode,
};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::utils::http_error;

/// Session key holding the authenticated user's id (hex ObjectId)
pub const USER_ID_KEY: &str = "user_id";
/// Session key holding the most recently generated QR code id (hex ObjectId)
pub const LAST_QRCODE_KEY: &str = "last_qrcode_id";

/// The identity resolved from the session cookie, stored in request
/// extensions for handlers behind [`SessionAuth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: ObjectId,
}

pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Short-circuit with a real response (not an Err) so the shared error
        // body renders identically in every deployment context
        let deny = |req: ServiceRequest| {
            let resp = http_error::error_response(StatusCode::UNAUTHORIZED, "Login required");
            Box::pin(async move { Ok(req.into_response(resp).map_into_right_body()) })
                as Self::Future
        };

        // Read the identity from the session cookie
        let user_id = match req.get_session().get::<String>(USER_ID_KEY) {
            Ok(Some(id)) => id,
            _ => return deny(req),
        };

        // A session that fails to parse is treated the same as no session
        let object_id = match ObjectId::parse_str(&user_id) {
            Ok(id) => id,
            Err(_) => return deny(req),
        };

        // Store the identity in request extensions for later use
        req.extensions_mut().insert(CurrentUser { id: object_id });

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
