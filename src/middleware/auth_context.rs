use std::future::{ready, Ready};

use actix_web::{dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};

use crate::services::auth_service::{Claims, Role};

/// The moderator making the request, taken from claims `AuthMiddleware` validated.
#[derive(Clone)]
pub struct Moderator {
    pub name: String,
}

impl FromRequest for Moderator {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) if claims.role == Role::Moderator => ready(Ok(Moderator {
                name: claims.sub.clone(),
            })),
            _ => ready(Err(ErrorUnauthorized("Moderator not authenticated"))),
        }
    }
}
