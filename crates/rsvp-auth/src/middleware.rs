use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;

/// Extractor for authenticated requests.
///
/// Resolves `Authorization: Bearer <token>` to a stored [`Member`].
/// Any failure rejects the request before the handler body runs.
pub struct Auth(pub Member);

impl Auth {
    pub fn member(&self) -> &Member {
        &self.0
    }
    pub fn identity(&self) -> Identity {
        Identity::from(self.0.clone())
    }
}

/// Token from a `Bearer` authorization header, if well-formed.
fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

impl FromRequest for Auth {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let crypto = req.app_data::<web::Data<Crypto>>().cloned();
        let store = req.app_data::<web::Data<dyn Credentials>>().cloned();
        let token = bearer(req);
        Box::pin(async move {
            let token = token.ok_or(ApiError::Unauthorized(BAD_HEADER))?;
            let crypto = crypto.ok_or_else(|| {
                log::error!("token service not configured");
                ApiError::Internal(INTERNAL)
            })?;
            let store = store.ok_or_else(|| {
                log::error!("credential store not configured");
                ApiError::Internal(INTERNAL)
            })?;
            let claims = crypto.verify(&token)?;
            let member = store.member(claims.user()).await?.ok_or_else(|| {
                log::debug!("token subject {} no longer exists", claims.sub);
                ApiError::Unauthorized(BAD_TOKEN)
            })?;
            Ok(Auth(member))
        })
    }
}
