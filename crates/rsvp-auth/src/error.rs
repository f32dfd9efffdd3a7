use rsvp_core::StoreError;

/// Why a bearer token was rejected. Never shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a well-formed JWT")]
    Malformed,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidAlgorithm => Self::InvalidSignature,
            ErrorKind::MissingAlgorithm => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

/// Startup-time misconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("token signing secret is missing or empty")]
    MissingSecret,
    #[error("token signing key rejected the claims")]
    Signing,
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Caller-facing failure of an API operation.
///
/// Messages are deliberately generic for authentication failures;
/// detail for infrastructure failures goes to the log, not the body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

pub const BAD_CREDENTIALS: &str = "invalid email or password";
pub const BAD_HEADER: &str = "missing or malformed credentials";
pub const BAD_TOKEN: &str = "invalid or expired token";
pub const INTERNAL: &str = "internal failure";

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        log::debug!("rejected bearer token: {}", e);
        Self::Unauthorized(BAD_TOKEN)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        log::error!("{}", e);
        Self::Internal(INTERNAL)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        log::error!("{}", e);
        Self::Internal(INTERNAL)
    }
}

impl From<HashError> for ApiError {
    fn from(e: HashError) -> Self {
        log::error!("{}", e);
        Self::Internal(INTERNAL)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Validation(e.to_string())
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl From<actix_web::error::BlockingError> for ApiError {
        fn from(e: actix_web::error::BlockingError) -> Self {
            log::error!("blocking pool failure: {}", e);
            Self::Internal(INTERNAL)
        }
    }

    impl ResponseError for ApiError {
        fn status_code(&self) -> StatusCode {
            match self {
                Self::Validation(_) => StatusCode::BAD_REQUEST,
                Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                Self::Forbidden(_) => StatusCode::FORBIDDEN,
                Self::NotFound(_) => StatusCode::NOT_FOUND,
                Self::Conflict(_) => StatusCode::CONFLICT,
                Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "error": self.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_collapse_to_one_message() {
        let reasons = [
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ];
        for reason in reasons {
            assert_eq!(ApiError::from(reason).to_string(), BAD_TOKEN);
        }
    }

    #[test]
    fn store_failures_hide_detail() {
        let e = ApiError::from(StoreError::Backend("relation users does not exist".into()));
        assert_eq!(e.to_string(), INTERNAL);
    }

    #[test]
    fn signing_failure_is_internal_not_a_token_rejection() {
        let e = ApiError::from(ConfigError::Signing);
        assert!(matches!(e, ApiError::Internal(INTERNAL)));
        assert_ne!(e.to_string(), BAD_TOKEN);
    }

    #[cfg(feature = "server")]
    #[test]
    fn statuses() {
        use actix_web::ResponseError;
        use actix_web::http::StatusCode;
        assert_eq!(ApiError::Unauthorized(BAD_HEADER).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("no").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Internal(INTERNAL).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
