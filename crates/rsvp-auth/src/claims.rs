use super::*;
use rsvp_core::ID;
use rsvp_core::TOKEN_VALIDITY;

/// Signed payload of a bearer token. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user` issued at unix time `now`.
    pub fn new(user: ID<Member>, now: i64) -> Self {
        Self {
            sub: user.inner(),
            iat: now,
            exp: now + TOKEN_VALIDITY.as_secs() as i64,
        }
    }
    /// Valid only while `now < exp`.
    pub fn expired(&self, now: i64) -> bool {
        now >= self.exp
    }
    pub fn user(&self) -> ID<Member> {
        ID::from(self.sub)
    }
}

/// Current unix time in seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
