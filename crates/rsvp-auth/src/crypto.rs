use super::*;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use rsvp_core::ID;

/// The only algorithm tokens are signed or accepted with.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token issuer and verifier over one process-wide HMAC secret.
pub struct Crypto {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        // expiry is checked by verify_at against an explicit clock
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn issue(&self, user: ID<Member>) -> Result<String, ConfigError> {
        self.issue_at(user, now())
    }
    pub fn issue_at(&self, user: ID<Member>, now: i64) -> Result<String, ConfigError> {
        self.encode(&Claims::new(user, now))
    }
    /// Signs `claims`. Fails only when the key itself is unusable.
    pub fn encode(&self, claims: &Claims) -> Result<String, ConfigError> {
        jsonwebtoken::encode(&Header::new(ALGORITHM), claims, &self.encoding).map_err(|e| {
            log::error!("token signing failed: {}", e);
            ConfigError::Signing
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, now())
    }
    /// Shape, then signature under [`ALGORITHM`], then expiry.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        match claims.expired(now) {
            true => Err(TokenError::Expired),
            false => Ok(claims),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsvp_core::TOKEN_VALIDITY;

    const T: i64 = 1_700_000_000;

    fn crypto() -> Crypto {
        Crypto::new(b"per-test-secret").unwrap()
    }

    /// Replace the character at `index` of segment `part` with a different one.
    fn tamper(token: &str, part: usize, index: usize) -> String {
        let mut parts = token.split('.').map(String::from).collect::<Vec<_>>();
        let mut chars = parts[part].chars().collect::<Vec<_>>();
        chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
        parts[part] = chars.into_iter().collect();
        parts.join(".")
    }

    #[test]
    fn empty_secret_is_fatal() {
        assert_eq!(Crypto::new(b"").err(), Some(ConfigError::MissingSecret));
    }

    #[test]
    fn round_trips_subject() {
        let user = ID::<Member>::default();
        let token = crypto().issue(user).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(crypto().verify(&token).unwrap().user(), user);
    }

    #[test]
    fn tokens_differ_across_issuance_times() {
        let user = ID::<Member>::default();
        let a = crypto().issue_at(user, T).unwrap();
        let b = crypto().issue_at(user, T + 1).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn valid_throughout_window() {
        let token = crypto().issue_at(ID::default(), T).unwrap();
        let window = TOKEN_VALIDITY.as_secs() as i64;
        assert!(crypto().verify_at(&token, T).is_ok());
        assert!(crypto().verify_at(&token, T + window / 2).is_ok());
        assert!(crypto().verify_at(&token, T + window - 1).is_ok());
        assert_eq!(crypto().verify_at(&token, T + window).err(), Some(TokenError::Expired));
        assert_eq!(crypto().verify_at(&token, T + window * 2).err(), Some(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_fails_signature() {
        let token = Crypto::new(b"other-secret").unwrap().issue_at(ID::default(), T).unwrap();
        assert_eq!(crypto().verify_at(&token, T).err(), Some(TokenError::InvalidSignature));
    }

    #[test]
    fn malformed_shapes() {
        for token in ["", "abc", "a.b", "a.b.c.d", "a.b.c"] {
            assert_eq!(crypto().verify_at(token, T).err(), Some(TokenError::Malformed));
        }
    }

    #[test]
    fn tampering_fails() {
        let token = crypto().issue_at(ID::default(), T).unwrap();
        for part in 0..3 {
            let len = token.split('.').nth(part).unwrap().len();
            for index in [0, len / 2, len - 2] {
                assert!(crypto().verify_at(&tamper(&token, part, index), T).is_err());
            }
        }
    }

    #[test]
    fn refuses_unsigned_tokens() {
        let token = crypto().issue_at(ID::default(), T).unwrap();
        let payload = token.split('.').nth(1).unwrap();
        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);
        assert!(crypto().verify_at(&forged, T).is_err());
    }

    #[test]
    fn refuses_other_declared_algorithms() {
        let claims = Claims::new(ID::default(), T);
        let key = EncodingKey::from_secret(b"per-test-secret");
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS512), &claims, &key).unwrap();
        assert_eq!(crypto().verify_at(&token, T).err(), Some(TokenError::InvalidSignature));
    }
}
