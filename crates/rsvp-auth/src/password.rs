use super::*;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;

fn salt() -> Result<SaltString, HashError> {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).map_err(HashError::Hash)
}

/// Argon2id password hasher with a tunable work factor.
///
/// Hashing is deliberately slow; call it off the async executor.
#[derive(Clone)]
pub struct Hasher {
    argon: Argon2<'static>,
}

impl Hasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        Params::new(memory_kib, iterations, parallelism, None)
            .map(|params| Self {
                argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            })
            .map_err(HashError::Params)
    }

    /// Salted PHC-format hash of the plaintext.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        self.argon
            .hash_password(password.as_bytes(), &salt()?)
            .map(|h| h.to_string())
            .map_err(HashError::Hash)
    }

    /// Constant-time check against a stored hash.
    /// Unparseable hashes are a mismatch, not an error.
    pub fn verify(&self, password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .ok()
            .as_ref()
            .map(|hash| {
                self.argon
                    .verify_password(password.as_bytes(), hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Hasher {
        Hasher::new(8, 1, 1).unwrap()
    }

    #[test]
    fn verifies_own_hash() {
        let hasher = cheap();
        let hashword = hasher.hash("longenough1").unwrap();
        assert!(hasher.verify("longenough1", &hashword));
        assert!(!hasher.verify("longenough2", &hashword));
    }

    #[test]
    fn salts_every_hash() {
        let hasher = cheap();
        assert_ne!(
            hasher.hash("longenough1").unwrap(),
            hasher.hash("longenough1").unwrap()
        );
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hashword = cheap().hash("longenough1").unwrap();
        assert!(hashword.starts_with("$argon2id$"));
        assert!(!hashword.contains("longenough1"));
    }

    #[test]
    fn garbage_hash_is_a_mismatch() {
        assert!(!cheap().verify("longenough1", "not-a-phc-string"));
        assert!(!cheap().verify("longenough1", ""));
    }

    #[test]
    fn rejects_impossible_params() {
        assert!(matches!(Hasher::new(0, 0, 0), Err(HashError::Params(_))));
    }
}
