//! Password hashing and verification using Argon2id

use crate::error::AppError;
use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Memory cost in KiB (OWASP Argon2id baseline).
pub const ARGON2_MEMORY_KIB: u32 = 19_456;
/// Number of passes over memory.
pub const ARGON2_ITERATIONS: u32 = 2;
/// Degree of parallelism (lanes).
pub const ARGON2_PARALLELISM: u32 = 1;

/// Turns plaintext passwords into salted one-way hashes and checks them later.
///
/// Implementations must be cheap to share across threads: the auth service
/// holds one instance and calls it from the blocking pool.
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt embedded in the output.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Check `password` against an encoded hash.
    ///
    /// Returns `Ok(false)` for a well-formed hash that does not match and
    /// `AppError::MalformedHash` when `hash` cannot be decoded.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`)
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Create hasher with the fixed production cost
    pub fn new() -> Self {
        // constants equal Params::DEFAULT
        let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
            .unwrap_or_default();

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Create hasher with explicit cost parameters
    pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Config(format!("Invalid Argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Hashing(format!("Failed to hash password: {}", e))
            })?
            .to_string();

        Ok(password_hash)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            tracing::debug!("Failed to parse password hash: {:?}", e);
            AppError::MalformedHash
        })?;

        // argon2 reports a missing salt or digest as a password mismatch
        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            tracing::debug!("Stored password hash lacks salt or digest");
            return Err(AppError::MalformedHash);
        }

        // Cost parameters come from the stored hash; the digest comparison is constant-time.
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => {
                tracing::debug!("Stored password hash rejected: {:?}", e);
                Err(AppError::MalformedHash)
            }
        }
    }
}
