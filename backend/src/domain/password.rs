//! Password hashing and verification with Argon2id.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) so the
//! cost parameters travel with each stored value and can be raised later
//! without invalidating existing accounts.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use tracing::warn;
use zeroize::Zeroizing;

use super::{Error, PasswordDigest, TraceId};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCost {
    /// Memory size in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Errors raised when configuring the verifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordCostError {
    /// Argon2 rejected the parameter combination.
    #[error("invalid password hashing cost: {0}")]
    Invalid(argon2::Error),
}

/// One-way salted hashing with constant-time verification.
///
/// Both operations run on the blocking pool; Argon2 is deliberately slow and
/// would otherwise stall the request worker.
#[derive(Debug, Clone)]
pub struct PasswordVerifier {
    params: Params,
}

impl PasswordVerifier {
    /// Build a verifier for the given cost.
    pub fn new(cost: PasswordCost) -> Result<Self, PasswordCostError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(PasswordCostError::Invalid)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `plaintext` with a fresh random salt.
    pub async fn hash(&self, plaintext: &str) -> Result<PasswordDigest, Error> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let verifier = self.clone();
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            TraceId::sync_scope(trace_id, || verifier.hash_blocking(&plaintext))
        })
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
    }

    /// Check `plaintext` against a stored digest.
    ///
    /// A digest that cannot be parsed is treated as a mismatch and logged.
    pub async fn verify(&self, plaintext: &str, digest: &PasswordDigest) -> Result<bool, Error> {
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let digest = digest.clone();
        let verifier = self.clone();
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            TraceId::sync_scope(trace_id, || verifier.verify_blocking(&plaintext, &digest))
        })
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }

    fn hash_blocking(&self, plaintext: &str) -> Result<PasswordDigest, Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| Error::internal(format!("failed to hash password: {err}")))?;
        PasswordDigest::new(hash.to_string())
            .map_err(|err| Error::internal(format!("argon2 produced an invalid digest: {err}")))
    }

    fn verify_blocking(&self, plaintext: &str, digest: &PasswordDigest) -> bool {
        let parsed = match PasswordHash::new(digest.as_str()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "stored password digest is malformed");
                return false;
            }
        };
        self.argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
