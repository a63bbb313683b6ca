use thiserror::Error;

/// Error type for password operations.
///
/// These are infrastructure failures. A non-matching password is not an
/// error; `verify` reports it as `Ok(false)` so callers never confuse a
/// hashing outage with bad credentials.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
