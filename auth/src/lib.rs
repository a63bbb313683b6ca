//! Authentication infrastructure library
//!
//! Provides the credential primitives for the platform services:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation
//! - Access/refresh token issuance with distinct signing secrets
//!
//! Services define their own authorization rules on top of these
//! primitives; nothing in this crate knows about accounts or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"access_secret_at_least_32_bytes!!",
//!     b"refresh_secret_at_least_32_bytes!",
//!     Duration::minutes(15),
//!     Duration::days(7),
//! );
//!
//! let pair = issuer.issue_pair("account123").unwrap();
//! let claims = issuer.verify_access_token(&pair.access_token).unwrap();
//! assert_eq!(claims.sub, "account123");
//!
//! // A refresh token never verifies as an access token.
//! assert!(issuer.verify_access_token(&pair.refresh_token).is_err());
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenIssuer;
pub use tokens::TokenPair;
