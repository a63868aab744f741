//! Authentication building blocks for the admin backend
//!
//! Provides the credential and access-token primitives:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded access tokens (HS256)
//! - Signing-secret resolution at process start
//!
//! The service crate wires these into its login flow and request-gating
//! middleware; this crate knows nothing about HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{SigningSecret, TokenService};
//!
//! let service = TokenService::new(&SigningSecret::new("secret_key_at_least_32_bytes_long!"));
//! let issued = service.issue(42).unwrap();
//! let claims = service.verify(&issued.token).unwrap();
//! assert_eq!(claims.sub, 42);
//! ```

pub mod password;
pub mod secret;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SigningSecret;
pub use token::Claims;
pub use token::IssuedToken;
pub use token::TokenError;
pub use token::TokenService;
