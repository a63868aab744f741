use std::env;

/// Symmetric key used to sign and verify access tokens.
///
/// Resolved once at process start and passed by reference into
/// [`TokenService`](crate::TokenService); tokens issued by one instance
/// verify on every other instance built from the same secret. Rotating
/// the secret invalidates every previously issued token.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Environment variable consulted by [`from_env`](Self::from_env).
    pub const ENV_VAR: &'static str = "JWT_SECRET";

    // Compatibility fallback for local runs only. Production deployments
    // must set JWT_SECRET.
    const DEV_FALLBACK: &'static str = "KJH87sd98HDS8df79SDF98sd8F7SDF8sd7FSD8fsd8F7sd8f7";

    /// Create a secret from explicit key material.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Read the secret from the `JWT_SECRET` environment variable.
    ///
    /// Returns `None` when the variable is unset or empty; the caller
    /// decides whether to fall back or abort.
    pub fn from_env() -> Option<Self> {
        env::var(Self::ENV_VAR)
            .ok()
            .filter(|s| !s.is_empty())
            .map(Self::new)
    }

    /// Fixed development fallback, used when the environment variable is
    /// absent so local runs keep working without setup.
    pub fn dev_fallback() -> Self {
        Self::new(Self::DEV_FALLBACK)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.write_str("SigningSecret(..)")
    }
}
