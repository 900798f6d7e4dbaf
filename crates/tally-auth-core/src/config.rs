//! Configuration types for the auth service

use std::time::Duration;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret for token signing
    pub jwt_secret: String,
    /// How long issued tokens stay valid
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create a new auth config with the default 24 hour token lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(24 * 60 * 60), // 24 hours
        }
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .finish_non_exhaustive()
    }
}
