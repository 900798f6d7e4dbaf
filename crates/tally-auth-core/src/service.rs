//! Auth service - registration, login, and bearer-token resolution

use std::sync::Arc;

use tally_db::{CreateUser, DbError, UserPatch, UserRepository, UserRow};
use tally_types::UserId;

use crate::{AuthConfig, AuthError, TokenSigner, password};

const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 255;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

/// New account input
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Profile changes; fields left `None` keep their stored value
///
/// Username is deliberately absent: it is the token subject and never
/// changes after registration.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Authentication service
///
/// Provides registration, login, and resolution of bearer tokens to the
/// acting user. The resolved user is the only identity downstream code
/// may act on; client-supplied user ids are never trusted.
pub struct AuthService<U: UserRepository> {
    signer: TokenSigner,
    users: Arc<U>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new auth service
    pub fn new(config: &AuthConfig, users: Arc<U>) -> Result<Self, AuthError> {
        Ok(Self {
            signer: TokenSigner::new(config)?,
            users,
        })
    }

    // =========================================================================
    // Registration and Login
    // =========================================================================

    /// Register a new account and issue its first token
    pub async fn register(&self, input: Registration) -> Result<(UserRow, String), AuthError> {
        validate_username(&input.username)?;
        validate_email(&input.email)?;
        validate_password(&input.password)?;

        // Availability pre-checks for a friendly error; the unique indexes
        // remain authoritative if a concurrent registration slips between
        // check and insert.
        if self
            .users
            .find_by_username(&input.username)
            .await?
            .is_some()
            || self.users.find_by_email(&input.email).await?.is_some()
        {
            return Err(AuthError::AlreadyRegistered);
        }

        let user = self
            .users
            .create(CreateUser {
                id: uuid::Uuid::new_v4(),
                username: input.username,
                email: input.email,
                password_hash: password::hash(&input.password)?,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered new user");

        let token = self.signer.issue(&user.username)?;
        Ok((user, token))
    }

    /// Verify credentials and issue a token
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, pw: &str) -> Result<(UserRow, String), AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(pw, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue(&user.username)?;
        Ok((user, token))
    }

    // =========================================================================
    // Token Resolution
    // =========================================================================

    /// Resolve a bearer token to the acting user
    ///
    /// The subject is looked up in the credential store on every call, so
    /// a token stops resolving the moment its user is deleted.
    pub async fn resolve(&self, token: &str) -> Result<UserRow, AuthError> {
        let claims = self.signer.validate(token)?;

        self.users
            .find_by_username(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Apply profile changes for the acting user
    pub async fn update_profile(
        &self,
        acting: UserId,
        changes: ProfileChanges,
    ) -> Result<UserRow, AuthError> {
        let mut patch = UserPatch::default();

        if let Some(email) = changes.email {
            validate_email(&email)?;
            if let Some(existing) = self.users.find_by_email(&email).await? {
                if existing.id != acting.0 {
                    return Err(AuthError::EmailTaken);
                }
            }
            patch.email = Some(email);
        }

        if let Some(pw) = changes.password {
            validate_password(&pw)?;
            patch.password_hash = Some(password::hash(&pw)?);
        }

        self.users
            .update_profile(acting.0, patch)
            .await
            .map_err(|e| match e {
                // Username is immutable, so the only unique index an update
                // can trip is the email one.
                DbError::Duplicate => AuthError::EmailTaken,
                other => AuthError::from(other),
            })?
            .ok_or(AuthError::UnknownSubject)
    }
}

impl<U: UserRepository> std::fmt::Debug for AuthService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("signer", &self.signer)
            .finish()
    }
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    let len = username.chars().count();
    if len == 0 || len > USERNAME_MAX {
        return Err(AuthError::Validation(format!(
            "username must be 1-{USERNAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    let len = email.chars().count();
    if len == 0 || len > EMAIL_MAX || !email.contains('@') {
        return Err(AuthError::Validation(
            "email must be a valid address".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN || len > PASSWORD_MAX {
        return Err(AuthError::Validation(format!(
            "password must be {PASSWORD_MIN}-{PASSWORD_MAX} characters"
        )));
    }
    Ok(())
}
