//! Mock repositories for testing
//!
//! The mock enforces the same username and email uniqueness the credential
//! store's unique indexes enforce, so duplicate-registration paths behave
//! like they do against Postgres.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tally_db::{CreateUser, DbError, DbResult, UserPatch, UserRepository, UserRow};
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_username: Arc<DashMap<String, Uuid>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_username.insert(user.username.clone(), user.id);
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    /// Remove a user directly, standing in for out-of-band account deletion
    #[allow(dead_code)]
    pub fn remove_user(&self, id: Uuid) {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_username.remove(&user.username);
            self.by_email.remove(&user.email);
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_username.contains_key(&user.username)
            || self.by_email.contains_key(&user.email)
        {
            return Err(DbError::Duplicate);
        }

        let row = UserRow {
            id: user.id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        self.insert_user(row.clone());
        Ok(row)
    }

    async fn update_profile(&self, id: Uuid, patch: UserPatch) -> DbResult<Option<UserRow>> {
        if let Some(ref email) = patch.email {
            if let Some(holder) = self.by_email.get(email) {
                if *holder.value() != id {
                    return Err(DbError::Duplicate);
                }
            }
        }

        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(email) = patch.email {
            self.by_email.remove(&user.email);
            user.email = email.clone();
            self.by_email.insert(email, id);
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }

        Ok(Some(user.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_user_repo_enforces_uniqueness() {
        let repo = MockUserRepository::new();

        repo.create(CreateUser {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

        let dup_username = repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await;
        assert!(matches!(dup_username, Err(DbError::Duplicate)));

        let dup_email = repo
            .create(CreateUser {
                id: Uuid::new_v4(),
                username: "alice2".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await;
        assert!(matches!(dup_email, Err(DbError::Duplicate)));
    }

    #[tokio::test]
    async fn test_mock_user_repo_update_profile() {
        let repo = MockUserRepository::new();
        let id = Uuid::new_v4();

        repo.create(CreateUser {
            id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await
        .unwrap();

        let updated = repo
            .update_profile(
                id,
                UserPatch {
                    email: Some("new@example.com".to_string()),
                    password_hash: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.password_hash, "hash");

        // Old email is free again
        assert!(repo.find_by_email("alice@example.com").await.unwrap().is_none());

        // Unknown users update nothing
        let missing = repo
            .update_profile(Uuid::new_v4(), UserPatch::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
