use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id
    async fn create(&self, name: String, dob: NaiveDate) -> UserResult<User>;

    /// Get a user by id; `None` when no row matches
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// All users in ascending id order
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace name and dob; `NotFound` when no row matches
    async fn update(&self, id: i64, name: String, dob: NaiveDate) -> UserResult<User>;

    /// Delete a user; `false` when no row matched
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids are assigned from a counter that never reuses a value, like a
/// `BIGSERIAL` column.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, name: String, dob: NaiveDate) -> UserResult<User> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let user = User {
            id: store.last_id,
            name,
            dob,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn update(&self, id: i64, name: String, dob: NaiveDate) -> UserResult<User> {
        let mut store = self.store.write().await;
        let user = store.users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.name = name;
        user.dob = dob;

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.users.remove(&id).is_some();

        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }
}
