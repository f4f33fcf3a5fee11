use chrono::NaiveDate;
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, parse_dob};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

fn validated(input: &impl Validate, dob: &str) -> UserResult<NaiveDate> {
    input
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))?;

    parse_dob(dob).ok_or_else(|| UserError::Validation(format!("invalid dob: {}", dob)))
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and store a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let dob = validated(&input, &input.dob)?;
        self.repository.create(input.name, dob).await
    }

    /// Get a user by id
    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// All users, ascending by id
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Validate and replace a user's name and date of birth
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        let dob = validated(&input, &input.dob)?;
        self.repository.update(id, input.name, dob).await
    }

    /// Delete a user. Deleting an id that does not exist succeeds.
    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            tracing::debug!(user_id = id, "Delete matched no user");
        }

        Ok(())
    }
}
