use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

const INSERT_USER: &str = "INSERT INTO users (name, dob) VALUES ($1, $2) RETURNING id, name, dob";
const SELECT_USER: &str = "SELECT id, name, dob FROM users WHERE id = $1";
const SELECT_USERS: &str = "SELECT id, name, dob FROM users ORDER BY id";
const UPDATE_USER: &str =
    "UPDATE users SET name = $2, dob = $3 WHERE id = $1 RETURNING id, name, dob";
const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

/// PostgreSQL implementation of UserRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    name: String,
    dob: NaiveDate,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            dob: row.dob,
        }
    }
}

fn storage(e: DbErr) -> UserError {
    UserError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, name: String, dob: NaiveDate) -> UserResult<User> {
        let stmt =
            Statement::from_sql_and_values(DbBackend::Postgres, INSERT_USER, [name.into(), dob.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage)?
            .ok_or_else(|| UserError::Storage("INSERT returned no row".to_string()))?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, SELECT_USER, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let stmt = Statement::from_string(DbBackend::Postgres, SELECT_USERS);

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, name: String, dob: NaiveDate) -> UserResult<User> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            UPDATE_USER,
            [id.into(), name.into(), dob.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(storage)?
            .ok_or(UserError::NotFound(id))?;

        tracing::info!(user_id = id, "Updated user");
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, DELETE_USER, [id.into()]);

        let result = self.db.execute_raw(stmt).await.map_err(storage)?;
        let deleted = result.rows_affected() > 0;

        if deleted {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(deleted)
    }
}
