use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::UserModel;
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError>;
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated users
    pub fn with_users(users: Vec<UserModel>) -> Self {
        let user_map = users
            .into_iter()
            .map(|user| (user.user_id.clone(), user))
            .collect();

        Self {
            users: Mutex::new(user_map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UserModel>>, AppError> {
        self.users
            .lock()
            .map_err(|_| AppError::DatabaseError("User store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.user_id, username = %user.username, "Creating user in memory");

        let mut users = self.lock()?;
        if users.contains_key(&user.user_id) {
            warn!(user_id = %user.user_id, "User already exists in memory");
            return Err(AppError::Conflict("User already exists".to_string()));
        }
        users.insert(user.user_id.clone(), user.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = %user_id, "Fetching user from memory");

        let users = self.lock()?;
        Ok(users.get(user_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        debug!("Listing all users in memory");

        let users = self.lock()?;
        let mut user_list: Vec<UserModel> = users.values().cloned().collect();
        user_list.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Ok(user_list)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserModel, AppError> {
    Ok(UserModel {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.user_id, username = %user.username, "Creating user in database");

        sqlx::query(
            "INSERT INTO users (user_id, username, email, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&user.user_id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create user in database");
            AppError::from(e)
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        debug!(user_id = %user_id, "Fetching user from database");

        let row = sqlx::query(
            "SELECT user_id, username, email, created_at FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, "Failed to fetch user from database");
            AppError::from(e)
        })?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        debug!("Listing all users from database");

        let rows = sqlx::query(
            "SELECT user_id, username, email, created_at FROM users ORDER BY user_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list users from database");
            AppError::from(e)
        })?;

        rows.iter().map(user_from_row).collect()
    }
}
