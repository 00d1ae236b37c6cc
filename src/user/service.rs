use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::UserModel, repository::UserRepository, types::CreateUserRequest};
use crate::shared::AppError;

/// Service for handling user registration and lookups
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<UserModel, AppError> {
        let username = request.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".to_string()));
        }
        if !is_valid_email(&request.email) {
            return Err(AppError::Validation("Invalid email address".to_string()));
        }

        let user = UserModel::new(username.to_string(), request.email.trim().to_string());
        self.repository.create_user(&user).await?;

        info!(user_id = %user.user_id, username = %user.username, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> Result<UserModel, AppError> {
        self.repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        self.repository.list_users().await
    }
}

/// Accepts `local@domain.tld` shaped addresses without whitespace
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}
