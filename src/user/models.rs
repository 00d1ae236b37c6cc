use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for the users table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserModel {
    /// Creates a new user with a generated UUID v4 id
    pub fn new(username: String, email: String) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
