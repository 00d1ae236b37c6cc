use serde::Deserialize;

/// Request payload for registering a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

/// Query parameters identifying a single user
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}
