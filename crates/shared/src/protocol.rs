use serde::{Deserialize, Serialize};

use crate::domain::UserRecord;

pub const USERS_PATH: &str = "/users";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveUserRequest {
    pub email: String,
}
