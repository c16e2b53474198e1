use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::user::{User, UserRole};

/// A user as the API presents it; never carries the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub role: Option<UserRole>,
    pub approved: bool,
    pub assigned_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            approved: user.approved,
            assigned_by: user.assigned_by,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A pending registration awaiting superuser action.
#[derive(Serialize)]
pub struct PendingUserResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for PendingUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub user: UserResponse,
}

#[derive(Serialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}
