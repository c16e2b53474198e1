use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Payload for creating an account. Accounts await superuser approval.
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords don't match"))]
    pub confirm_password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshForm {
    pub refresh: String,
}

#[derive(Deserialize, Validate)]
/// Approve-or-decline decision on a pending registration.
pub struct ApproveUserForm {
    pub user_id: i32,
    /// Role to assign when approving.
    #[serde(default)]
    pub role: String,
    /// Either `approve` or `decline`.
    #[validate(length(min = 1))]
    pub action: String,
}
