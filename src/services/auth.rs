//! Registration, login and token lifecycle.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::user::{NewUser, User};
use crate::dto::auth::{LoginResponse, TokenRefreshResponse, UserResponse};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::{
    ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS, TokenKind, decode_token, issue_token,
};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

const BAD_CREDENTIALS: &str = "Invalid email or password";
const NOT_APPROVED: &str = "Your account is not approved yet";

pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Creates an unapproved, role-less account awaiting superuser review.
pub fn register<R>(form: &RegisterForm, repo: &R) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    let email = form.email.trim().to_lowercase();
    if repo.get_user_by_email(&email)?.is_some() {
        return Err(ServiceError::Validation(
            "A user with this email already exists".to_string(),
        ));
    }

    let new_user = NewUser::new(form.full_name.clone(), email, hash_password(&form.password)?);
    repo.create_user(&new_user)?;
    Ok(())
}

/// Verifies credentials and the approval gate, returning a token pair plus
/// the user payload.
pub fn login<R>(form: &LoginForm, repo: &R, secret: &str) -> ServiceResult<LoginResponse>
where
    R: UserReader + ?Sized,
{
    let user = repo
        .get_user_by_email(&form.email)?
        .ok_or_else(|| ServiceError::Validation(BAD_CREDENTIALS.to_string()))?;

    if !verify_password(&form.password, &user.password_hash) {
        return Err(ServiceError::Validation(BAD_CREDENTIALS.to_string()));
    }
    if !user.approved {
        return Err(ServiceError::Validation(NOT_APPROVED.to_string()));
    }

    let access = sign(&user, TokenKind::Access, ACCESS_TOKEN_TTL_SECS, secret)?;
    let refresh = sign(&user, TokenKind::Refresh, REFRESH_TOKEN_TTL_SECS, secret)?;

    Ok(LoginResponse {
        refresh,
        access,
        user: user.into(),
    })
}

/// Exchanges a valid refresh token for a fresh access token. The user is
/// re-read so a revoked approval cuts refresh off too.
pub fn refresh<R>(token: &str, repo: &R, secret: &str) -> ServiceResult<TokenRefreshResponse>
where
    R: UserReader + ?Sized,
{
    let claims = decode_token(token, secret).map_err(|_| ServiceError::Unauthorized)?;
    if claims.kind != TokenKind::Refresh {
        return Err(ServiceError::Unauthorized);
    }
    let user_id: i32 = claims.sub.parse().map_err(|_| ServiceError::Unauthorized)?;

    let user = repo
        .get_user_by_id(user_id)?
        .filter(|user| user.approved)
        .ok_or(ServiceError::Unauthorized)?;

    let access = sign(&user, TokenKind::Access, ACCESS_TOKEN_TTL_SECS, secret)?;
    Ok(TokenRefreshResponse { access })
}

/// The current user's profile.
pub fn profile<R>(user_id: i32, repo: &R) -> ServiceResult<UserResponse>
where
    R: UserReader + ?Sized,
{
    let user = repo
        .get_user_by_id(user_id)?
        .ok_or(ServiceError::NotFound("user"))?;
    Ok(user.into())
}

fn sign(user: &User, kind: TokenKind, ttl_secs: i64, secret: &str) -> ServiceResult<String> {
    issue_token(user, kind, ttl_secs, secret)
        .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {e}")))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn stored_user(password: &str, approved: bool) -> User {
        let now = chrono::Utc::now().naive_utc();
        User {
            id: 1,
            full_name: "Jane Sales".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: hash_password(password).expect("hashing succeeds"),
            role: Some(crate::domain::user::UserRole::SalesRepresentative),
            approved,
            assigned_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "jane@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_returns_both_tokens() {
        let user = stored_user("password123", true);
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let response = login(&login_form("password123"), &repo, "secret").expect("login succeeds");
        assert!(!response.access.is_empty());
        assert!(!response.refresh.is_empty());
        assert_eq!(response.user.email, "jane@example.com");
    }

    #[test]
    fn login_rejects_wrong_password() {
        let user = stored_user("password123", true);
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = login(&login_form("wrong"), &repo, "secret");
        assert!(matches!(result, Err(ServiceError::Validation(msg)) if msg == BAD_CREDENTIALS));
    }

    #[test]
    fn login_rejects_unapproved_account() {
        let user = stored_user("password123", false);
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = login(&login_form("password123"), &repo, "secret");
        assert!(matches!(result, Err(ServiceError::Validation(msg)) if msg == NOT_APPROVED));
    }

    #[test]
    fn refresh_rejects_access_tokens() {
        let user = stored_user("password123", true);
        let token =
            issue_token(&user, TokenKind::Access, 3600, "secret").expect("token should sign");

        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().times(0);

        let result = refresh(&token, &repo, "secret");
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn refresh_issues_new_access_token() {
        let user = stored_user("password123", true);
        let token =
            issue_token(&user, TokenKind::Refresh, 3600, "secret").expect("token should sign");

        let fetched = user.clone();
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));

        let response = refresh(&token, &repo, "secret").expect("refresh succeeds");
        let claims = decode_token(&response.access, "secret").expect("access token decodes");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let user = stored_user("password123", true);
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_create_user().times(0);

        let form = RegisterForm {
            full_name: "Jane Sales".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
        };
        assert!(matches!(
            register(&form, &repo),
            Err(ServiceError::Validation(_))
        ));
    }
}
