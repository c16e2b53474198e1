//! Shop-wide settings and branch administration (superuser only).

use crate::domain::settings::{Branch, SystemSettings};
use crate::domain::user::UserRole;
use crate::forms::settings::{BranchForm, UpdateSettingsForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn get_settings<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<SystemSettings>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.get_settings().map_err(ServiceError::from)
}

pub fn update_settings<R>(
    form: &UpdateSettingsForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<SystemSettings>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;

    // An assigned default branch must exist.
    if let Some(Some(branch_id)) = form.default_branch_id {
        repo.get_branch_by_id(branch_id)?
            .ok_or(ServiceError::NotFound("Branch"))?;
    }

    let updates = form.try_into().map_err(ServiceError::from)?;
    repo.update_settings(&updates).map_err(ServiceError::from)
}

pub fn list_branches<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<Branch>>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.list_branches().map_err(ServiceError::from)
}

pub fn get_branch<R>(
    branch_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Branch>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.get_branch_by_id(branch_id)?
        .ok_or(ServiceError::NotFound("Branch"))
}

pub fn create_branch<R>(
    form: &BranchForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Branch>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.create_branch(&form.into()).map_err(ServiceError::from)
}

pub fn update_branch<R>(
    branch_id: i32,
    form: &BranchForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Branch>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.update_branch(branch_id, &form.into())
        .map_err(ServiceError::from)
}

/// Deletes a branch; the configured default branch is protected.
pub fn delete_branch<R>(
    branch_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;

    let settings = repo.get_settings()?;
    if settings.default_branch_id == Some(branch_id) {
        return Err(ServiceError::Validation(
            "Cannot delete the default branch".to_string(),
        ));
    }

    repo.delete_branch(branch_id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::mock::MockRepository;

    fn superuser() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "admin@example.com".to_string(),
            full_name: "System Administrator".to_string(),
            role: Some(UserRole::Superuser),
        }
    }

    fn designer() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 2,
            email: "designer@example.com".to_string(),
            full_name: "John Designer".to_string(),
            role: Some(UserRole::Designer),
        }
    }

    fn settings_with_default(default_branch_id: Option<i32>) -> SystemSettings {
        SystemSettings {
            company_name: "Paragon Job Management".to_string(),
            default_branch_id,
            auto_approve_users: false,
            email_notifications: true,
            system_maintenance: false,
            maintenance_message: String::new(),
            job_number_prefix: String::new(),
            job_number_suffix: String::new(),
            tax_rate: rust_decimal::Decimal::new(1500, 2),
            currency: "USD".to_string(),
            business_hours: json!({}),
            contact_info: json!({}),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn settings_require_superuser() {
        let mut repo = MockRepository::new();
        repo.expect_get_settings().times(0);

        assert!(matches!(
            get_settings(&designer(), &repo),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn default_branch_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_settings()
            .returning(|| Ok(settings_with_default(Some(5))));
        repo.expect_delete_branch().times(0);

        assert!(matches!(
            delete_branch(5, &superuser(), &repo),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn other_branches_can_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_settings()
            .returning(|| Ok(settings_with_default(Some(5))));
        repo.expect_delete_branch()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        assert!(delete_branch(7, &superuser(), &repo).is_ok());
    }
}
