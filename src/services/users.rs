//! User administration: pending registrations, approval, admin counters.

use crate::domain::analytics::AdminStats;
use crate::domain::user::UserRole;
use crate::dto::auth::{PendingUserResponse, UserResponse};
use crate::forms::auth::ApproveUserForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AnalyticsReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub fn pending_users<R>(
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<PendingUserResponse>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    Ok(repo
        .list_pending_users()?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub fn list_users<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<UserResponse>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    Ok(repo.list_users()?.into_iter().map(Into::into).collect())
}

/// Approves a pending registration (assigning the role and the approving
/// superuser) or declines and removes it.
pub fn approve_user<R>(
    form: &ApproveUserForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<&'static str>
where
    R: UserWriter + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;

    match form.action.as_str() {
        "approve" => {
            let role: UserRole = form.role.parse()?;
            repo.approve_user(form.user_id, role, user.id)?;
            Ok("User approved successfully")
        }
        "decline" => {
            repo.delete_pending_user(form.user_id)?;
            Ok("User declined and removed")
        }
        _ => Err(ServiceError::Validation(
            "action must be approve or decline".to_string(),
        )),
    }
}

pub fn admin_stats<U, A>(user: &AuthenticatedUser, users: &U, jobs: &A) -> ServiceResult<AdminStats>
where
    U: UserReader + ?Sized,
    A: AnalyticsReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;

    let mut stats = jobs.admin_job_stats()?;
    stats.pending_users = users.count_pending_users()?;
    Ok(stats)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
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

    fn clerk() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 2,
            email: "clerk@example.com".to_string(),
            full_name: "Sarah Clerk".to_string(),
            role: Some(UserRole::Clerk),
        }
    }

    #[test]
    fn pending_users_requires_superuser() {
        let mut repo = MockRepository::new();
        repo.expect_list_pending_users().times(0);

        let result = pending_users(&clerk(), &repo);
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[test]
    fn approve_assigns_role_and_approver() {
        let mut repo = MockRepository::new();
        repo.expect_approve_user()
            .withf(|user_id, role, assigned_by| {
                *user_id == 9 && *role == UserRole::Designer && *assigned_by == 1
            })
            .times(1)
            .returning(|_, _, _| {
                let now = chrono::Utc::now().naive_utc();
                Ok(crate::domain::user::User {
                    id: 9,
                    full_name: "New Designer".to_string(),
                    email: "d@example.com".to_string(),
                    password_hash: "hash".to_string(),
                    role: Some(UserRole::Designer),
                    approved: true,
                    assigned_by: Some(1),
                    created_at: now,
                    updated_at: now,
                })
            });

        let form = ApproveUserForm {
            user_id: 9,
            role: "DESIGNER".to_string(),
            action: "approve".to_string(),
        };
        let message = approve_user(&form, &superuser(), &repo).expect("approval succeeds");
        assert_eq!(message, "User approved successfully");
    }

    #[test]
    fn decline_deletes_pending_user() {
        let mut repo = MockRepository::new();
        repo.expect_delete_pending_user()
            .withf(|user_id| *user_id == 9)
            .times(1)
            .returning(|_| Ok(()));

        let form = ApproveUserForm {
            user_id: 9,
            role: String::new(),
            action: "decline".to_string(),
        };
        let message = approve_user(&form, &superuser(), &repo).expect("decline succeeds");
        assert_eq!(message, "User declined and removed");
    }

    #[test]
    fn unknown_action_is_rejected() {
        let repo = MockRepository::new();
        let form = ApproveUserForm {
            user_id: 9,
            role: String::new(),
            action: "promote".to_string(),
        };
        assert!(matches!(
            approve_user(&form, &superuser(), &repo),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn admin_stats_merges_user_and_job_counters() {
        let mut repo = MockRepository::new();
        repo.expect_admin_job_stats().returning(|| {
            Ok(AdminStats {
                pending_users: 0,
                pending_jobs: 3,
                total_jobs: 10,
                unpaid_jobs: 4,
            })
        });
        repo.expect_count_pending_users().returning(|| Ok(2));

        let stats = admin_stats(&superuser(), &repo, &repo).expect("stats load");
        assert_eq!(stats.pending_users, 2);
        assert_eq!(stats.total_jobs, 10);
    }
}
