//! Job workflows: creation with docket assignment, role-scoped listing,
//! edits, status and payment transitions, counters and reporting.

use crate::domain::analytics::{DesignerStats, JobAnalytics};
use crate::domain::job::{JobDetails, JobStatus, JobType, NewJob, UpdateJob};
use crate::domain::rules::{self, JobListScope, RuleError};
use crate::domain::user::UserRole;
use crate::dto::jobs::DocketCounterResponse;
use crate::forms::jobs::{
    DocketCounterParams, JobListParams, NewJobForm, PaymentUpdateForm, StatusUpdateForm,
};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AnalyticsReader, CatalogWriter, JobListQuery, JobReader, JobWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Builds the repository query for a list request: explicit filters first,
/// then the role scope on top (the scope always wins on its own field).
pub fn list_jobs<R>(
    params: &JobListParams,
    user: &AuthenticatedUser,
    per_page: usize,
    repo: &R,
) -> ServiceResult<(usize, Vec<JobDetails>)>
where
    R: JobReader + ?Sized,
{
    let mut query = JobListQuery::new();
    if let Some(status) = params.status.as_deref() {
        query = query.status(status.parse::<JobStatus>()?);
    }
    if let Some(payment_status) = params.payment_status.as_deref() {
        query = query.payment_status(payment_status.parse()?);
    }
    if let Some(branch) = params.branch.as_deref() {
        query = query.branch(branch);
    }
    if let Some(job_type) = params.job_type.as_deref() {
        query = query.job_type(job_type.parse::<JobType>()?);
    }
    if let Some(search) = params.search.as_deref() {
        let search = search.trim();
        if !search.is_empty() {
            query = query.search(search);
        }
    }

    match rules::job_list_scope(&user.actor()) {
        JobListScope::All => {}
        JobListScope::OwnBySalesRep => query = query.sales_rep(&user.full_name),
        JobListScope::AwaitingPayment => {
            query = query.payment_status(crate::domain::job::PaymentStatus::NotMarked);
        }
        JobListScope::PendingOnly => query = query.status(JobStatus::Pending),
    }

    let page = params.page.unwrap_or(1);
    query = query.paginate(page, per_page);

    repo.list_jobs(query).map_err(ServiceError::from)
}

pub fn get_job<R>(job_id: i32, repo: &R) -> ServiceResult<JobDetails>
where
    R: JobReader + ?Sized,
{
    repo.get_job_by_id(job_id)?
        .ok_or(ServiceError::NotFound("Job"))
}

/// Creates a job. Clerks and operators take no orders; an inline custom size
/// is created (or reused) first and wired into the specification.
pub fn create_job<J, C>(
    form: &NewJobForm,
    user: &AuthenticatedUser,
    jobs: &J,
    catalog: &C,
) -> ServiceResult<JobDetails>
where
    J: JobWriter + ?Sized,
    C: CatalogWriter + ?Sized,
{
    if !rules::can_create_jobs(&user.actor()) {
        return Err(ServiceError::Forbidden(
            "You are not allowed to create jobs.".to_string(),
        ));
    }

    let mut new_job: NewJob = form.try_into().map_err(ServiceError::from)?;

    if let Some(custom_size) = &form.custom_size {
        let new_size = custom_size.try_into().map_err(ServiceError::from)?;
        let (size, _) = catalog.create_custom_paper_size(&new_size, custom_size.weight_id)?;
        new_job.paper_size_id = Some(size.id);
    }

    jobs.create_job(&new_job).map_err(ServiceError::from)
}

/// Applies an edit, gated by the edit rule (printed jobs are immutable; the
/// superuser and the order taker may edit).
pub fn update_job<R>(
    job_id: i32,
    updates: &UpdateJob,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<JobDetails>
where
    R: JobReader + JobWriter + ?Sized,
{
    let details = get_job(job_id, repo)?;
    if !rules::can_edit(&details.job, &user.actor()) {
        return Err(RuleError::PermissionDenied.into());
    }
    repo.update_job(job_id, updates).map_err(ServiceError::from)
}

/// Moves a job through the production pipeline. PENDING -> PRINTED is the
/// only legal transition; printing stamps who printed and when.
pub fn update_status<R>(
    job_id: i32,
    form: &StatusUpdateForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<JobDetails>
where
    R: JobReader + JobWriter + ?Sized,
{
    if !rules::can_transition_status(&user.actor()) {
        return Err(RuleError::PermissionDenied.into());
    }

    let details = get_job(job_id, repo)?;
    let next: JobStatus = form
        .status
        .parse()
        .map_err(|_| RuleError::InvalidStatusTransition)?;
    rules::validate_status_transition(details.job.status, next)?;

    repo.set_job_status(job_id, next, &user.full_name)
        .map_err(ServiceError::from)
}

/// Records payment documentation on a job.
pub fn update_payment<R>(
    job_id: i32,
    form: &PaymentUpdateForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<JobDetails>
where
    R: JobReader + JobWriter + ?Sized,
{
    if !rules::can_update_payment(&user.actor()) {
        return Err(RuleError::PermissionDenied.into());
    }

    get_job(job_id, repo)?;
    let payment_status = rules::validate_payment_update(&form.payment_status, &form.payment_ref)?;

    repo.set_job_payment(job_id, payment_status, form.payment_ref.trim())
        .map_err(ServiceError::from)
}

/// The production queue, unscoped (every dashboard shows it).
pub fn pending_jobs<R>(repo: &R) -> ServiceResult<Vec<JobDetails>>
where
    R: JobReader + ?Sized,
{
    let (_, jobs) = repo.list_jobs(JobListQuery::new().status(JobStatus::Pending))?;
    Ok(jobs)
}

pub fn job_branches<R>(repo: &R) -> ServiceResult<Vec<String>>
where
    R: JobReader + ?Sized,
{
    repo.list_job_branches().map_err(ServiceError::from)
}

/// The reconciled docket counter plus the advisory next number. The preview
/// is non-binding: the authoritative number is assigned when the job is
/// created.
pub fn docket_counter<R>(
    params: &DocketCounterParams,
    repo: &R,
) -> ServiceResult<DocketCounterResponse>
where
    R: JobWriter + ?Sized,
{
    let job_type: JobType = params.job_type.as_deref().unwrap_or("LOCAL").parse()?;
    let counter = repo.docket_counter(job_type)?;
    Ok(counter.into())
}

pub fn job_analytics<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<JobAnalytics>
where
    R: AnalyticsReader + ?Sized,
{
    ensure_role(user, UserRole::Superuser)?;
    repo.job_analytics().map_err(ServiceError::from)
}

pub fn designer_stats<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<DesignerStats>
where
    R: AnalyticsReader + ?Sized,
{
    if !matches!(
        user.role,
        Some(UserRole::Designer | UserRole::Superuser)
    ) {
        return Err(ServiceError::Forbidden("Permission denied".to_string()));
    }
    repo.designer_stats().map_err(ServiceError::from)
}
