use crate::domain::{
    analytics::{AdminStats, DesignerStats, JobAnalytics},
    catalog::{
        NewPaperSize, NewPaperType, NewProductType, PaperSize, PaperType, PaperWeight,
        ProductSpecification, ProductType,
    },
    job::{DocketCounter, JobDetails, JobStatus, JobType, NewJob, PaymentStatus, UpdateJob},
    settings::{Branch, NewBranch, SystemSettings, UpdateSystemSettings},
    user::{NewUser, User, UserRole},
};
use crate::repository::errors::RepositoryResult;

pub mod catalog;
pub mod errors;
pub mod job;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod settings;
pub mod user;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Filter, search and pagination parameters for the job list.
#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub branch: Option<String>,
    pub job_type: Option<JobType>,
    /// Restrict to jobs attributed to this sales representative by name.
    pub sales_rep: Option<String>,
    /// Case-insensitive match against customer, docket number and description.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl JobListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    pub fn sales_rep(mut self, sales_rep: impl Into<String>) -> Self {
        self.sales_rep = Some(sales_rep.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait JobReader {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<JobDetails>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobDetails>)>;
    /// Distinct branch names appearing on jobs, sorted.
    fn list_job_branches(&self) -> RepositoryResult<Vec<String>>;
}

pub trait JobWriter {
    /// Creates a job. For LOCAL jobs the docket number is assigned inside the
    /// transaction (counter bump, skipping numbers already taken); FOREIGN
    /// jobs insert the normalized number they carry.
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<JobDetails>;
    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<JobDetails>;
    /// Applies a status change; stamps `printed_by`/`printed_at` when the new
    /// status is PRINTED.
    fn set_job_status(
        &self,
        job_id: i32,
        status: JobStatus,
        printed_by: &str,
    ) -> RepositoryResult<JobDetails>;
    fn set_job_payment(
        &self,
        job_id: i32,
        payment_status: PaymentStatus,
        payment_ref: &str,
    ) -> RepositoryResult<JobDetails>;
    /// Returns the counter for a job type, creating it on first use and
    /// reconciling it upward against the highest docket number already
    /// assigned to a LOCAL job.
    fn docket_counter(&self, job_type: JobType) -> RepositoryResult<DocketCounter>;
}

pub trait AnalyticsReader {
    fn job_analytics(&self) -> RepositoryResult<JobAnalytics>;
    fn designer_stats(&self) -> RepositoryResult<DesignerStats>;
    /// Job counters for the admin dashboard; `pending_users` is filled in by
    /// the caller from the user repository.
    fn admin_job_stats(&self) -> RepositoryResult<AdminStats>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
    fn list_pending_users(&self) -> RepositoryResult<Vec<User>>;
    fn count_pending_users(&self) -> RepositoryResult<i64>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    /// Approves a pending user, assigning the role and the approving
    /// superuser. Fails with NotFound when the user is unknown or already
    /// processed.
    fn approve_user(&self, user_id: i32, role: UserRole, assigned_by: i32)
    -> RepositoryResult<User>;
    /// Removes a pending registration (decline).
    fn delete_pending_user(&self, user_id: i32) -> RepositoryResult<()>;
}

pub trait CatalogReader {
    fn list_product_types(&self) -> RepositoryResult<Vec<ProductType>>;
    fn list_paper_types(&self) -> RepositoryResult<Vec<PaperType>>;
    fn get_paper_type_by_id(&self, id: i32) -> RepositoryResult<Option<PaperType>>;
    fn list_paper_weights(&self) -> RepositoryResult<Vec<PaperWeight>>;
    fn list_paper_sizes(&self) -> RepositoryResult<Vec<PaperSize>>;
    /// Weights linked to a paper type, ordered by gsm.
    fn compatible_weights(&self, paper_type_id: i32) -> RepositoryResult<Vec<PaperWeight>>;
    /// The configured valid paper types/weights/sizes for a product type;
    /// empty lists when nothing is configured.
    fn product_specification(&self, product_type_id: i32)
    -> RepositoryResult<ProductSpecification>;
}

pub trait CatalogWriter {
    fn create_product_type(&self, new: &NewProductType) -> RepositoryResult<ProductType>;
    fn create_paper_type(&self, new: &NewPaperType) -> RepositoryResult<PaperType>;
    fn create_paper_weight(&self, gsm: i32) -> RepositoryResult<PaperWeight>;
    fn create_paper_size(&self, new: &NewPaperSize) -> RepositoryResult<PaperSize>;
    fn link_weight_to_paper_type(
        &self,
        paper_weight_id: i32,
        paper_type_id: i32,
    ) -> RepositoryResult<()>;
    fn link_size_to_weight(&self, paper_size_id: i32, paper_weight_id: i32)
    -> RepositoryResult<()>;
    /// Replaces the valid paper types/weights/sizes configured for a product
    /// type.
    fn replace_product_specification(
        &self,
        product_type_id: i32,
        paper_type_ids: &[i32],
        paper_weight_ids: &[i32],
        paper_size_ids: &[i32],
    ) -> RepositoryResult<()>;
    /// Creates a custom size linked to a weight, reusing an existing size
    /// with the same (possibly rotated) dimensions. Unnamed or default-named
    /// sizes get an auto-numbered "Custom Size N" name. The bool is true when
    /// a new size row was created.
    fn create_custom_paper_size(
        &self,
        new: &NewPaperSize,
        paper_weight_id: i32,
    ) -> RepositoryResult<(PaperSize, bool)>;
}

pub trait SettingsReader {
    /// The settings singleton; the defaults row is created on first access.
    fn get_settings(&self) -> RepositoryResult<SystemSettings>;
    fn list_branches(&self) -> RepositoryResult<Vec<Branch>>;
    fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<Branch>>;
}

pub trait SettingsWriter {
    fn update_settings(&self, updates: &UpdateSystemSettings)
    -> RepositoryResult<SystemSettings>;
    fn create_branch(&self, new: &NewBranch) -> RepositoryResult<Branch>;
    fn update_branch(&self, branch_id: i32, updates: &NewBranch) -> RepositoryResult<Branch>;
    fn delete_branch(&self, branch_id: i32) -> RepositoryResult<()>;
}
