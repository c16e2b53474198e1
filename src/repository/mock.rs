//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::analytics::{AdminStats, DesignerStats, JobAnalytics};
use crate::domain::catalog::{
    NewPaperSize, NewPaperType, NewProductType, PaperSize, PaperType, PaperWeight,
    ProductSpecification, ProductType,
};
use crate::domain::job::{
    DocketCounter, JobDetails, JobStatus, JobType, NewJob, PaymentStatus, UpdateJob,
};
use crate::domain::settings::{Branch, NewBranch, SystemSettings, UpdateSystemSettings};
use crate::domain::user::{NewUser, User, UserRole};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AnalyticsReader, CatalogReader, CatalogWriter, JobListQuery, JobReader, JobWriter,
    SettingsReader, SettingsWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl JobReader for Repository {
        fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<JobDetails>>;
        fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobDetails>)>;
        fn list_job_branches(&self) -> RepositoryResult<Vec<String>>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewJob) -> RepositoryResult<JobDetails>;
        fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<JobDetails>;
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
        fn docket_counter(&self, job_type: JobType) -> RepositoryResult<DocketCounter>;
    }

    impl AnalyticsReader for Repository {
        fn job_analytics(&self) -> RepositoryResult<JobAnalytics>;
        fn designer_stats(&self) -> RepositoryResult<DesignerStats>;
        fn admin_job_stats(&self) -> RepositoryResult<AdminStats>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
        fn list_users(&self) -> RepositoryResult<Vec<User>>;
        fn list_pending_users(&self) -> RepositoryResult<Vec<User>>;
        fn count_pending_users(&self) -> RepositoryResult<i64>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn approve_user(
            &self,
            user_id: i32,
            role: UserRole,
            assigned_by: i32,
        ) -> RepositoryResult<User>;
        fn delete_pending_user(&self, user_id: i32) -> RepositoryResult<()>;
    }

    impl CatalogReader for Repository {
        fn list_product_types(&self) -> RepositoryResult<Vec<ProductType>>;
        fn list_paper_types(&self) -> RepositoryResult<Vec<PaperType>>;
        fn get_paper_type_by_id(&self, id: i32) -> RepositoryResult<Option<PaperType>>;
        fn list_paper_weights(&self) -> RepositoryResult<Vec<PaperWeight>>;
        fn list_paper_sizes(&self) -> RepositoryResult<Vec<PaperSize>>;
        fn compatible_weights(&self, paper_type_id: i32) -> RepositoryResult<Vec<PaperWeight>>;
        fn product_specification(
            &self,
            product_type_id: i32,
        ) -> RepositoryResult<ProductSpecification>;
    }

    impl CatalogWriter for Repository {
        fn create_product_type(&self, new: &NewProductType) -> RepositoryResult<ProductType>;
        fn create_paper_type(&self, new: &NewPaperType) -> RepositoryResult<PaperType>;
        fn create_paper_weight(&self, gsm: i32) -> RepositoryResult<PaperWeight>;
        fn create_paper_size(&self, new: &NewPaperSize) -> RepositoryResult<PaperSize>;
        fn link_weight_to_paper_type(
            &self,
            paper_weight_id: i32,
            paper_type_id: i32,
        ) -> RepositoryResult<()>;
        fn link_size_to_weight(
            &self,
            paper_size_id: i32,
            paper_weight_id: i32,
        ) -> RepositoryResult<()>;
        fn replace_product_specification(
            &self,
            product_type_id: i32,
            paper_type_ids: &[i32],
            paper_weight_ids: &[i32],
            paper_size_ids: &[i32],
        ) -> RepositoryResult<()>;
        fn create_custom_paper_size(
            &self,
            new: &NewPaperSize,
            paper_weight_id: i32,
        ) -> RepositoryResult<(PaperSize, bool)>;
    }

    impl SettingsReader for Repository {
        fn get_settings(&self) -> RepositoryResult<SystemSettings>;
        fn list_branches(&self) -> RepositoryResult<Vec<Branch>>;
        fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<Branch>>;
    }

    impl SettingsWriter for Repository {
        fn update_settings(
            &self,
            updates: &UpdateSystemSettings,
        ) -> RepositoryResult<SystemSettings>;
        fn create_branch(&self, new: &NewBranch) -> RepositoryResult<Branch>;
        fn update_branch(&self, branch_id: i32, updates: &NewBranch) -> RepositoryResult<Branch>;
        fn delete_branch(&self, branch_id: i32) -> RepositoryResult<()>;
    }
}
