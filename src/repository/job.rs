use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::db::DbPool;
use crate::domain::analytics::{
    AdminStats, BranchPerformance, DailyProfit, DesignerStats, FinancialStats, JobAnalytics,
    MonthlyBranchProfit, ProductPerformance, UserPerformance,
};
use crate::domain::job::{
    DocketCounter, JobDetails, JobStatus, JobType, NewJob, PaymentStatus, UpdateJob,
};
use crate::domain::rules::LOCAL_DOCKET_PREFIX;
use crate::models::parse_decimal;
use crate::repository::{
    AnalyticsReader, JobListQuery, JobReader, JobWriter,
    errors::{RepositoryError, RepositoryResult},
};

/// Diesel implementation of [`JobReader`], [`JobWriter`] and
/// [`AnalyticsReader`].
pub struct DieselJobRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselJobRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

/// Applies the list filters to a boxed jobs query (items and count queries
/// have different join shapes, hence the macro).
macro_rules! apply_job_filters {
    ($query:expr, $params:expr) => {{
        use crate::schema::jobs;

        let params: &JobListQuery = $params;
        let mut query = $query;
        if let Some(status) = params.status {
            query = query.filter(jobs::status.eq(status.as_str()));
        }
        if let Some(payment_status) = params.payment_status {
            query = query.filter(jobs::payment_status.eq(payment_status.as_str()));
        }
        if let Some(branch) = &params.branch {
            query = query.filter(jobs::branch.eq(branch.clone()));
        }
        if let Some(job_type) = params.job_type {
            query = query.filter(jobs::job_type.eq(job_type.as_str()));
        }
        if let Some(sales_rep) = &params.sales_rep {
            query = query.filter(jobs::sales_rep.eq(sales_rep.clone()));
        }
        if let Some(search) = &params.search {
            let pattern = format!("%{search}%");
            query = query.filter(
                jobs::customer
                    .like(pattern.clone())
                    .or(jobs::docket_number.like(pattern.clone()))
                    .or(jobs::description.like(pattern)),
            );
        }
        query
    }};
}

type DetailsRow = (
    crate::models::job::Job,
    crate::models::catalog::ProductType,
    Option<crate::models::catalog::PaperType>,
    Option<crate::models::catalog::PaperWeight>,
    Option<crate::models::catalog::PaperSize>,
);

fn into_details(row: DetailsRow) -> RepositoryResult<JobDetails> {
    let (job, product_type, paper_type, paper_weight, paper_size) = row;
    Ok(JobDetails {
        job: job.try_into()?,
        product_type: product_type.into(),
        paper_type: paper_type.map(Into::into),
        paper_weight: paper_weight.map(Into::into),
        paper_size: paper_size
            .map(crate::domain::catalog::PaperSize::try_from)
            .transpose()?,
    })
}

/// Fetches the catalog references for a freshly written job row.
fn load_details(
    conn: &mut SqliteConnection,
    row: crate::models::job::Job,
) -> RepositoryResult<JobDetails> {
    use crate::models::catalog::{PaperSize, PaperType, PaperWeight, ProductType};
    use crate::schema::{paper_sizes, paper_types, paper_weights, product_types};

    let product_type = product_types::table
        .find(row.product_type_id)
        .first::<ProductType>(conn)?;
    let paper_type = match row.paper_type_id {
        Some(id) => paper_types::table
            .find(id)
            .first::<PaperType>(conn)
            .optional()?,
        None => None,
    };
    let paper_weight = match row.paper_weight_id {
        Some(id) => paper_weights::table
            .find(id)
            .first::<PaperWeight>(conn)
            .optional()?,
        None => None,
    };
    let paper_size = match row.paper_size_id {
        Some(id) => paper_sizes::table
            .find(id)
            .first::<PaperSize>(conn)
            .optional()?,
        None => None,
    };

    into_details((row, product_type, paper_type, paper_weight, paper_size))
}

/// Returns the stored counter row for a job type, creating it at zero on
/// first use.
fn get_or_create_counter(
    conn: &mut SqliteConnection,
    job_type: JobType,
) -> RepositoryResult<crate::models::job::DocketCounter> {
    use crate::models::job::{DocketCounter as DbDocketCounter, NewDocketCounter};
    use crate::schema::docket_counters;

    if let Some(counter) = docket_counters::table
        .filter(docket_counters::job_type.eq(job_type.as_str()))
        .first::<DbDocketCounter>(conn)
        .optional()?
    {
        return Ok(counter);
    }

    let inserted = diesel::insert_into(docket_counters::table)
        .values(&NewDocketCounter {
            job_type: job_type.as_str(),
            current_number: 0,
        })
        .get_result::<DbDocketCounter>(conn)?;
    Ok(inserted)
}

/// Highest `LOC-<n>` suffix already assigned to a LOCAL job.
fn highest_local_docket(conn: &mut SqliteConnection) -> RepositoryResult<i32> {
    use crate::schema::jobs;

    let numbers: Vec<String> = jobs::table
        .filter(jobs::job_type.eq(JobType::Local.as_str()))
        .filter(jobs::docket_number.like(format!("{LOCAL_DOCKET_PREFIX}%")))
        .select(jobs::docket_number)
        .load(conn)?;

    Ok(numbers
        .iter()
        .filter_map(|docket| docket.strip_prefix(LOCAL_DOCKET_PREFIX)?.parse::<i32>().ok())
        .max()
        .unwrap_or(0))
}

/// Assigns the next free LOCAL docket number and advances the counter.
/// Runs inside the create transaction, so the number it hands out is the
/// authoritative one regardless of what any client previewed.
fn next_local_docket(conn: &mut SqliteConnection) -> RepositoryResult<String> {
    use crate::schema::{docket_counters, jobs};

    let counter = get_or_create_counter(conn, JobType::Local)?;
    let mut next = counter.current_number + 1;
    loop {
        let candidate = format!("{LOCAL_DOCKET_PREFIX}{next}");
        let taken: i64 = jobs::table
            .filter(jobs::docket_number.eq(&candidate))
            .count()
            .get_result(conn)?;
        if taken == 0 {
            break;
        }
        next += 1;
    }

    diesel::update(
        docket_counters::table.filter(docket_counters::job_type.eq(JobType::Local.as_str())),
    )
    .set((
        docket_counters::current_number.eq(next),
        docket_counters::updated_at.eq(Utc::now().naive_utc()),
    ))
    .execute(conn)?;

    Ok(format!("{LOCAL_DOCKET_PREFIX}{next}"))
}

impl JobReader for DieselJobRepository<'_> {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<JobDetails>> {
        use crate::models::job::Job as DbJob;
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let row = jobs::table.find(id).first::<DbJob>(&mut conn).optional()?;

        match row {
            Some(row) => Ok(Some(load_details(&mut conn, row)?)),
            None => Ok(None),
        }
    }

    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<JobDetails>)> {
        use crate::models::catalog::{PaperSize, PaperType, PaperWeight, ProductType};
        use crate::models::job::Job as DbJob;
        use crate::schema::{jobs, paper_sizes, paper_types, paper_weights, product_types};

        let mut conn = self.pool.get()?;

        let total: i64 = apply_job_filters!(
            jobs::table
                .select(diesel::dsl::count_star())
                .into_boxed(),
            &query
        )
        .get_result(&mut conn)?;

        let mut items_query = apply_job_filters!(
            jobs::table
                .inner_join(product_types::table)
                .left_join(paper_types::table)
                .left_join(paper_weights::table)
                .left_join(paper_sizes::table)
                .select((
                    DbJob::as_select(),
                    ProductType::as_select(),
                    Option::<PaperType>::as_select(),
                    Option::<PaperWeight>::as_select(),
                    Option::<PaperSize>::as_select(),
                ))
                .order(jobs::created_at.desc())
                .into_boxed(),
            &query
        );

        if let Some(pagination) = &query.pagination {
            let per_page = pagination.per_page.max(1) as i64;
            let page = pagination.page.max(1) as i64;
            items_query = items_query.limit(per_page).offset((page - 1) * per_page);
        }

        let rows: Vec<DetailsRow> = items_query.load(&mut conn)?;
        let items = rows
            .into_iter()
            .map(into_details)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, items))
    }

    fn list_job_branches(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let branches = jobs::table
            .select(jobs::branch)
            .distinct()
            .order(jobs::branch.asc())
            .load::<String>(&mut conn)?;
        Ok(branches)
    }
}

impl JobWriter for DieselJobRepository<'_> {
    fn create_job(&self, new_job: &NewJob) -> RepositoryResult<JobDetails> {
        use crate::models::job::{Job as DbJob, NewJob as DbNewJob};
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let row = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let docket_number = match new_job.job_type {
                JobType::Local => next_local_docket(conn)?,
                JobType::Foreign => new_job.docket_number.clone().ok_or_else(|| {
                    RepositoryError::ValidationError(
                        "foreign job is missing its docket number".to_string(),
                    )
                })?,
            };

            let insertable = DbNewJob::from_domain(new_job, docket_number);
            let row = diesel::insert_into(jobs::table)
                .values(&insertable)
                .get_result::<DbJob>(conn)?;
            Ok(row)
        })?;

        load_details(&mut conn, row)
    }

    fn update_job(&self, job_id: i32, updates: &UpdateJob) -> RepositoryResult<JobDetails> {
        use crate::models::job::{Job as DbJob, UpdateJob as DbUpdateJob};
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let changeset = DbUpdateJob::from_domain(updates, Utc::now().naive_utc());

        let row = diesel::update(jobs::table.find(job_id))
            .set(&changeset)
            .get_result::<DbJob>(&mut conn)?;

        load_details(&mut conn, row)
    }

    fn set_job_status(
        &self,
        job_id: i32,
        status: JobStatus,
        printed_by: &str,
    ) -> RepositoryResult<JobDetails> {
        use crate::models::job::Job as DbJob;
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let now = Utc::now().naive_utc();

        let row = if status == JobStatus::Printed {
            diesel::update(jobs::table.find(job_id))
                .set((
                    jobs::status.eq(status.as_str()),
                    jobs::printed_by.eq(printed_by),
                    jobs::printed_at.eq(now),
                    jobs::updated_at.eq(now),
                ))
                .get_result::<DbJob>(&mut conn)?
        } else {
            diesel::update(jobs::table.find(job_id))
                .set((jobs::status.eq(status.as_str()), jobs::updated_at.eq(now)))
                .get_result::<DbJob>(&mut conn)?
        };

        load_details(&mut conn, row)
    }

    fn set_job_payment(
        &self,
        job_id: i32,
        payment_status: PaymentStatus,
        payment_ref: &str,
    ) -> RepositoryResult<JobDetails> {
        use crate::models::job::Job as DbJob;
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let row = diesel::update(jobs::table.find(job_id))
            .set((
                jobs::payment_status.eq(payment_status.as_str()),
                jobs::payment_ref.eq(payment_ref),
                jobs::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbJob>(&mut conn)?;

        load_details(&mut conn, row)
    }

    fn docket_counter(&self, job_type: JobType) -> RepositoryResult<DocketCounter> {
        use crate::schema::docket_counters;

        let mut conn = self.pool.get()?;
        let counter = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let mut counter = get_or_create_counter(conn, job_type)?;

            // The stored counter can lag behind dockets created while it was
            // missing (e.g. seeded jobs); report the reconciled value.
            if job_type == JobType::Local {
                let highest = highest_local_docket(conn)?;
                if highest > counter.current_number {
                    diesel::update(
                        docket_counters::table
                            .filter(docket_counters::job_type.eq(job_type.as_str())),
                    )
                    .set((
                        docket_counters::current_number.eq(highest),
                        docket_counters::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                    counter.current_number = highest;
                }
            }

            Ok(counter)
        })?;

        Ok(counter.try_into()?)
    }
}

/// Row projection analytics aggregations fold over.
struct AnalyticsRow {
    branch: String,
    order_taken_by: String,
    product_type: String,
    status: JobStatus,
    payment_status: PaymentStatus,
    total_cost: Decimal,
    created_at: NaiveDateTime,
}

fn load_analytics_rows(conn: &mut SqliteConnection) -> RepositoryResult<Vec<AnalyticsRow>> {
    use crate::schema::{jobs, product_types};

    let rows: Vec<(String, String, String, String, String, String, NaiveDateTime)> = jobs::table
        .inner_join(product_types::table)
        .select((
            jobs::branch,
            jobs::order_taken_by,
            product_types::name,
            jobs::status,
            jobs::payment_status,
            jobs::total_cost,
            jobs::created_at,
        ))
        .load(conn)?;

    rows.into_iter()
        .map(
            |(branch, order_taken_by, product_type, status, payment_status, total, created_at)| {
                Ok(AnalyticsRow {
                    branch,
                    order_taken_by,
                    product_type,
                    status: status.parse()?,
                    payment_status: payment_status.parse()?,
                    total_cost: parse_decimal(&total),
                    created_at,
                })
            },
        )
        .collect()
}

impl AnalyticsReader for DieselJobRepository<'_> {
    fn job_analytics(&self) -> RepositoryResult<JobAnalytics> {
        let mut conn = self.pool.get()?;
        let rows = load_analytics_rows(&mut conn)?;

        let window_start = Utc::now().date_naive() - Duration::days(30);

        let mut users: BTreeMap<String, UserPerformance> = BTreeMap::new();
        let mut branches: BTreeMap<String, BranchPerformance> = BTreeMap::new();
        let mut products: BTreeMap<String, ProductPerformance> = BTreeMap::new();
        let mut financial = FinancialStats::default();
        let mut daily: BTreeMap<chrono::NaiveDate, Decimal> = BTreeMap::new();
        let mut monthly: BTreeMap<(u32, String), Decimal> = BTreeMap::new();

        for row in &rows {
            let paid = row.payment_status.is_marked();

            let user = users
                .entry(row.order_taken_by.clone())
                .or_insert_with(|| UserPerformance {
                    order_taken_by: row.order_taken_by.clone(),
                    jobs_created: 0,
                    jobs_printed: 0,
                    jobs_paid: 0,
                });
            user.jobs_created += 1;
            if row.status == JobStatus::Printed {
                user.jobs_printed += 1;
            }
            if paid {
                user.jobs_paid += 1;
            }

            let branch = branches
                .entry(row.branch.clone())
                .or_insert_with(|| BranchPerformance {
                    branch: row.branch.clone(),
                    job_count: 0,
                    total_profit: Decimal::ZERO,
                });
            branch.job_count += 1;
            if paid {
                branch.total_profit += row.total_cost;
            }

            let product = products
                .entry(row.product_type.clone())
                .or_insert_with(|| ProductPerformance {
                    product_type: row.product_type.clone(),
                    job_count: 0,
                    total_revenue: Decimal::ZERO,
                });
            product.job_count += 1;
            if paid {
                product.total_revenue += row.total_cost;
            }

            match row.payment_status {
                PaymentStatus::Receipted => financial.total_receipted += 1,
                PaymentStatus::Invoiced => financial.total_invoiced += 1,
                PaymentStatus::NotMarked => financial.total_unpaid += 1,
            }

            if paid {
                let day = row.created_at.date();
                if day >= window_start {
                    *daily.entry(day).or_insert(Decimal::ZERO) += row.total_cost;
                }
                *monthly
                    .entry((row.created_at.month(), row.branch.clone()))
                    .or_insert(Decimal::ZERO) += row.total_cost;
            }
        }

        let mut user_performance: Vec<UserPerformance> = users.into_values().collect();
        user_performance.sort_by(|a, b| b.jobs_created.cmp(&a.jobs_created));
        user_performance.truncate(10);

        let mut branch_performance: Vec<BranchPerformance> = branches.into_values().collect();
        branch_performance.sort_by(|a, b| b.job_count.cmp(&a.job_count));

        let mut product_performance: Vec<ProductPerformance> = products.into_values().collect();
        product_performance.sort_by(|a, b| b.job_count.cmp(&a.job_count));
        product_performance.truncate(10);

        Ok(JobAnalytics {
            user_performance,
            branch_performance,
            product_performance,
            financial_stats: financial,
            daily_profits: daily
                .into_iter()
                .map(|(created_date, total_profit)| DailyProfit {
                    created_date,
                    total_profit,
                })
                .collect(),
            monthly_branch_profits: monthly
                .into_iter()
                .map(|((month, branch), total_profit)| MonthlyBranchProfit {
                    month,
                    branch,
                    total_profit,
                })
                .collect(),
        })
    }

    fn designer_stats(&self) -> RepositoryResult<DesignerStats> {
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let start_of_today = Utc::now().date_naive().and_time(NaiveTime::MIN);

        let jobs_today: i64 = jobs::table
            .filter(jobs::created_at.ge(start_of_today))
            .count()
            .get_result(&mut conn)?;
        let pending_jobs: i64 = jobs::table
            .filter(jobs::status.eq(JobStatus::Pending.as_str()))
            .count()
            .get_result(&mut conn)?;
        let completed_today: i64 = jobs::table
            .filter(jobs::status.eq(JobStatus::Printed.as_str()))
            .filter(jobs::updated_at.ge(start_of_today))
            .count()
            .get_result(&mut conn)?;

        Ok(DesignerStats {
            jobs_today,
            pending_jobs,
            completed_today,
        })
    }

    fn admin_job_stats(&self) -> RepositoryResult<AdminStats> {
        use crate::schema::jobs;

        let mut conn = self.pool.get()?;
        let pending_jobs: i64 = jobs::table
            .filter(jobs::status.eq(JobStatus::Pending.as_str()))
            .count()
            .get_result(&mut conn)?;
        let total_jobs: i64 = jobs::table.count().get_result(&mut conn)?;
        let unpaid_jobs: i64 = jobs::table
            .filter(jobs::payment_status.eq(PaymentStatus::NotMarked.as_str()))
            .count()
            .get_result(&mut conn)?;

        Ok(AdminStats {
            pending_users: 0,
            pending_jobs,
            total_jobs,
            unpaid_jobs,
        })
    }
}
