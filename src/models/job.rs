use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::EnumParseError;
use crate::domain::job::{
    DocketCounter as DomainDocketCounter, Job as DomainJob, JobType, NewJob as DomainNewJob,
    UpdateJob as DomainUpdateJob,
};
use crate::domain::rules;
use crate::models::parse_decimal;

/// Diesel model for [`crate::domain::job::Job`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct Job {
    pub id: i32,
    pub branch: String,
    pub job_type: String,
    pub docket_number: String,
    pub sales_rep: String,
    pub order_taken_by: String,
    pub customer: String,
    pub contact_person: String,
    pub mobile_number: String,
    pub email_address: String,
    pub quantity: i32,
    pub description: String,
    pub product_type_id: i32,
    pub paper_type_id: Option<i32>,
    pub paper_weight_id: Option<i32>,
    pub paper_size_id: Option<i32>,
    pub notes: String,
    pub print_cost: String,
    pub design_cost: String,
    pub total_cost: String,
    pub status: String,
    pub payment_status: String,
    pub payment_ref: String,
    pub printed_by: Option<String>,
    pub printed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Job`]. The docket number and total are computed by
/// the repository before this struct is built.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::jobs)]
pub struct NewJob {
    pub branch: String,
    pub job_type: String,
    pub docket_number: String,
    pub sales_rep: String,
    pub order_taken_by: String,
    pub customer: String,
    pub contact_person: String,
    pub mobile_number: String,
    pub email_address: String,
    pub quantity: i32,
    pub description: String,
    pub product_type_id: i32,
    pub paper_type_id: Option<i32>,
    pub paper_weight_id: Option<i32>,
    pub paper_size_id: Option<i32>,
    pub notes: String,
    pub print_cost: String,
    pub design_cost: String,
    pub total_cost: String,
}

impl NewJob {
    /// Builds the insertable row from the domain request plus the docket
    /// number assigned inside the create transaction. The total is always
    /// recomputed here, never taken from input.
    pub fn from_domain(new_job: &DomainNewJob, docket_number: String) -> Self {
        let total = rules::total_cost(new_job.print_cost, new_job.design_cost);
        Self {
            branch: new_job.branch.clone(),
            job_type: new_job.job_type.as_str().to_string(),
            docket_number,
            sales_rep: new_job.sales_rep.clone(),
            order_taken_by: new_job.order_taken_by.clone(),
            customer: new_job.customer.clone(),
            contact_person: new_job.contact_person.clone(),
            mobile_number: new_job.mobile_number.clone(),
            email_address: new_job.email_address.clone(),
            quantity: new_job.quantity,
            description: new_job.description.clone(),
            product_type_id: new_job.product_type_id,
            paper_type_id: new_job.paper_type_id,
            paper_weight_id: new_job.paper_weight_id,
            paper_size_id: new_job.paper_size_id,
            notes: new_job.notes.clone(),
            print_cost: new_job.print_cost.to_string(),
            design_cost: new_job.design_cost.to_string(),
            total_cost: total.to_string(),
        }
    }
}

/// Data used when editing a pre-print [`Job`].
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::jobs)]
pub struct UpdateJob {
    pub branch: String,
    pub customer: String,
    pub contact_person: String,
    pub mobile_number: String,
    pub email_address: String,
    pub quantity: i32,
    pub description: String,
    pub product_type_id: i32,
    pub paper_type_id: Option<i32>,
    pub paper_weight_id: Option<i32>,
    pub paper_size_id: Option<i32>,
    pub notes: String,
    pub print_cost: String,
    pub design_cost: String,
    pub total_cost: String,
    pub updated_at: NaiveDateTime,
}

impl UpdateJob {
    pub fn from_domain(updates: &DomainUpdateJob, updated_at: NaiveDateTime) -> Self {
        let total = rules::total_cost(updates.print_cost, updates.design_cost);
        Self {
            branch: updates.branch.clone(),
            customer: updates.customer.clone(),
            contact_person: updates.contact_person.clone(),
            mobile_number: updates.mobile_number.clone(),
            email_address: updates.email_address.clone(),
            quantity: updates.quantity,
            description: updates.description.clone(),
            product_type_id: updates.product_type_id,
            paper_type_id: updates.paper_type_id,
            paper_weight_id: updates.paper_weight_id,
            paper_size_id: updates.paper_size_id,
            notes: updates.notes.clone(),
            print_cost: updates.print_cost.to_string(),
            design_cost: updates.design_cost.to_string(),
            total_cost: total.to_string(),
            updated_at,
        }
    }
}

impl TryFrom<Job> for DomainJob {
    type Error = EnumParseError;

    fn try_from(job: Job) -> Result<Self, Self::Error> {
        Ok(Self {
            id: job.id,
            branch: job.branch,
            job_type: job.job_type.parse()?,
            docket_number: job.docket_number,
            sales_rep: job.sales_rep,
            order_taken_by: job.order_taken_by,
            customer: job.customer,
            contact_person: job.contact_person,
            mobile_number: job.mobile_number,
            email_address: job.email_address,
            quantity: job.quantity,
            description: job.description,
            product_type_id: job.product_type_id,
            paper_type_id: job.paper_type_id,
            paper_weight_id: job.paper_weight_id,
            paper_size_id: job.paper_size_id,
            notes: job.notes,
            print_cost: parse_decimal(&job.print_cost),
            design_cost: parse_decimal(&job.design_cost),
            total_cost: parse_decimal(&job.total_cost),
            status: job.status.parse()?,
            payment_status: job.payment_status.parse()?,
            payment_ref: job.payment_ref,
            printed_by: job.printed_by,
            printed_at: job.printed_at,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}

/// Diesel model for [`crate::domain::job::DocketCounter`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::docket_counters)]
pub struct DocketCounter {
    pub id: i32,
    pub job_type: String,
    pub current_number: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::docket_counters)]
pub struct NewDocketCounter<'a> {
    pub job_type: &'a str,
    pub current_number: i32,
}

impl TryFrom<DocketCounter> for DomainDocketCounter {
    type Error = EnumParseError;

    fn try_from(counter: DocketCounter) -> Result<Self, Self::Error> {
        Ok(Self {
            job_type: counter.job_type.parse::<JobType>()?,
            current_number: counter.current_number,
            updated_at: counter.updated_at,
        })
    }
}
