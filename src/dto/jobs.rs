use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::catalog::{PaperType, PaperWeight, ProductType};
use crate::domain::job::{DocketCounter, JobDetails, JobStatus, JobType, PaymentStatus};
use crate::domain::rules;
use crate::dto::catalog::PaperSizeResponse;

/// Title-case rendering of an open-set branch code ("BORROWDALE" ->
/// "Borrowdale").
fn branch_display(code: &str) -> String {
    code.split(['_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A job as list and detail endpoints return it, with catalog references
/// embedded and display labels precomputed for the dashboard.
#[derive(Serialize)]
pub struct JobResponse {
    pub job_id: i32,
    pub branch: String,
    pub branch_display: String,
    pub job_type: JobType,
    pub job_type_display: &'static str,
    pub docket_number: String,
    pub sales_rep: String,
    pub order_taken_by: String,
    pub customer: String,
    pub contact_person: String,
    pub mobile_number: String,
    pub email_address: String,
    pub quantity: i32,
    pub description: String,
    pub product_type: ProductType,
    pub paper_type: Option<PaperType>,
    pub paper_weight: Option<PaperWeight>,
    pub paper_size: Option<PaperSizeResponse>,
    pub notes: String,
    pub print_cost: Decimal,
    pub design_cost: Decimal,
    pub total_cost: Decimal,
    pub status: JobStatus,
    pub status_display: &'static str,
    pub payment_status: PaymentStatus,
    pub payment_status_display: &'static str,
    pub payment_ref: String,
    pub printed_by: Option<String>,
    pub printed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<JobDetails> for JobResponse {
    fn from(details: JobDetails) -> Self {
        let job = details.job;
        // The displayed total is always recomputed from its inputs.
        let total = rules::display_cost(rules::total_cost(job.print_cost, job.design_cost));
        Self {
            job_id: job.id,
            branch_display: branch_display(&job.branch),
            branch: job.branch,
            job_type: job.job_type,
            job_type_display: job.job_type.label(),
            docket_number: job.docket_number,
            sales_rep: job.sales_rep,
            order_taken_by: job.order_taken_by,
            customer: job.customer,
            contact_person: job.contact_person,
            mobile_number: job.mobile_number,
            email_address: job.email_address,
            quantity: job.quantity,
            description: job.description,
            product_type: details.product_type,
            paper_type: details.paper_type,
            paper_weight: details.paper_weight,
            paper_size: details.paper_size.map(Into::into),
            notes: job.notes,
            print_cost: rules::display_cost(job.print_cost),
            design_cost: rules::display_cost(job.design_cost),
            total_cost: total,
            status: job.status,
            status_display: job.status.label(),
            payment_status: job.payment_status,
            payment_status_display: job.payment_status.label(),
            payment_ref: job.payment_ref,
            printed_by: job.printed_by,
            printed_at: job.printed_at,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// The docket counter plus the next number a LOCAL job would take.
#[derive(Serialize)]
pub struct DocketCounterResponse {
    pub job_type: JobType,
    pub current_number: i32,
    pub next_number: i32,
}

impl From<DocketCounter> for DocketCounterResponse {
    fn from(counter: DocketCounter) -> Self {
        Self {
            job_type: counter.job_type,
            current_number: counter.current_number,
            next_number: counter.current_number + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_display_title_cases_codes() {
        assert_eq!(branch_display("BORROWDALE"), "Borrowdale");
        assert_eq!(branch_display("NEW_TOWN"), "New Town");
        assert_eq!(branch_display(""), "");
    }
}
