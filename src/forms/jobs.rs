use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::job::{JobType, NewJob, UpdateJob};
use crate::domain::rules;
use crate::forms::FormError;
use crate::forms::catalog::CustomSizeForm;

/// Payload for creating a job. Costs arrive as the free-text strings the
/// dashboard inputs produce; unparsable or missing values count as zero.
#[derive(Deserialize, Validate)]
pub struct NewJobForm {
    #[validate(length(min = 1))]
    pub branch: String,
    pub job_type: String,
    /// Required for FOREIGN jobs; ignored for LOCAL ones, whose number is
    /// assigned server-side.
    #[serde(default)]
    pub docket_number: String,
    #[validate(length(min = 1))]
    pub sales_rep: String,
    #[validate(length(min = 1))]
    pub order_taken_by: String,
    #[validate(length(min = 1))]
    pub customer: String,
    #[validate(length(min = 1))]
    pub contact_person: String,
    #[validate(length(min = 1))]
    pub mobile_number: String,
    #[validate(email)]
    pub email_address: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(min = 1))]
    pub description: String,
    pub product_type: i32,
    #[serde(default)]
    pub paper_type: Option<i32>,
    #[serde(default)]
    pub paper_weight: Option<i32>,
    #[serde(default)]
    pub paper_size: Option<i32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub print_cost: Option<String>,
    #[serde(default)]
    pub design_cost: Option<String>,
    /// Inline custom paper size; when present it is created (or reused)
    /// first and its id replaces `paper_size`.
    #[serde(default)]
    pub custom_size: Option<CustomSizeForm>,
}

fn parse_cost_field(input: Option<&str>, field: &'static str) -> Result<Decimal, FormError> {
    let value = rules::parse_cost(input);
    if value.is_sign_negative() {
        return Err(FormError::NegativeAmount(field));
    }
    Ok(value)
}

impl TryFrom<&NewJobForm> for NewJob {
    type Error = FormError;

    fn try_from(form: &NewJobForm) -> Result<Self, Self::Error> {
        let job_type: JobType = form.job_type.parse()?;
        let docket_number = match job_type {
            JobType::Local => None,
            JobType::Foreign => Some(rules::format_docket_number(
                job_type,
                &form.docket_number,
                None,
            )?),
        };

        Ok(Self {
            branch: form.branch.trim().to_string(),
            job_type,
            docket_number,
            sales_rep: form.sales_rep.trim().to_string(),
            order_taken_by: form.order_taken_by.trim().to_string(),
            customer: form.customer.trim().to_string(),
            contact_person: form.contact_person.trim().to_string(),
            mobile_number: form.mobile_number.trim().to_string(),
            email_address: form.email_address.trim().to_lowercase(),
            quantity: form.quantity,
            description: form.description.clone(),
            product_type_id: form.product_type,
            paper_type_id: form.paper_type,
            paper_weight_id: form.paper_weight,
            paper_size_id: form.paper_size,
            notes: form.notes.clone(),
            print_cost: parse_cost_field(form.print_cost.as_deref(), "print_cost")?,
            design_cost: parse_cost_field(form.design_cost.as_deref(), "design_cost")?,
        })
    }
}

/// Payload for editing a pre-print job.
#[derive(Deserialize, Validate)]
pub struct UpdateJobForm {
    #[validate(length(min = 1))]
    pub branch: String,
    #[validate(length(min = 1))]
    pub customer: String,
    #[validate(length(min = 1))]
    pub contact_person: String,
    #[validate(length(min = 1))]
    pub mobile_number: String,
    #[validate(email)]
    pub email_address: String,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(min = 1))]
    pub description: String,
    pub product_type: i32,
    #[serde(default)]
    pub paper_type: Option<i32>,
    #[serde(default)]
    pub paper_weight: Option<i32>,
    #[serde(default)]
    pub paper_size: Option<i32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub print_cost: Option<String>,
    #[serde(default)]
    pub design_cost: Option<String>,
}

impl TryFrom<&UpdateJobForm> for UpdateJob {
    type Error = FormError;

    fn try_from(form: &UpdateJobForm) -> Result<Self, Self::Error> {
        Ok(Self {
            branch: form.branch.trim().to_string(),
            customer: form.customer.trim().to_string(),
            contact_person: form.contact_person.trim().to_string(),
            mobile_number: form.mobile_number.trim().to_string(),
            email_address: form.email_address.trim().to_lowercase(),
            quantity: form.quantity,
            description: form.description.clone(),
            product_type_id: form.product_type,
            paper_type_id: form.paper_type,
            paper_weight_id: form.paper_weight,
            paper_size_id: form.paper_size,
            notes: form.notes.clone(),
            print_cost: parse_cost_field(form.print_cost.as_deref(), "print_cost")?,
            design_cost: parse_cost_field(form.design_cost.as_deref(), "design_cost")?,
        })
    }
}

#[derive(Deserialize)]
pub struct StatusUpdateForm {
    pub status: String,
}

#[derive(Deserialize)]
pub struct PaymentUpdateForm {
    pub payment_status: String,
    #[serde(default)]
    pub payment_ref: String,
}

/// Query parameters for the job list.
#[derive(Deserialize, Default)]
pub struct JobListParams {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub branch: Option<String>,
    pub job_type: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Deserialize)]
pub struct DocketCounterParams {
    /// Job type the counter is requested for; defaults to LOCAL.
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}
