use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::EnumParseError;
use crate::domain::catalog::{PaperSize, PaperType, PaperWeight, ProductType};

/// Whether a job originates locally or abroad. Determines how the docket
/// number is assigned: LOCAL numbers come from the counter, FOREIGN numbers
/// are supplied by the order taker with a mandatory `FOR-` prefix.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    Local,
    Foreign,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Local => "LOCAL",
            JobType::Foreign => "FOREIGN",
        }
    }

    /// Human-facing label used by list and detail payloads.
    pub fn label(self) -> &'static str {
        match self {
            JobType::Local => "Local",
            JobType::Foreign => "Foreign",
        }
    }
}

impl Display for JobType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCAL" => Ok(JobType::Local),
            "FOREIGN" => Ok(JobType::Foreign),
            other => Err(EnumParseError::new("job type", other)),
        }
    }
}

/// Production state of a job. PRINTED is terminal: a printed job only ever
/// changes through its payment fields.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Printed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Printed => "PRINTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Printed => "Printed",
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(JobStatus::Pending),
            "PRINTED" => Ok(JobStatus::Printed),
            other => Err(EnumParseError::new("job status", other)),
        }
    }
}

/// How payment was documented. RECEIPTED and INVOICED record the paperwork,
/// not necessarily that cash was received.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NotMarked,
    Receipted,
    Invoiced,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::NotMarked => "NOT_MARKED",
            PaymentStatus::Receipted => "RECEIPTED",
            PaymentStatus::Invoiced => "INVOICED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::NotMarked => "Not Marked",
            PaymentStatus::Receipted => "Receipted",
            PaymentStatus::Invoiced => "Invoiced",
        }
    }

    /// Whether the payment has been documented one way or the other.
    pub fn is_marked(self) -> bool {
        !matches!(self, PaymentStatus::NotMarked)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_MARKED" => Ok(PaymentStatus::NotMarked),
            "RECEIPTED" => Ok(PaymentStatus::Receipted),
            "INVOICED" => Ok(PaymentStatus::Invoiced),
            other => Err(EnumParseError::new("payment status", other)),
        }
    }
}

/// A print job. Costs are decimals end to end; `total_cost` is always the sum
/// of `print_cost` and `design_cost` and is recomputed on every write and on
/// display, never trusted from input.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i32,
    pub branch: String,
    pub job_type: JobType,
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
    pub print_cost: Decimal,
    pub design_cost: Decimal,
    pub total_cost: Decimal,
    pub status: JobStatus,
    pub payment_status: PaymentStatus,
    pub payment_ref: String,
    pub printed_by: Option<String>,
    pub printed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for a job-creation request. `docket_number` is `Some` only for
/// FOREIGN jobs (already normalized to the `FOR-` prefix); LOCAL jobs have it
/// assigned inside the create transaction.
#[derive(Clone, Debug)]
pub struct NewJob {
    pub branch: String,
    pub job_type: JobType,
    pub docket_number: Option<String>,
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
    pub print_cost: Decimal,
    pub design_cost: Decimal,
}

/// Editable fields of a pre-print job. Identity, attribution, status and
/// payment fields are deliberately absent.
#[derive(Clone, Debug)]
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
    pub print_cost: Decimal,
    pub design_cost: Decimal,
}

/// Per-job-type counter backing LOCAL docket-number assignment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DocketCounter {
    pub job_type: JobType,
    pub current_number: i32,
    pub updated_at: NaiveDateTime,
}

/// A job joined with its catalog references, as list and detail endpoints
/// return it.
#[derive(Clone, Debug, PartialEq)]
pub struct JobDetails {
    pub job: Job,
    pub product_type: ProductType,
    pub paper_type: Option<PaperType>,
    pub paper_weight: Option<PaperWeight>,
    pub paper_size: Option<PaperSize>,
}
