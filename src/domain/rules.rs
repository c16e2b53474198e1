//! The job rules engine.
//!
//! Every decision about a job that more than one caller needs (docket-number
//! formatting, who may edit or transition what, payment validation, cost
//! totaling, and the cascading paper-chain selection) lives here as pure,
//! synchronous functions. No I/O, no hidden state: the same inputs always
//! produce the same answer, so these are safe to call from any handler or
//! service without coordination.
//!
//! The permission predicates return plain booleans; callers decide whether a
//! `false` becomes a [`RuleError::PermissionDenied`] surfaced to the client.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::job::{Job, JobStatus, JobType, PaymentStatus};
use crate::domain::user::UserRole;

pub const LOCAL_DOCKET_PREFIX: &str = "LOC-";
pub const FOREIGN_DOCKET_PREFIX: &str = "FOR-";

/// Validation failures surfaced by the rules engine. All of them are local
/// and recoverable: they block one user action, never the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A foreign docket number carried nothing beyond the `FOR-` prefix.
    #[error("docket number needs a value after the FOR- prefix")]
    IncompleteDocketNumber,

    /// Jobs move PENDING -> PRINTED, once, and never back.
    #[error("jobs can only move from pending to printed")]
    InvalidStatusTransition,

    /// Payment can only be marked receipted or invoiced.
    #[error("payment status must be receipted or invoiced")]
    InvalidPaymentStatus,

    /// Marking payment requires a reference to the receipt or invoice.
    #[error("payment reference is required for receipted or invoiced jobs")]
    MissingPaymentReference,

    #[error("permission denied")]
    PermissionDenied,
}

/// The identity facts permission checks run on: the requesting user's role
/// and full name (jobs attribute creators by name).
#[derive(Clone, Copy, Debug)]
pub struct Actor<'a> {
    pub role: Option<UserRole>,
    pub full_name: &'a str,
}

impl<'a> Actor<'a> {
    pub fn new(role: Option<UserRole>, full_name: &'a str) -> Self {
        Self { role, full_name }
    }

    fn has_role(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }
}

/// Formats the docket number for a job about to be created.
///
/// LOCAL numbers are derived from the last-used counter value: `LOC-<n+1>`,
/// or `LOC-1` when no counter exists yet. The result is advisory only: two
/// concurrent creators may compute the same preview, and the authoritative
/// number is assigned server-side inside the create transaction.
///
/// FOREIGN numbers are user-supplied free text normalized so the `FOR-`
/// prefix is always present (re-prepended if the user deleted it). A value
/// that is nothing but the prefix is rejected.
pub fn format_docket_number(
    job_type: JobType,
    raw_input: &str,
    counter_value: Option<i32>,
) -> Result<String, RuleError> {
    match job_type {
        JobType::Local => {
            let next = counter_value.unwrap_or(0) + 1;
            Ok(format!("{LOCAL_DOCKET_PREFIX}{next}"))
        }
        JobType::Foreign => {
            let suffix = raw_input.trim().replace(FOREIGN_DOCKET_PREFIX, "");
            if suffix.is_empty() {
                return Err(RuleError::IncompleteDocketNumber);
            }
            Ok(format!("{FOREIGN_DOCKET_PREFIX}{suffix}"))
        }
    }
}

/// Whether the actor may edit the job's details.
///
/// Printed jobs are immutable to edits regardless of role. Otherwise the
/// superuser may edit anything, and the order taker may edit their own jobs.
pub fn can_edit(job: &Job, actor: &Actor) -> bool {
    if job.status == JobStatus::Printed {
        return false;
    }
    if actor.has_role(UserRole::Superuser) {
        return true;
    }
    job.order_taken_by == actor.full_name
}

/// Whether the actor may move jobs through the production pipeline.
pub fn can_transition_status(actor: &Actor) -> bool {
    matches!(
        actor.role,
        Some(UserRole::Designer | UserRole::Operator | UserRole::Superuser)
    )
}

/// Whether the actor may record payment documentation.
pub fn can_update_payment(actor: &Actor) -> bool {
    matches!(actor.role, Some(UserRole::Clerk | UserRole::Superuser))
}

/// Whether the actor may create jobs. Clerks and operators take no orders.
pub fn can_create_jobs(actor: &Actor) -> bool {
    !matches!(actor.role, Some(UserRole::Clerk | UserRole::Operator))
}

/// How the job list is scoped for a role (every dashboard shares this rule).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobListScope {
    /// Superusers see everything.
    All,
    /// Sales representatives see jobs attributed to them by name.
    OwnBySalesRep,
    /// Clerks see jobs still awaiting payment documentation.
    AwaitingPayment,
    /// Designers and operators see the production queue.
    PendingOnly,
}

pub fn job_list_scope(actor: &Actor) -> JobListScope {
    match actor.role {
        Some(UserRole::SalesRepresentative) => JobListScope::OwnBySalesRep,
        Some(UserRole::Clerk) => JobListScope::AwaitingPayment,
        Some(UserRole::Designer | UserRole::Operator) => JobListScope::PendingOnly,
        _ => JobListScope::All,
    }
}

/// Checks a status transition. PENDING -> PRINTED is the only legal move;
/// PRINTED is terminal.
pub fn validate_status_transition(current: JobStatus, next: JobStatus) -> Result<(), RuleError> {
    match (current, next) {
        (JobStatus::Pending, JobStatus::Printed) => Ok(()),
        _ => Err(RuleError::InvalidStatusTransition),
    }
}

/// Validates a payment update as submitted (raw status string plus
/// reference). Only RECEIPTED and INVOICED are accepted, and either requires
/// a non-blank reference.
pub fn validate_payment_update(
    payment_status: &str,
    payment_ref: &str,
) -> Result<PaymentStatus, RuleError> {
    if !payment_status.is_empty() && payment_ref.trim().is_empty() {
        return Err(RuleError::MissingPaymentReference);
    }
    match payment_status.parse::<PaymentStatus>() {
        Ok(status @ (PaymentStatus::Receipted | PaymentStatus::Invoiced)) => Ok(status),
        _ => Err(RuleError::InvalidPaymentStatus),
    }
}

/// Parses one cost input. Unparsable or missing values are silently zero,
/// a deliberate, preserved fallback: callers have always fed blank form
/// fields through here, and tightening it would change financial totals.
pub fn parse_cost(input: Option<&str>) -> Decimal {
    input
        .and_then(|s| s.trim().parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

/// Sums the two cost inputs at full precision. Use [`display_cost`] when
/// rendering.
pub fn compute_total_cost(print_cost: Option<&str>, design_cost: Option<&str>) -> Decimal {
    parse_cost(print_cost) + parse_cost(design_cost)
}

/// Sum of already-parsed costs; the single definition of "total".
pub fn total_cost(print_cost: Decimal, design_cost: Decimal) -> Decimal {
    print_cost + design_cost
}

/// Rounds a cost to the two decimal places shown to users.
pub fn display_cost(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// The cascading product type -> paper type -> weight -> size selection.
///
/// Changing any upstream selection clears every downstream one, not just the
/// immediate child; the fetch plan tells the caller which catalog lists must
/// be (re)requested for the current state. Pure routing, no fetching here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaperChain {
    pub product_type_id: Option<i32>,
    pub paper_type_id: Option<i32>,
    pub paper_weight_id: Option<i32>,
    pub paper_size_id: Option<i32>,
}

/// Which catalog lists must be requested for a chain state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchPlan {
    pub paper_types: bool,
    pub paper_weights: bool,
    pub paper_sizes: bool,
}

impl PaperChain {
    pub fn select_product_type(self, id: Option<i32>) -> Self {
        Self {
            product_type_id: id,
            paper_type_id: None,
            paper_weight_id: None,
            paper_size_id: None,
        }
    }

    pub fn select_paper_type(self, id: Option<i32>) -> Self {
        Self {
            paper_type_id: id,
            paper_weight_id: None,
            paper_size_id: None,
            ..self
        }
    }

    pub fn select_paper_weight(self, id: Option<i32>) -> Self {
        Self {
            paper_weight_id: id,
            paper_size_id: None,
            ..self
        }
    }

    pub fn select_paper_size(self, id: Option<i32>) -> Self {
        Self {
            paper_size_id: id,
            ..self
        }
    }

    /// Paper types depend on the product type, weights on the paper type,
    /// sizes on the weight.
    pub fn fetch_plan(&self) -> FetchPlan {
        FetchPlan {
            paper_types: self.product_type_id.is_some(),
            paper_weights: self.paper_type_id.is_some(),
            paper_sizes: self.paper_weight_id.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    fn sample_job(status: JobStatus, order_taken_by: &str) -> Job {
        let now = Utc::now().naive_utc();
        Job {
            id: 1,
            branch: "BORROWDALE".to_string(),
            job_type: JobType::Local,
            docket_number: "LOC-1".to_string(),
            sales_rep: "Jane Sales".to_string(),
            order_taken_by: order_taken_by.to_string(),
            customer: "Acme".to_string(),
            contact_person: "Bob".to_string(),
            mobile_number: "0771234567".to_string(),
            email_address: "bob@acme.example".to_string(),
            quantity: 500,
            description: "Business cards".to_string(),
            product_type_id: 1,
            paper_type_id: None,
            paper_weight_id: None,
            paper_size_id: None,
            notes: String::new(),
            print_cost: Decimal::new(1000, 2),
            design_cost: Decimal::new(500, 2),
            total_cost: Decimal::new(1500, 2),
            status,
            payment_status: PaymentStatus::NotMarked,
            payment_ref: String::new(),
            printed_by: None,
            printed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn actor(role: Option<UserRole>, name: &str) -> Actor<'_> {
        Actor::new(role, name)
    }

    #[test]
    fn local_docket_starts_at_one_without_counter() {
        let docket = format_docket_number(JobType::Local, "", None).unwrap();
        assert_eq!(docket, "LOC-1");
    }

    #[test]
    fn local_docket_increments_counter() {
        let docket = format_docket_number(JobType::Local, "", Some(41)).unwrap();
        assert_eq!(docket, "LOC-42");
    }

    #[test]
    fn foreign_docket_keeps_existing_prefix() {
        let docket = format_docket_number(JobType::Foreign, "FOR-ABC", None).unwrap();
        assert_eq!(docket, "FOR-ABC");
    }

    #[test]
    fn foreign_docket_prepends_missing_prefix() {
        let docket = format_docket_number(JobType::Foreign, "ABC", None).unwrap();
        assert_eq!(docket, "FOR-ABC");
    }

    #[test]
    fn foreign_docket_rejects_bare_prefix() {
        assert_eq!(
            format_docket_number(JobType::Foreign, "FOR-", None),
            Err(RuleError::IncompleteDocketNumber)
        );
        assert_eq!(
            format_docket_number(JobType::Foreign, "  ", None),
            Err(RuleError::IncompleteDocketNumber)
        );
    }

    #[test]
    fn format_docket_number_is_idempotent() {
        let first = format_docket_number(JobType::Local, "", Some(7)).unwrap();
        let second = format_docket_number(JobType::Local, "", Some(7)).unwrap();
        assert_eq!(first, second);

        let normalized = format_docket_number(JobType::Foreign, "XY", None).unwrap();
        let again = format_docket_number(JobType::Foreign, &normalized, None).unwrap();
        assert_eq!(normalized, again);
    }

    #[test]
    fn printed_jobs_are_uneditable_for_everyone() {
        let job = sample_job(JobStatus::Printed, "John Designer");
        for role in [
            None,
            Some(UserRole::Superuser),
            Some(UserRole::Designer),
            Some(UserRole::SalesRepresentative),
            Some(UserRole::Operator),
            Some(UserRole::Clerk),
        ] {
            assert!(!can_edit(&job, &actor(role, "John Designer")));
        }
    }

    #[test]
    fn superuser_edits_any_pending_job() {
        let job = sample_job(JobStatus::Pending, "Someone Else");
        assert!(can_edit(&job, &actor(Some(UserRole::Superuser), "Admin")));
    }

    #[test]
    fn creator_edits_own_pending_job() {
        let job = sample_job(JobStatus::Pending, "John Designer");
        assert!(can_edit(
            &job,
            &actor(Some(UserRole::Designer), "John Designer")
        ));
        assert!(!can_edit(
            &job,
            &actor(Some(UserRole::Designer), "Jane Sales")
        ));
    }

    #[test]
    fn status_transition_roles() {
        for (role, expected) in [
            (Some(UserRole::Designer), true),
            (Some(UserRole::Operator), true),
            (Some(UserRole::Superuser), true),
            (Some(UserRole::SalesRepresentative), false),
            (Some(UserRole::Clerk), false),
            (None, false),
        ] {
            assert_eq!(can_transition_status(&actor(role, "X")), expected);
        }
    }

    #[test]
    fn payment_update_roles() {
        for (role, expected) in [
            (Some(UserRole::Clerk), true),
            (Some(UserRole::Superuser), true),
            (Some(UserRole::Designer), false),
            (Some(UserRole::Operator), false),
            (Some(UserRole::SalesRepresentative), false),
            (None, false),
        ] {
            assert_eq!(can_update_payment(&actor(role, "X")), expected);
        }
    }

    #[test]
    fn clerks_and_operators_cannot_create_jobs() {
        assert!(!can_create_jobs(&actor(Some(UserRole::Clerk), "X")));
        assert!(!can_create_jobs(&actor(Some(UserRole::Operator), "X")));
        assert!(can_create_jobs(&actor(Some(UserRole::Superuser), "X")));
        assert!(can_create_jobs(&actor(
            Some(UserRole::SalesRepresentative),
            "X"
        )));
    }

    #[test]
    fn pending_to_printed_is_the_only_transition() {
        assert!(validate_status_transition(JobStatus::Pending, JobStatus::Printed).is_ok());
        assert_eq!(
            validate_status_transition(JobStatus::Printed, JobStatus::Pending),
            Err(RuleError::InvalidStatusTransition)
        );
        assert_eq!(
            validate_status_transition(JobStatus::Printed, JobStatus::Printed),
            Err(RuleError::InvalidStatusTransition)
        );
        assert_eq!(
            validate_status_transition(JobStatus::Pending, JobStatus::Pending),
            Err(RuleError::InvalidStatusTransition)
        );
    }

    #[test]
    fn payment_update_requires_reference() {
        assert_eq!(
            validate_payment_update("RECEIPTED", ""),
            Err(RuleError::MissingPaymentReference)
        );
        assert_eq!(
            validate_payment_update("RECEIPTED", "REF123"),
            Ok(PaymentStatus::Receipted)
        );
        assert_eq!(
            validate_payment_update("INVOICED", "INV-9"),
            Ok(PaymentStatus::Invoiced)
        );
    }

    #[test]
    fn payment_update_rejects_other_statuses() {
        assert_eq!(
            validate_payment_update("NOT_MARKED", "REF123"),
            Err(RuleError::InvalidPaymentStatus)
        );
        assert_eq!(
            validate_payment_update("PAID", "REF123"),
            Err(RuleError::InvalidPaymentStatus)
        );
    }

    #[test]
    fn totals_add_both_costs() {
        assert_eq!(
            compute_total_cost(Some("10.50"), Some("5.25")),
            Decimal::from_str("15.75").unwrap()
        );
    }

    #[test]
    fn unparsable_costs_fall_back_to_zero() {
        assert_eq!(
            compute_total_cost(Some(""), Some("5")),
            Decimal::from_str("5").unwrap()
        );
        assert_eq!(compute_total_cost(None, None), Decimal::ZERO);
        assert_eq!(
            compute_total_cost(Some("n/a"), Some("1.00")),
            Decimal::from_str("1.00").unwrap()
        );
    }

    #[test]
    fn display_cost_rounds_to_cents() {
        let total = compute_total_cost(Some("0.106"), Some("0.10"));
        assert_eq!(display_cost(total), Decimal::from_str("0.21").unwrap());
    }

    #[test]
    fn list_scope_per_role() {
        assert_eq!(
            job_list_scope(&actor(Some(UserRole::Superuser), "X")),
            JobListScope::All
        );
        assert_eq!(
            job_list_scope(&actor(Some(UserRole::SalesRepresentative), "X")),
            JobListScope::OwnBySalesRep
        );
        assert_eq!(
            job_list_scope(&actor(Some(UserRole::Clerk), "X")),
            JobListScope::AwaitingPayment
        );
        assert_eq!(
            job_list_scope(&actor(Some(UserRole::Designer), "X")),
            JobListScope::PendingOnly
        );
        assert_eq!(
            job_list_scope(&actor(Some(UserRole::Operator), "X")),
            JobListScope::PendingOnly
        );
    }

    #[test]
    fn changing_product_type_clears_all_downstream() {
        let chain = PaperChain {
            product_type_id: Some(1),
            paper_type_id: Some(2),
            paper_weight_id: Some(3),
            paper_size_id: Some(4),
        };
        let next = chain.select_product_type(Some(9));
        assert_eq!(next.product_type_id, Some(9));
        assert_eq!(next.paper_type_id, None);
        assert_eq!(next.paper_weight_id, None);
        assert_eq!(next.paper_size_id, None);
    }

    #[test]
    fn changing_paper_type_clears_weight_and_size() {
        let chain = PaperChain {
            product_type_id: Some(1),
            paper_type_id: Some(2),
            paper_weight_id: Some(3),
            paper_size_id: Some(4),
        };
        let next = chain.select_paper_type(Some(7));
        assert_eq!(next.product_type_id, Some(1));
        assert_eq!(next.paper_type_id, Some(7));
        assert_eq!(next.paper_weight_id, None);
        assert_eq!(next.paper_size_id, None);
    }

    #[test]
    fn changing_weight_clears_size_only() {
        let chain = PaperChain {
            product_type_id: Some(1),
            paper_type_id: Some(2),
            paper_weight_id: Some(3),
            paper_size_id: Some(4),
        };
        let next = chain.select_paper_weight(Some(8));
        assert_eq!(next.product_type_id, Some(1));
        assert_eq!(next.paper_type_id, Some(2));
        assert_eq!(next.paper_weight_id, Some(8));
        assert_eq!(next.paper_size_id, None);
    }

    #[test]
    fn fetch_plan_follows_present_selections() {
        assert_eq!(PaperChain::default().fetch_plan(), FetchPlan::default());

        let chain = PaperChain::default().select_product_type(Some(1));
        assert!(chain.fetch_plan().paper_types);
        assert!(!chain.fetch_plan().paper_weights);

        let chain = chain.select_paper_type(Some(2));
        assert!(chain.fetch_plan().paper_weights);
        assert!(!chain.fetch_plan().paper_sizes);

        let chain = chain.select_paper_weight(Some(3));
        assert!(chain.fetch_plan().paper_sizes);
    }
}
