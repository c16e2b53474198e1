use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A physical print-shop location. Jobs reference branches by name (open
/// set); this table is the administrative source of the list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

#[derive(Clone, Debug)]
pub struct NewBranch {
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

/// The shop-wide settings singleton. Created with defaults on first access.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SystemSettings {
    pub company_name: String,
    pub default_branch_id: Option<i32>,
    pub auto_approve_users: bool,
    pub email_notifications: bool,
    pub system_maintenance: bool,
    pub maintenance_message: String,
    pub job_number_prefix: String,
    pub job_number_suffix: String,
    pub tax_rate: Decimal,
    pub currency: String,
    pub business_hours: Value,
    pub contact_info: Value,
    pub updated_at: NaiveDateTime,
}

/// Partial update of the settings singleton; `None` leaves a field untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateSystemSettings {
    pub company_name: Option<String>,
    pub default_branch_id: Option<Option<i32>>,
    pub auto_approve_users: Option<bool>,
    pub email_notifications: Option<bool>,
    pub system_maintenance: Option<bool>,
    pub maintenance_message: Option<String>,
    pub job_number_prefix: Option<String>,
    pub job_number_suffix: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub business_hours: Option<Value>,
    pub contact_info: Option<Value>,
}
