use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::{Value, json};

use crate::domain::settings::{
    Branch as DomainBranch, NewBranch as DomainNewBranch,
    SystemSettings as DomainSystemSettings, UpdateSystemSettings as DomainUpdateSystemSettings,
};
use crate::models::parse_decimal;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::branches)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub is_active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::branches)]
pub struct NewBranch<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub is_active: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::system_settings)]
pub struct SystemSettings {
    pub id: i32,
    pub company_name: String,
    pub default_branch_id: Option<i32>,
    pub auto_approve_users: bool,
    pub email_notifications: bool,
    pub system_maintenance: bool,
    pub maintenance_message: String,
    pub job_number_prefix: String,
    pub job_number_suffix: String,
    pub tax_rate: String,
    pub currency: String,
    pub business_hours: String,
    pub contact_info: String,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for the settings singleton; `None` skips the column and
/// `Some(None)` on the branch clears it.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::system_settings)]
pub struct UpdateSystemSettings {
    pub company_name: Option<String>,
    pub default_branch_id: Option<Option<i32>>,
    pub auto_approve_users: Option<bool>,
    pub email_notifications: Option<bool>,
    pub system_maintenance: Option<bool>,
    pub maintenance_message: Option<String>,
    pub job_number_prefix: Option<String>,
    pub job_number_suffix: Option<String>,
    pub tax_rate: Option<String>,
    pub currency: Option<String>,
    pub business_hours: Option<String>,
    pub contact_info: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl UpdateSystemSettings {
    pub fn from_domain(updates: &DomainUpdateSystemSettings, updated_at: NaiveDateTime) -> Self {
        Self {
            company_name: updates.company_name.clone(),
            default_branch_id: updates.default_branch_id,
            auto_approve_users: updates.auto_approve_users,
            email_notifications: updates.email_notifications,
            system_maintenance: updates.system_maintenance,
            maintenance_message: updates.maintenance_message.clone(),
            job_number_prefix: updates.job_number_prefix.clone(),
            job_number_suffix: updates.job_number_suffix.clone(),
            tax_rate: updates.tax_rate.map(|rate| rate.to_string()),
            currency: updates.currency.clone(),
            business_hours: updates.business_hours.as_ref().map(Value::to_string),
            contact_info: updates.contact_info.as_ref().map(Value::to_string),
            updated_at,
        }
    }
}

impl From<Branch> for DomainBranch {
    fn from(row: Branch) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            is_active: row.is_active,
        }
    }
}

impl<'a> From<&'a DomainNewBranch> for NewBranch<'a> {
    fn from(value: &'a DomainNewBranch) -> Self {
        Self {
            name: value.name.as_str(),
            code: value.code.as_str(),
            is_active: value.is_active,
        }
    }
}

impl From<SystemSettings> for DomainSystemSettings {
    fn from(row: SystemSettings) -> Self {
        Self {
            company_name: row.company_name,
            default_branch_id: row.default_branch_id,
            auto_approve_users: row.auto_approve_users,
            email_notifications: row.email_notifications,
            system_maintenance: row.system_maintenance,
            maintenance_message: row.maintenance_message,
            job_number_prefix: row.job_number_prefix,
            job_number_suffix: row.job_number_suffix,
            tax_rate: parse_decimal(&row.tax_rate),
            currency: row.currency,
            business_hours: serde_json::from_str(&row.business_hours).unwrap_or_else(|_| json!({})),
            contact_info: serde_json::from_str(&row.contact_info).unwrap_or_else(|_| json!({})),
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn settings_row_into_domain_parses_json_blobs() {
        let now = chrono::Utc::now().naive_utc();
        let row = SystemSettings {
            id: 1,
            company_name: "Paragon Job Management".to_string(),
            default_branch_id: None,
            auto_approve_users: false,
            email_notifications: true,
            system_maintenance: false,
            maintenance_message: String::new(),
            job_number_prefix: String::new(),
            job_number_suffix: String::new(),
            tax_rate: "15.00".to_string(),
            currency: "USD".to_string(),
            business_hours: r#"{"start":"08:00","end":"17:00"}"#.to_string(),
            contact_info: "not json".to_string(),
            updated_at: now,
        };
        let domain: DomainSystemSettings = row.into();
        assert_eq!(domain.tax_rate, Decimal::new(1500, 2));
        assert_eq!(domain.business_hours["start"], "08:00");
        // Corrupt blobs degrade to an empty object instead of failing the row.
        assert_eq!(domain.contact_info, json!({}));
    }
}
