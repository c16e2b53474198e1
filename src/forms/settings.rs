use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

use crate::domain::settings::{NewBranch, UpdateSystemSettings};
use crate::forms::FormError;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Validate)]
pub struct BranchForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<&BranchForm> for NewBranch {
    fn from(form: &BranchForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            code: form.code.trim().to_uppercase(),
            is_active: form.is_active,
        }
    }
}

/// Distinguishes an absent field (skip) from an explicit `null` (clear).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Partial update of the settings singleton.
#[derive(Deserialize, Default)]
pub struct UpdateSettingsForm {
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub default_branch_id: Option<Option<i32>>,
    pub auto_approve_users: Option<bool>,
    pub email_notifications: Option<bool>,
    pub system_maintenance: Option<bool>,
    pub maintenance_message: Option<String>,
    pub job_number_prefix: Option<String>,
    pub job_number_suffix: Option<String>,
    pub tax_rate: Option<String>,
    pub currency: Option<String>,
    pub business_hours: Option<Value>,
    pub contact_info: Option<Value>,
}

impl TryFrom<&UpdateSettingsForm> for UpdateSystemSettings {
    type Error = FormError;

    fn try_from(form: &UpdateSettingsForm) -> Result<Self, Self::Error> {
        let tax_rate = match form.tax_rate.as_deref() {
            Some(raw) => {
                let rate: Decimal = raw
                    .trim()
                    .parse()
                    .map_err(|_| FormError::InvalidValue("tax_rate"))?;
                if rate < Decimal::ZERO || rate > Decimal::from(100) {
                    return Err(FormError::InvalidValue("tax_rate"));
                }
                Some(rate)
            }
            None => None,
        };

        Ok(Self {
            company_name: form.company_name.clone(),
            default_branch_id: form.default_branch_id,
            auto_approve_users: form.auto_approve_users,
            email_notifications: form.email_notifications,
            system_maintenance: form.system_maintenance,
            maintenance_message: form.maintenance_message.clone(),
            job_number_prefix: form.job_number_prefix.clone(),
            job_number_suffix: form.job_number_suffix.clone(),
            tax_rate,
            currency: form.currency.clone(),
            business_hours: form.business_hours.clone(),
            contact_info: form.contact_info.clone(),
        })
    }
}
