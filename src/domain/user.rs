use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::EnumParseError;

/// Staff role. A freshly registered user has no role until a superuser
/// approves the account and assigns one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Superuser,
    Designer,
    SalesRepresentative,
    Operator,
    Clerk,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Superuser => "SUPERUSER",
            UserRole::Designer => "DESIGNER",
            UserRole::SalesRepresentative => "SALES_REPRESENTATIVE",
            UserRole::Operator => "OPERATOR",
            UserRole::Clerk => "CLERK",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPERUSER" => Ok(UserRole::Superuser),
            "DESIGNER" => Ok(UserRole::Designer),
            "SALES_REPRESENTATIVE" => Ok(UserRole::SalesRepresentative),
            "OPERATOR" => Ok(UserRole::Operator),
            "CLERK" => Ok(UserRole::Clerk),
            other => Err(EnumParseError::new("user role", other)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    /// Argon2 hash; never serialized to API payloads.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Option<UserRole>,
    pub approved: bool,
    pub assigned_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data for a registration request. Registrations start unapproved and
/// role-less; approval assigns both.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    #[must_use]
    pub fn new(full_name: String, email: String, password_hash: String) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
        }
    }
}
