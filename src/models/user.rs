use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::EnumParseError;
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser, UserRole};

/// Diesel model for [`crate::domain::user::User`].
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Option<String>,
    pub approved: bool,
    pub assigned_by: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`User`]. Registrations start unapproved and role-less.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl TryFrom<User> for DomainUser {
    type Error = EnumParseError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let role = match user.role {
            Some(value) => Some(value.parse::<UserRole>()?),
            None => None,
        };
        Ok(Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            role,
            approved: user.approved,
            assigned_by: user.assigned_by,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            full_name: user.full_name.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
        }
    }
}
