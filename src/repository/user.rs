use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::user::{NewUser, User, UserRole};
use crate::repository::{
    UserReader, UserWriter,
    errors::{RepositoryError, RepositoryResult},
};

/// Diesel implementation of [`UserReader`] and [`UserWriter`].
pub struct DieselUserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselUserRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl UserReader for DieselUserRepository<'_> {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let user = users::table
            .find(id)
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from).transpose().map_err(Into::into)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let user = users::table
            .filter(users::email.eq(email.trim().to_lowercase()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(User::try_from).transpose().map_err(Into::into)
    }

    fn list_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let rows = users::table
            .order(users::created_at.desc())
            .load::<DbUser>(&mut conn)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(Into::into))
            .collect()
    }

    fn list_pending_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let rows = users::table
            .filter(users::approved.eq(false))
            .order(users::created_at.desc())
            .load::<DbUser>(&mut conn)?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(Into::into))
            .collect()
    }

    fn count_pending_users(&self) -> RepositoryResult<i64> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let count = users::table
            .filter(users::approved.eq(false))
            .count()
            .get_result(&mut conn)?;
        Ok(count)
    }
}

impl UserWriter for DieselUserRepository<'_> {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::models::user::{NewUser as DbNewUser, User as DbUser};
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let insertable: DbNewUser = new_user.into();
        let row = diesel::insert_into(users::table)
            .values(&insertable)
            .get_result::<DbUser>(&mut conn)?;

        Ok(row.try_into()?)
    }

    fn approve_user(
        &self,
        user_id: i32,
        role: UserRole,
        assigned_by: i32,
    ) -> RepositoryResult<User> {
        use crate::models::user::User as DbUser;
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let row = diesel::update(
            users::table
                .find(user_id)
                .filter(users::approved.eq(false)),
        )
        .set((
            users::approved.eq(true),
            users::role.eq(role.as_str()),
            users::assigned_by.eq(assigned_by),
            users::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbUser>(&mut conn)?;

        Ok(row.try_into()?)
    }

    fn delete_pending_user(&self, user_id: i32) -> RepositoryResult<()> {
        use crate::schema::users;

        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(
            users::table
                .find(user_id)
                .filter(users::approved.eq(false)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
