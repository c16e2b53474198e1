use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::settings::{Branch, NewBranch, SystemSettings, UpdateSystemSettings};
use crate::repository::{
    SettingsReader, SettingsWriter,
    errors::{RepositoryError, RepositoryResult},
};

/// Diesel implementation of [`SettingsReader`] and [`SettingsWriter`].
pub struct DieselSettingsRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselSettingsRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

fn get_or_create_settings_row(
    conn: &mut diesel::sqlite::SqliteConnection,
) -> RepositoryResult<crate::models::settings::SystemSettings> {
    use crate::models::settings::SystemSettings as DbSettings;
    use crate::schema::system_settings;

    if let Some(row) = system_settings::table
        .order(system_settings::id.asc())
        .first::<DbSettings>(conn)
        .optional()?
    {
        return Ok(row);
    }

    let row = diesel::insert_into(system_settings::table)
        .values((
            system_settings::company_name.eq("Paragon Job Management"),
            system_settings::business_hours.eq(r#"{"start":"08:00","end":"17:00"}"#),
            system_settings::contact_info.eq(r#"{"phone":"","email":"","address":""}"#),
        ))
        .get_result::<DbSettings>(conn)?;
    Ok(row)
}

impl SettingsReader for DieselSettingsRepository<'_> {
    fn get_settings(&self) -> RepositoryResult<SystemSettings> {
        let mut conn = self.pool.get()?;
        let row = conn.immediate_transaction::<_, RepositoryError, _>(get_or_create_settings_row)?;
        Ok(row.into())
    }

    fn list_branches(&self) -> RepositoryResult<Vec<Branch>> {
        use crate::models::settings::Branch as DbBranch;
        use crate::schema::branches;

        let mut conn = self.pool.get()?;
        let rows = branches::table
            .order(branches::name.asc())
            .load::<DbBranch>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_branch_by_id(&self, id: i32) -> RepositoryResult<Option<Branch>> {
        use crate::models::settings::Branch as DbBranch;
        use crate::schema::branches;

        let mut conn = self.pool.get()?;
        let row = branches::table
            .find(id)
            .first::<DbBranch>(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }
}

impl SettingsWriter for DieselSettingsRepository<'_> {
    fn update_settings(&self, updates: &UpdateSystemSettings) -> RepositoryResult<SystemSettings> {
        use crate::models::settings::{
            SystemSettings as DbSettings, UpdateSystemSettings as DbUpdate,
        };
        use crate::schema::system_settings;

        let mut conn = self.pool.get()?;
        let row = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let current = get_or_create_settings_row(conn)?;
            let changeset = DbUpdate::from_domain(updates, Utc::now().naive_utc());
            let row = diesel::update(system_settings::table.find(current.id))
                .set(&changeset)
                .get_result::<DbSettings>(conn)?;
            Ok(row)
        })?;
        Ok(row.into())
    }

    fn create_branch(&self, new: &NewBranch) -> RepositoryResult<Branch> {
        use crate::models::settings::{Branch as DbBranch, NewBranch as DbNewBranch};
        use crate::schema::branches;

        let mut conn = self.pool.get()?;
        let insertable: DbNewBranch = new.into();
        let row = diesel::insert_into(branches::table)
            .values(&insertable)
            .get_result::<DbBranch>(&mut conn)?;
        Ok(row.into())
    }

    fn update_branch(&self, branch_id: i32, updates: &NewBranch) -> RepositoryResult<Branch> {
        use crate::models::settings::Branch as DbBranch;
        use crate::schema::branches;

        let mut conn = self.pool.get()?;
        let row = diesel::update(branches::table.find(branch_id))
            .set((
                branches::name.eq(updates.name.as_str()),
                branches::code.eq(updates.code.as_str()),
                branches::is_active.eq(updates.is_active),
            ))
            .get_result::<DbBranch>(&mut conn)?;
        Ok(row.into())
    }

    fn delete_branch(&self, branch_id: i32) -> RepositoryResult<()> {
        use crate::schema::branches;

        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(branches::table.find(branch_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
