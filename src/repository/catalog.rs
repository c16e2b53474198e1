use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::db::DbPool;
use crate::domain::catalog::{
    NewPaperSize, NewPaperType, NewProductType, PaperSize, PaperType, PaperWeight,
    ProductSpecification, ProductType,
};
use crate::models::parse_decimal;
use crate::repository::{
    CatalogReader, CatalogWriter,
    errors::{RepositoryError, RepositoryResult},
};

const CUSTOM_SIZE_STEM: &str = "Custom Size";

/// Diesel implementation of [`CatalogReader`] and [`CatalogWriter`].
pub struct DieselCatalogRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselCatalogRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

/// Finds a stored size with the same dimensions, also matching the rotated
/// orientation. Comparison is on decimal values, not the stored text.
fn find_size_with_dimensions(
    conn: &mut SqliteConnection,
    width_mm: Decimal,
    height_mm: Decimal,
) -> RepositoryResult<Option<crate::models::catalog::PaperSize>> {
    use crate::models::catalog::PaperSize as DbPaperSize;
    use crate::schema::paper_sizes;

    let rows = paper_sizes::table.load::<DbPaperSize>(conn)?;
    Ok(rows.into_iter().find(|row| {
        let w = parse_decimal(&row.width_mm);
        let h = parse_decimal(&row.height_mm);
        (w == width_mm && h == height_mm) || (w == height_mm && h == width_mm)
    }))
}

/// Picks the next free "Custom Size N" name when the submitted name is blank
/// or itself a default custom name.
fn resolve_custom_name(conn: &mut SqliteConnection, submitted: &str) -> RepositoryResult<String> {
    use crate::schema::paper_sizes;

    let trimmed = submitted.trim();
    if !trimmed.is_empty() && !trimmed.to_lowercase().starts_with("custom size") {
        return Ok(trimmed.to_string());
    }

    let names: Vec<String> = paper_sizes::table
        .filter(paper_sizes::name.like(format!("{CUSTOM_SIZE_STEM}%")))
        .select(paper_sizes::name)
        .load(conn)?;

    let next = names
        .iter()
        .filter_map(|name| name.strip_prefix(CUSTOM_SIZE_STEM)?.trim().parse::<i32>().ok())
        .max()
        .unwrap_or(0)
        + 1;

    Ok(format!("{CUSTOM_SIZE_STEM} {next}"))
}

impl CatalogReader for DieselCatalogRepository<'_> {
    fn list_product_types(&self) -> RepositoryResult<Vec<ProductType>> {
        use crate::models::catalog::ProductType as DbProductType;
        use crate::schema::product_types;

        let mut conn = self.pool.get()?;
        let rows = product_types::table
            .order(product_types::name.asc())
            .load::<DbProductType>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_paper_types(&self) -> RepositoryResult<Vec<PaperType>> {
        use crate::models::catalog::PaperType as DbPaperType;
        use crate::schema::paper_types;

        let mut conn = self.pool.get()?;
        let rows = paper_types::table
            .order(paper_types::name.asc())
            .load::<DbPaperType>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_paper_type_by_id(&self, id: i32) -> RepositoryResult<Option<PaperType>> {
        use crate::models::catalog::PaperType as DbPaperType;
        use crate::schema::paper_types;

        let mut conn = self.pool.get()?;
        let row = paper_types::table
            .find(id)
            .first::<DbPaperType>(&mut conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn list_paper_weights(&self) -> RepositoryResult<Vec<PaperWeight>> {
        use crate::models::catalog::PaperWeight as DbPaperWeight;
        use crate::schema::paper_weights;

        let mut conn = self.pool.get()?;
        let rows = paper_weights::table
            .order(paper_weights::gsm.asc())
            .load::<DbPaperWeight>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn list_paper_sizes(&self) -> RepositoryResult<Vec<PaperSize>> {
        use crate::models::catalog::PaperSize as DbPaperSize;
        use crate::schema::paper_sizes;

        let mut conn = self.pool.get()?;
        let rows = paper_sizes::table
            .order((paper_sizes::series.asc(), paper_sizes::name.asc()))
            .load::<DbPaperSize>(&mut conn)?;

        rows.into_iter()
            .map(|row| PaperSize::try_from(row).map_err(Into::into))
            .collect()
    }

    fn compatible_weights(&self, paper_type_id: i32) -> RepositoryResult<Vec<PaperWeight>> {
        use crate::models::catalog::PaperWeight as DbPaperWeight;
        use crate::schema::{paper_weight_types, paper_weights};

        let mut conn = self.pool.get()?;
        let rows = paper_weights::table
            .inner_join(paper_weight_types::table)
            .filter(paper_weight_types::paper_type_id.eq(paper_type_id))
            .order(paper_weights::gsm.asc())
            .select(DbPaperWeight::as_select())
            .load::<DbPaperWeight>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn product_specification(
        &self,
        product_type_id: i32,
    ) -> RepositoryResult<ProductSpecification> {
        use crate::models::catalog::{
            PaperSize as DbPaperSize, PaperType as DbPaperType, PaperWeight as DbPaperWeight,
        };
        use crate::schema::{
            paper_sizes, paper_types, paper_weights, product_type_paper_sizes,
            product_type_paper_types, product_type_paper_weights,
        };

        let mut conn = self.pool.get()?;

        let types = paper_types::table
            .inner_join(product_type_paper_types::table)
            .filter(product_type_paper_types::product_type_id.eq(product_type_id))
            .order(paper_types::name.asc())
            .select(DbPaperType::as_select())
            .load::<DbPaperType>(&mut conn)?;

        let weights = paper_weights::table
            .inner_join(product_type_paper_weights::table)
            .filter(product_type_paper_weights::product_type_id.eq(product_type_id))
            .order(paper_weights::gsm.asc())
            .select(DbPaperWeight::as_select())
            .load::<DbPaperWeight>(&mut conn)?;

        let sizes = paper_sizes::table
            .inner_join(product_type_paper_sizes::table)
            .filter(product_type_paper_sizes::product_type_id.eq(product_type_id))
            .order((paper_sizes::series.asc(), paper_sizes::name.asc()))
            .select(DbPaperSize::as_select())
            .load::<DbPaperSize>(&mut conn)?;

        Ok(ProductSpecification {
            paper_types: types.into_iter().map(Into::into).collect(),
            paper_weights: weights.into_iter().map(Into::into).collect(),
            paper_sizes: sizes
                .into_iter()
                .map(|row| PaperSize::try_from(row).map_err(RepositoryError::from))
                .collect::<RepositoryResult<Vec<_>>>()?,
        })
    }
}

impl CatalogWriter for DieselCatalogRepository<'_> {
    fn create_product_type(&self, new: &NewProductType) -> RepositoryResult<ProductType> {
        use crate::models::catalog::{NewProductType as DbNew, ProductType as DbProductType};
        use crate::schema::product_types;

        let mut conn = self.pool.get()?;
        let insertable: DbNew = new.into();
        let row = diesel::insert_into(product_types::table)
            .values(&insertable)
            .get_result::<DbProductType>(&mut conn)?;
        Ok(row.into())
    }

    fn create_paper_type(&self, new: &NewPaperType) -> RepositoryResult<PaperType> {
        use crate::models::catalog::{NewPaperType as DbNew, PaperType as DbPaperType};
        use crate::schema::paper_types;

        let mut conn = self.pool.get()?;
        let insertable: DbNew = new.into();
        let row = diesel::insert_into(paper_types::table)
            .values(&insertable)
            .get_result::<DbPaperType>(&mut conn)?;
        Ok(row.into())
    }

    fn create_paper_weight(&self, gsm: i32) -> RepositoryResult<PaperWeight> {
        use crate::models::catalog::PaperWeight as DbPaperWeight;
        use crate::schema::paper_weights;

        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(paper_weights::table)
            .values(paper_weights::gsm.eq(gsm))
            .get_result::<DbPaperWeight>(&mut conn)?;
        Ok(row.into())
    }

    fn create_paper_size(&self, new: &NewPaperSize) -> RepositoryResult<PaperSize> {
        use crate::models::catalog::{NewPaperSize as DbNew, PaperSize as DbPaperSize};
        use crate::schema::paper_sizes;

        let mut conn = self.pool.get()?;
        let insertable: DbNew = new.into();
        let row = diesel::insert_into(paper_sizes::table)
            .values(&insertable)
            .get_result::<DbPaperSize>(&mut conn)?;
        Ok(row.try_into()?)
    }

    fn link_weight_to_paper_type(
        &self,
        paper_weight_id: i32,
        paper_type_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::paper_weight_types;

        let mut conn = self.pool.get()?;
        diesel::insert_into(paper_weight_types::table)
            .values((
                paper_weight_types::paper_weight_id.eq(paper_weight_id),
                paper_weight_types::paper_type_id.eq(paper_type_id),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)?;
        Ok(())
    }

    fn link_size_to_weight(
        &self,
        paper_size_id: i32,
        paper_weight_id: i32,
    ) -> RepositoryResult<()> {
        use crate::schema::paper_size_weights;

        let mut conn = self.pool.get()?;
        diesel::insert_into(paper_size_weights::table)
            .values((
                paper_size_weights::paper_size_id.eq(paper_size_id),
                paper_size_weights::paper_weight_id.eq(paper_weight_id),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)?;
        Ok(())
    }

    fn replace_product_specification(
        &self,
        product_type_id: i32,
        paper_type_ids: &[i32],
        paper_weight_ids: &[i32],
        paper_size_ids: &[i32],
    ) -> RepositoryResult<()> {
        use crate::schema::{
            product_type_paper_sizes, product_type_paper_types, product_type_paper_weights,
        };

        let mut conn = self.pool.get()?;
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                product_type_paper_types::table
                    .filter(product_type_paper_types::product_type_id.eq(product_type_id)),
            )
            .execute(conn)?;
            diesel::delete(
                product_type_paper_weights::table
                    .filter(product_type_paper_weights::product_type_id.eq(product_type_id)),
            )
            .execute(conn)?;
            diesel::delete(
                product_type_paper_sizes::table
                    .filter(product_type_paper_sizes::product_type_id.eq(product_type_id)),
            )
            .execute(conn)?;

            for paper_type_id in paper_type_ids {
                diesel::insert_into(product_type_paper_types::table)
                    .values((
                        product_type_paper_types::product_type_id.eq(product_type_id),
                        product_type_paper_types::paper_type_id.eq(paper_type_id),
                    ))
                    .execute(conn)?;
            }
            for paper_weight_id in paper_weight_ids {
                diesel::insert_into(product_type_paper_weights::table)
                    .values((
                        product_type_paper_weights::product_type_id.eq(product_type_id),
                        product_type_paper_weights::paper_weight_id.eq(paper_weight_id),
                    ))
                    .execute(conn)?;
            }
            for paper_size_id in paper_size_ids {
                diesel::insert_into(product_type_paper_sizes::table)
                    .values((
                        product_type_paper_sizes::product_type_id.eq(product_type_id),
                        product_type_paper_sizes::paper_size_id.eq(paper_size_id),
                    ))
                    .execute(conn)?;
            }
            Ok(())
        })
    }

    fn create_custom_paper_size(
        &self,
        new: &NewPaperSize,
        paper_weight_id: i32,
    ) -> RepositoryResult<(PaperSize, bool)> {
        use crate::models::catalog::{
            NewPaperSize as DbNew, PaperSize as DbPaperSize, PaperWeight as DbPaperWeight,
        };
        use crate::schema::{paper_size_weights, paper_sizes, paper_weights};

        let mut conn = self.pool.get()?;
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            paper_weights::table
                .find(paper_weight_id)
                .first::<DbPaperWeight>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            if let Some(existing) = find_size_with_dimensions(conn, new.width_mm, new.height_mm)? {
                diesel::insert_into(paper_size_weights::table)
                    .values((
                        paper_size_weights::paper_size_id.eq(existing.id),
                        paper_size_weights::paper_weight_id.eq(paper_weight_id),
                    ))
                    .on_conflict_do_nothing()
                    .execute(conn)?;
                return Ok((existing.try_into()?, false));
            }

            let name = resolve_custom_name(conn, &new.name)?;
            let insertable = DbNew {
                name,
                ..DbNew::from(new)
            };
            let row = diesel::insert_into(paper_sizes::table)
                .values(&insertable)
                .get_result::<DbPaperSize>(conn)?;

            diesel::insert_into(paper_size_weights::table)
                .values((
                    paper_size_weights::paper_size_id.eq(row.id),
                    paper_size_weights::paper_weight_id.eq(paper_weight_id),
                ))
                .execute(conn)?;

            Ok((row.try_into()?, true))
        })
    }
}
