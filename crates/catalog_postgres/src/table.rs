//! Table metadata for each catalog entity.
//!
//! `COLUMNS` lists the persisted columns with `uuid` first; `bind_columns`
//! binds the entity's values in exactly that order. The generic store builds
//! all of its SQL from these two.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};

use catalog_core::types::{Banner, Category, Entity, Product, SubofSub, Subcategory, Unit};

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

pub trait PgTable: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;
}

impl PgTable for Category {
    const TABLE: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &["uuid", "name", "description", "image"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.image.clone())
    }
}

impl PgTable for Subcategory {
    const TABLE: &'static str = "sub_category";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "name", "description", "image", "category"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.image.clone())
            .bind(self.category)
    }
}

impl PgTable for SubofSub {
    const TABLE: &'static str = "sub_of_sub";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "name", "description", "image", "sub_category"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.image.clone())
            .bind(self.sub_category)
    }
}

impl PgTable for Unit {
    const TABLE: &'static str = "unit";
    const COLUMNS: &'static [&'static str] = &["uuid", "name", "description"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
    }
}

impl PgTable for Product {
    const TABLE: &'static str = "product";
    const COLUMNS: &'static [&'static str] = &[
        "uuid",
        "name",
        "description",
        "price",
        "unit",
        "quantity",
        "image_one",
        "image_two",
        "image_three",
        "image_four",
        "image_five",
        "video",
        "status",
        "is_featured",
        "category",
        "sub_category",
        "sub_of_sub",
        "sold_by",
        "material",
        "brand",
        "color",
        "size",
        "warranty",
        "number_of_box",
        "features",
        "country_of_origin",
        "created",
    ];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.price)
            .bind(self.unit)
            .bind(self.quantity)
            .bind(self.image_one.clone())
            .bind(self.image_two.clone())
            .bind(self.image_three.clone())
            .bind(self.image_four.clone())
            .bind(self.image_five.clone())
            .bind(self.video.clone())
            .bind(self.status)
            .bind(self.is_featured)
            .bind(self.category)
            .bind(self.sub_category)
            .bind(self.sub_of_sub)
            .bind(self.sold_by.clone())
            .bind(self.material.clone())
            .bind(self.brand.clone())
            .bind(self.color.clone())
            .bind(self.size.clone())
            .bind(self.warranty)
            .bind(self.number_of_box)
            .bind(self.features.clone())
            .bind(self.country_of_origin.clone())
            .bind(self.created)
    }
}

impl PgTable for Banner {
    const TABLE: &'static str = "banner";
    const COLUMNS: &'static [&'static str] =
        &["uuid", "name", "description", "image", "is_status"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.uuid)
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.image.clone())
            .bind(self.is_status)
    }
}

// ── SQL builders ──────────────────────────────────────────────

pub(crate) fn column_list(columns: &[&str], alias: Option<&str>) -> String {
    match alias {
        Some(alias) => columns
            .iter()
            .map(|c| format!("{alias}.{c}"))
            .collect::<Vec<_>>()
            .join(", "),
        None => columns.join(", "),
    }
}

pub(crate) fn select_all_sql<E: PgTable>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY seq",
        column_list(E::COLUMNS, None),
        E::TABLE
    )
}

pub(crate) fn select_one_sql<E: PgTable>() -> String {
    format!(
        "SELECT {} FROM {} WHERE uuid = $1",
        column_list(E::COLUMNS, None),
        E::TABLE
    )
}

pub(crate) fn insert_sql<E: PgTable>() -> String {
    let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        E::TABLE,
        column_list(E::COLUMNS, None),
        placeholders.join(", ")
    )
}

/// `uuid` binds as `$1`, the remaining columns follow in order.
pub(crate) fn update_sql<E: PgTable>() -> String {
    let assignments: Vec<String> = E::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| format!("{c} = ${}", i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE uuid = $1",
        E::TABLE,
        assignments.join(", ")
    )
}

pub(crate) fn delete_sql<E: PgTable>() -> String {
    format!("DELETE FROM {} WHERE uuid = $1", E::TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_sql_for_unit() {
        assert_eq!(
            select_all_sql::<Unit>(),
            "SELECT uuid, name, description FROM unit ORDER BY seq"
        );
        assert_eq!(
            insert_sql::<Unit>(),
            "INSERT INTO unit (uuid, name, description) VALUES ($1, $2, $3)"
        );
        assert_eq!(
            update_sql::<Unit>(),
            "UPDATE unit SET name = $2, description = $3 WHERE uuid = $1"
        );
        assert_eq!(delete_sql::<Unit>(), "DELETE FROM unit WHERE uuid = $1");
    }

    #[test]
    fn update_sql_covers_every_product_column() {
        let sql = update_sql::<Product>();
        assert!(sql.contains("country_of_origin = $26"));
        assert!(sql.ends_with("created = $27 WHERE uuid = $1"));
    }

    #[test]
    fn aliased_column_list() {
        assert_eq!(
            column_list(Banner::COLUMNS, Some("b")),
            "b.uuid, b.name, b.description, b.image, b.is_status"
        );
    }
}
