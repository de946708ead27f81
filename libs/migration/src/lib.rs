pub use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::{timestamp_with_time_zone, timestamp_with_time_zone_null, uuid_null};

mod m20260101_000000_bootstrap;
mod m20260101_000001_create_universities;
mod m20260101_000002_create_language_centers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_bootstrap::Migration),
            Box::new(m20260101_000001_create_universities::Migration),
            Box::new(m20260101_000002_create_language_centers::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Audit {
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
    DeletedAt,
}

/// Timestamps, actor columns and the soft-delete marker shared by every directory table.
fn audit_columns(table: &mut TableCreateStatement) {
    table
        .col(timestamp_with_time_zone(Audit::CreatedAt).default(Expr::current_timestamp()))
        .col(timestamp_with_time_zone(Audit::UpdatedAt).default(Expr::current_timestamp()))
        .col(uuid_null(Audit::CreatedBy))
        .col(uuid_null(Audit::UpdatedBy))
        .col(timestamp_with_time_zone_null(Audit::DeletedAt));
}

/// Unique index restricted to rows that are not soft-deleted.
///
/// sea-query cannot express the `WHERE` clause, so the statement is raw SQL.
async fn partial_unique_index(
    manager: &SchemaManager<'_>,
    name: &str,
    table: &str,
    columns: &str,
) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {name} ON {table} ({columns}) WHERE deleted_at IS NULL"
        ))
        .await?;
    Ok(())
}

async fn touch_trigger(manager: &SchemaManager<'_>, table: &str) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"
            CREATE TRIGGER {table}_touch_updated_at
                BEFORE UPDATE ON {table}
                FOR EACH ROW
                EXECUTE FUNCTION util.touch_updated_at()
            "#
        ))
        .await?;
    Ok(())
}

/// Slugs of a live row may not equal another live row's slug in the other
/// language. Same-column clashes are left to the unique indexes.
async fn cross_slug_trigger(manager: &SchemaManager<'_>, table: &str) -> Result<(), DbErr> {
    manager
        .get_connection()
        .execute_unprepared(&format!(
            r#"
            CREATE TRIGGER {table}_guard_cross_slugs
                BEFORE INSERT OR UPDATE OF slug, slug_ar, deleted_at ON {table}
                FOR EACH ROW
                EXECUTE FUNCTION util.guard_cross_column_slugs()
            "#
        ))
        .await?;
    Ok(())
}
