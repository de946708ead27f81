use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // gen_random_uuid() for ad-hoc inserts
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pgcrypto")
            .await?;

        db.execute_unprepared("CREATE SCHEMA IF NOT EXISTS util")
            .await?;

        // Keeps updated_at honest for writes that bypass the repositories
        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION util.touch_updated_at()
            RETURNS TRIGGER AS $$
            BEGIN
                NEW.updated_at = NOW();
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
            "#,
        )
        .await?;

        // Per-column indexes cannot see a slug that equals another row's slug
        // in the other language. The raised names share the index prefixes so
        // callers map them the same way.
        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION util.guard_cross_column_slugs()
            RETURNS TRIGGER AS $$
            DECLARE
                clash text;
            BEGIN
                IF NEW.deleted_at IS NOT NULL THEN
                    RETURN NEW;
                END IF;

                -- One slug writer per table, so concurrent inserts see each other
                PERFORM pg_advisory_xact_lock(hashtext(TG_TABLE_SCHEMA || '.' || TG_TABLE_NAME));

                EXECUTE format(
                    'SELECT CASE WHEN slug_ar = $2 THEN %L ELSE %L END FROM %I.%I
                      WHERE id <> $1 AND deleted_at IS NULL AND (slug_ar = $2 OR slug = $3)
                      LIMIT 1',
                    'uq_' || TG_TABLE_NAME || '_slug_cross',
                    'uq_' || TG_TABLE_NAME || '_slug_ar_cross',
                    TG_TABLE_SCHEMA,
                    TG_TABLE_NAME)
                INTO clash
                USING NEW.id, NEW.slug, NEW.slug_ar;

                IF clash IS NOT NULL THEN
                    RAISE EXCEPTION 'duplicate key value violates unique constraint "%"', clash
                        USING ERRCODE = 'unique_violation';
                END IF;

                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared("DROP FUNCTION IF EXISTS util.guard_cross_column_slugs()")
            .await?;
        db.execute_unprepared("DROP FUNCTION IF EXISTS util.touch_updated_at()")
            .await?;
        db.execute_unprepared("DROP SCHEMA IF EXISTS util CASCADE")
            .await?;

        Ok(())
    }
}
