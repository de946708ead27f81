//! Generic soft-delete aware repository over a SeaORM entity.
//!
//! Rows are never physically removed by the application: deleting stamps
//! `deleted_at`, and every read through [`BaseRepository::find_active`]
//! excludes stamped rows.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Select,
    SqlErr, TransactionTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// Entity with a UUID primary key and soft-delete/audit columns.
pub trait SoftDeleteEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn updated_by_column() -> Self::Column;
}

pub struct BaseRepository<E: SoftDeleteEntity> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: SoftDeleteEntity> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// `SELECT ... WHERE deleted_at IS NULL`
    pub fn find_active(&self) -> Select<E> {
        E::find().filter(E::deleted_at_column().is_null())
    }

    pub async fn find_active_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<Option<E::Model>, DbErr> {
        self.find_active()
            .filter(E::id_column().eq(id))
            .one(conn)
            .await
    }

    /// Whether any live row matches `condition`.
    pub async fn exists_active(&self, condition: Condition) -> Result<bool, DbErr> {
        let count = self.find_active().filter(condition).count(&self.db).await?;
        Ok(count > 0)
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: E::ActiveModel,
    ) -> Result<E::Model, DbErr> {
        model.insert(conn).await
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: E::ActiveModel,
    ) -> Result<E::Model, DbErr> {
        model.update(conn).await
    }

    /// Stamps `deleted_at` on the live row `id`. Returns false if there was none.
    pub async fn soft_delete<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        at: DateTime<Utc>,
        actor_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let affected = self
            .soft_delete_where(conn, Condition::all().add(E::id_column().eq(id)), at, actor_id)
            .await?;
        Ok(affected > 0)
    }

    /// Stamps `deleted_at` on every live row matching `condition`.
    pub async fn soft_delete_where<C: ConnectionTrait>(
        &self,
        conn: &C,
        condition: Condition,
        at: DateTime<Utc>,
        actor_id: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        let result = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(at))
            .col_expr(E::updated_at_column(), Expr::value(at))
            .col_expr(E::updated_by_column(), Expr::value(actor_id))
            .filter(E::deleted_at_column().is_null())
            .filter(condition)
            .exec(conn)
            .await?;

        tracing::debug!(rows = result.rows_affected, "Soft deleted rows");
        Ok(result.rows_affected)
    }

    /// Rewrites `order_column` for the given `(id, display_order)` pairs in one
    /// transaction. Every id must be a live child of `parent_id`; otherwise
    /// nothing is written and the first unknown id is returned.
    pub async fn reorder_children(
        &self,
        parent_column: E::Column,
        order_column: E::Column,
        parent_id: Uuid,
        items: &[(Uuid, i32)],
        at: DateTime<Utc>,
        actor_id: Option<Uuid>,
    ) -> Result<Option<Uuid>, DbErr> {
        let txn = self.db.begin().await?;

        for (id, display_order) in items {
            let result = E::update_many()
                .col_expr(order_column, Expr::value(*display_order))
                .col_expr(E::updated_at_column(), Expr::value(at))
                .col_expr(E::updated_by_column(), Expr::value(actor_id))
                .filter(E::id_column().eq(*id))
                .filter(parent_column.eq(parent_id))
                .filter(E::deleted_at_column().is_null())
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Ok(Some(*id));
            }
        }

        txn.commit().await?;
        Ok(None)
    }
}

/// Message of a unique-constraint violation, which for PostgreSQL names the
/// violated index.
pub fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_sql_errors_are_not_unique_violations() {
        assert_eq!(unique_violation(&DbErr::RecordNotFound("x".into())), None);
        assert_eq!(unique_violation(&DbErr::Custom("boom".into())), None);
    }
}
