use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::CoursePricing;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_pricings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub language_course_id: Uuid,
    pub duration_weeks: i32,
    #[sea_orm(column_type = "Decimal(None)")]
    pub fee: Decimal,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub fee_per_week: Option<Decimal>,
    pub has_discount: bool,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub discount_percentage: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub discount_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(None)")]
    pub final_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::LanguageCourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }
    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }
    fn updated_by_column() -> Column {
        Column::UpdatedBy
    }
}

impl From<Model> for CoursePricing {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            language_course_id: model.language_course_id,
            duration_weeks: model.duration_weeks,
            fee: model.fee,
            currency: model.currency,
            fee_per_week: model.fee_per_week,
            has_discount: model.has_discount,
            discount_percentage: model.discount_percentage,
            discount_amount: model.discount_amount,
            final_price: model.final_price,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<CoursePricing> for ActiveModel {
    fn from(pricing: CoursePricing) -> Self {
        ActiveModel {
            id: Set(pricing.id),
            language_course_id: Set(pricing.language_course_id),
            duration_weeks: Set(pricing.duration_weeks),
            fee: Set(pricing.fee),
            currency: Set(pricing.currency),
            fee_per_week: Set(pricing.fee_per_week),
            has_discount: Set(pricing.has_discount),
            discount_percentage: Set(pricing.discount_percentage),
            discount_amount: Set(pricing.discount_amount),
            final_price: Set(pricing.final_price),
            is_active: Set(pricing.is_active),
            created_at: Set(pricing.created_at.into()),
            updated_at: Set(pricing.updated_at.into()),
            created_by: Set(pricing.created_by),
            updated_by: Set(pricing.updated_by),
            deleted_at: Set(pricing.deleted_at.map(Into::into)),
        }
    }
}
