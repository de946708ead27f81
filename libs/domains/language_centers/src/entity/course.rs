use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CourseLevel, LanguageCourse};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "language_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub language_center_id: Uuid,
    pub name: String,
    pub name_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    pub level: CourseLevel,
    pub lessons_per_week: Option<i32>,
    pub max_class_size: Option<i32>,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::language_center::Entity",
        from = "Column::LanguageCenterId",
        to = "super::language_center::Column::Id",
        on_delete = "Cascade"
    )]
    LanguageCenter,
    #[sea_orm(has_many = "super::course_pricing::Entity")]
    Pricing,
}

impl Related<super::language_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LanguageCenter.def()
    }
}

impl Related<super::course_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pricing.def()
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

impl From<Model> for LanguageCourse {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            language_center_id: model.language_center_id,
            name: model.name,
            name_ar: model.name_ar,
            description: model.description,
            description_ar: model.description_ar,
            level: model.level,
            lessons_per_week: model.lessons_per_week,
            max_class_size: model.max_class_size,
            display_order: model.display_order,
            is_active: model.is_active,
            is_featured: model.is_featured,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<LanguageCourse> for ActiveModel {
    fn from(course: LanguageCourse) -> Self {
        ActiveModel {
            id: Set(course.id),
            language_center_id: Set(course.language_center_id),
            name: Set(course.name),
            name_ar: Set(course.name_ar),
            description: Set(course.description),
            description_ar: Set(course.description_ar),
            level: Set(course.level),
            lessons_per_week: Set(course.lessons_per_week),
            max_class_size: Set(course.max_class_size),
            display_order: Set(course.display_order),
            is_active: Set(course.is_active),
            is_featured: Set(course.is_featured),
            created_at: Set(course.created_at.into()),
            updated_at: Set(course.updated_at.into()),
            created_by: Set(course.created_by),
            updated_by: Set(course.updated_by),
            deleted_at: Set(course.deleted_at.map(Into::into)),
        }
    }
}
