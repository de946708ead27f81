use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{ContentType, UniversityContent};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "university_contents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub university_id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub title_ar: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "Text")]
    pub body_ar: String,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::university::Entity",
        from = "Column::UniversityId",
        to = "super::university::Column::Id",
        on_delete = "Cascade"
    )]
    University,
}

impl Related<super::university::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::University.def()
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

impl From<Model> for UniversityContent {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            university_id: model.university_id,
            content_type: model.content_type,
            title: model.title,
            title_ar: model.title_ar,
            body: model.body,
            body_ar: model.body_ar,
            display_order: model.display_order,
            is_published: model.is_published,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<UniversityContent> for ActiveModel {
    fn from(content: UniversityContent) -> Self {
        ActiveModel {
            id: Set(content.id),
            university_id: Set(content.university_id),
            content_type: Set(content.content_type),
            title: Set(content.title),
            title_ar: Set(content.title_ar),
            body: Set(content.body),
            body_ar: Set(content.body_ar),
            display_order: Set(content.display_order),
            is_published: Set(content.is_published),
            created_at: Set(content.created_at.into()),
            updated_at: Set(content.updated_at.into()),
            created_by: Set(content.created_by),
            updated_by: Set(content.updated_by),
            deleted_at: Set(content.deleted_at.map(Into::into)),
        }
    }
}
