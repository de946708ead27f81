use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::LanguageCenterFaq;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "language_center_faqs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub language_center_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub question_ar: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    #[sea_orm(column_type = "Text")]
    pub answer_ar: String,
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
        belongs_to = "super::language_center::Entity",
        from = "Column::LanguageCenterId",
        to = "super::language_center::Column::Id",
        on_delete = "Cascade"
    )]
    LanguageCenter,
}

impl Related<super::language_center::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LanguageCenter.def()
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

impl From<Model> for LanguageCenterFaq {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            language_center_id: model.language_center_id,
            question: model.question,
            question_ar: model.question_ar,
            answer: model.answer,
            answer_ar: model.answer_ar,
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

impl From<LanguageCenterFaq> for ActiveModel {
    fn from(faq: LanguageCenterFaq) -> Self {
        ActiveModel {
            id: Set(faq.id),
            language_center_id: Set(faq.language_center_id),
            question: Set(faq.question),
            question_ar: Set(faq.question_ar),
            answer: Set(faq.answer),
            answer_ar: Set(faq.answer_ar),
            display_order: Set(faq.display_order),
            is_published: Set(faq.is_published),
            created_at: Set(faq.created_at.into()),
            updated_at: Set(faq.updated_at.into()),
            created_by: Set(faq.created_by),
            updated_by: Set(faq.updated_by),
            deleted_at: Set(faq.deleted_at.map(Into::into)),
        }
    }
}
