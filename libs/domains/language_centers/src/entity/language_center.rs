use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::LanguageCenter;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "language_centers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub name_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    pub slug: String,
    pub slug_ar: Option<String>,
    pub city: String,
    pub city_ar: String,
    pub country: String,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub rating: Option<Decimal>,
    pub is_active: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::faq::Entity")]
    Faq,
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
}

impl Related<super::faq::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faq.def()
    }
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

impl From<Model> for LanguageCenter {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            name_ar: model.name_ar,
            description: model.description,
            description_ar: model.description_ar,
            slug: model.slug,
            slug_ar: model.slug_ar,
            city: model.city,
            city_ar: model.city_ar,
            country: model.country,
            website_url: model.website_url,
            logo_url: model.logo_url,
            rating: model.rating,
            is_active: model.is_active,
            is_featured: model.is_featured,
            display_order: model.display_order,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            created_by: model.created_by,
            updated_by: model.updated_by,
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<LanguageCenter> for ActiveModel {
    fn from(center: LanguageCenter) -> Self {
        ActiveModel {
            id: Set(center.id),
            name: Set(center.name),
            name_ar: Set(center.name_ar),
            description: Set(center.description),
            description_ar: Set(center.description_ar),
            slug: Set(center.slug),
            slug_ar: Set(center.slug_ar),
            city: Set(center.city),
            city_ar: Set(center.city_ar),
            country: Set(center.country),
            website_url: Set(center.website_url),
            logo_url: Set(center.logo_url),
            rating: Set(center.rating),
            is_active: Set(center.is_active),
            is_featured: Set(center.is_featured),
            display_order: Set(center.display_order),
            created_at: Set(center.created_at.into()),
            updated_at: Set(center.updated_at.into()),
            created_by: Set(center.created_by),
            updated_by: Set(center.updated_by),
            deleted_at: Set(center.deleted_at.map(Into::into)),
        }
    }
}
