use database::SoftDeleteEntity;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{DegreeLevel, UniversityProgram};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "university_programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub university_id: Uuid,
    pub name: String,
    pub name_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    pub degree_level: DegreeLevel,
    pub duration_months: Option<i32>,
    #[sea_orm(column_type = "Decimal(None)", nullable)]
    pub tuition_fee: Option<Decimal>,
    pub currency: String,
    pub teaching_language: String,
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

impl From<Model> for UniversityProgram {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            university_id: model.university_id,
            name: model.name,
            name_ar: model.name_ar,
            description: model.description,
            description_ar: model.description_ar,
            degree_level: model.degree_level,
            duration_months: model.duration_months,
            tuition_fee: model.tuition_fee,
            currency: model.currency,
            teaching_language: model.teaching_language,
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

impl From<UniversityProgram> for ActiveModel {
    fn from(program: UniversityProgram) -> Self {
        ActiveModel {
            id: Set(program.id),
            university_id: Set(program.university_id),
            name: Set(program.name),
            name_ar: Set(program.name_ar),
            description: Set(program.description),
            description_ar: Set(program.description_ar),
            degree_level: Set(program.degree_level),
            duration_months: Set(program.duration_months),
            tuition_fee: Set(program.tuition_fee),
            currency: Set(program.currency),
            teaching_language: Set(program.teaching_language),
            display_order: Set(program.display_order),
            is_active: Set(program.is_active),
            is_featured: Set(program.is_featured),
            created_at: Set(program.created_at.into()),
            updated_at: Set(program.updated_at.into()),
            created_by: Set(program.created_by),
            updated_by: Set(program.updated_by),
            deleted_at: Set(program.deleted_at.map(Into::into)),
        }
    }
}
