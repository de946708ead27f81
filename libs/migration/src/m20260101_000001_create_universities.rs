use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::{audit_columns, cross_slug_trigger, partial_unique_index, touch_trigger};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ContentType::Enum)
                    .values(content_types())
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(DegreeLevel::Enum)
                    .values(degree_levels())
                    .to_owned(),
            )
            .await?;

        let mut universities = Table::create();
        universities
            .table(Universities::Table)
            .if_not_exists()
            .col(pk_uuid(Universities::Id))
            .col(string(Universities::Name))
            .col(string(Universities::NameAr))
            .col(text(Universities::Description).default(""))
            .col(text(Universities::DescriptionAr).default(""))
            .col(string(Universities::Slug))
            .col(string_null(Universities::SlugAr))
            .col(string(Universities::City).default(""))
            .col(string(Universities::CityAr).default(""))
            .col(string(Universities::Country).default(""))
            .col(string_null(Universities::WebsiteUrl))
            .col(string_null(Universities::LogoUrl))
            .col(decimal_len_null(Universities::Rating, 3, 2))
            .col(boolean(Universities::IsActive).default(true))
            .col(boolean(Universities::IsFeatured).default(false))
            .col(integer(Universities::DisplayOrder).default(0));
        audit_columns(&mut universities);
        manager.create_table(universities.to_owned()).await?;

        let mut faqs = Table::create();
        faqs.table(UniversityFaqs::Table)
            .if_not_exists()
            .col(pk_uuid(UniversityFaqs::Id))
            .col(uuid(UniversityFaqs::UniversityId))
            .col(text(UniversityFaqs::Question))
            .col(text(UniversityFaqs::QuestionAr))
            .col(text(UniversityFaqs::Answer))
            .col(text(UniversityFaqs::AnswerAr))
            .col(integer(UniversityFaqs::DisplayOrder).default(0))
            .col(boolean(UniversityFaqs::IsPublished).default(true))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_university_faqs_university")
                    .from(UniversityFaqs::Table, UniversityFaqs::UniversityId)
                    .to(Universities::Table, Universities::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut faqs);
        manager.create_table(faqs.to_owned()).await?;

        let mut contents = Table::create();
        contents
            .table(UniversityContents::Table)
            .if_not_exists()
            .col(pk_uuid(UniversityContents::Id))
            .col(uuid(UniversityContents::UniversityId))
            .col(
                ColumnDef::new(UniversityContents::ContentType)
                    .enumeration(ContentType::Enum, content_types())
                    .not_null(),
            )
            .col(string(UniversityContents::Title))
            .col(string(UniversityContents::TitleAr))
            .col(text(UniversityContents::Body))
            .col(text(UniversityContents::BodyAr))
            .col(integer(UniversityContents::DisplayOrder).default(0))
            .col(boolean(UniversityContents::IsPublished).default(true))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_university_contents_university")
                    .from(UniversityContents::Table, UniversityContents::UniversityId)
                    .to(Universities::Table, Universities::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut contents);
        manager.create_table(contents.to_owned()).await?;

        let mut programs = Table::create();
        programs
            .table(UniversityPrograms::Table)
            .if_not_exists()
            .col(pk_uuid(UniversityPrograms::Id))
            .col(uuid(UniversityPrograms::UniversityId))
            .col(string(UniversityPrograms::Name))
            .col(string(UniversityPrograms::NameAr))
            .col(text(UniversityPrograms::Description).default(""))
            .col(text(UniversityPrograms::DescriptionAr).default(""))
            .col(
                ColumnDef::new(UniversityPrograms::DegreeLevel)
                    .enumeration(DegreeLevel::Enum, degree_levels())
                    .not_null()
                    .default("bachelor"),
            )
            .col(integer_null(UniversityPrograms::DurationMonths))
            .col(decimal_len_null(UniversityPrograms::TuitionFee, 12, 2))
            .col(string_len(UniversityPrograms::Currency, 3).default("USD"))
            .col(string(UniversityPrograms::TeachingLanguage).default(""))
            .col(integer(UniversityPrograms::DisplayOrder).default(0))
            .col(boolean(UniversityPrograms::IsActive).default(true))
            .col(boolean(UniversityPrograms::IsFeatured).default(false))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_university_programs_university")
                    .from(UniversityPrograms::Table, UniversityPrograms::UniversityId)
                    .to(Universities::Table, Universities::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut programs);
        manager.create_table(programs.to_owned()).await?;

        for (table, column) in [
            ("university_faqs", "university_id"),
            ("university_contents", "university_id"),
            ("university_programs", "university_id"),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_{}", table, column))
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .to_owned(),
                )
                .await?;
        }

        // Uniqueness only applies to rows that are not soft-deleted
        partial_unique_index(manager, "uq_universities_name", "universities", "name").await?;
        partial_unique_index(manager, "uq_universities_slug", "universities", "slug").await?;
        partial_unique_index(manager, "uq_universities_slug_ar", "universities", "slug_ar").await?;
        cross_slug_trigger(manager, "universities").await?;
        partial_unique_index(
            manager,
            "uq_university_contents_type",
            "university_contents",
            "university_id, content_type",
        )
        .await?;

        for table in [
            "universities",
            "university_faqs",
            "university_contents",
            "university_programs",
        ] {
            touch_trigger(manager, table).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UniversityPrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UniversityContents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UniversityFaqs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Universities::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(DegreeLevel::Enum).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(ContentType::Enum).to_owned())
            .await?;

        Ok(())
    }
}

fn content_types() -> [ContentType; 7] {
    [
        ContentType::Overview,
        ContentType::Admission,
        ContentType::Facilities,
        ContentType::StudentLife,
        ContentType::Scholarships,
        ContentType::Accommodation,
        ContentType::Contact,
    ]
}

fn degree_levels() -> [DegreeLevel; 5] {
    [
        DegreeLevel::Foundation,
        DegreeLevel::Diploma,
        DegreeLevel::Bachelor,
        DegreeLevel::Master,
        DegreeLevel::Doctorate,
    ]
}

#[derive(DeriveIden)]
enum Universities {
    Table,
    Id,
    Name,
    NameAr,
    Description,
    DescriptionAr,
    Slug,
    SlugAr,
    City,
    CityAr,
    Country,
    WebsiteUrl,
    LogoUrl,
    Rating,
    IsActive,
    IsFeatured,
    DisplayOrder,
}

#[derive(DeriveIden)]
enum UniversityFaqs {
    Table,
    Id,
    UniversityId,
    Question,
    QuestionAr,
    Answer,
    AnswerAr,
    DisplayOrder,
    IsPublished,
}

#[derive(DeriveIden)]
enum UniversityContents {
    Table,
    Id,
    UniversityId,
    ContentType,
    Title,
    TitleAr,
    Body,
    BodyAr,
    DisplayOrder,
    IsPublished,
}

#[derive(DeriveIden)]
enum UniversityPrograms {
    Table,
    Id,
    UniversityId,
    Name,
    NameAr,
    Description,
    DescriptionAr,
    DegreeLevel,
    DurationMonths,
    TuitionFee,
    Currency,
    TeachingLanguage,
    DisplayOrder,
    IsActive,
    IsFeatured,
}

#[derive(DeriveIden, Clone, Copy)]
enum ContentType {
    #[sea_orm(iden = "university_content_type")]
    Enum,
    #[sea_orm(iden = "overview")]
    Overview,
    #[sea_orm(iden = "admission")]
    Admission,
    #[sea_orm(iden = "facilities")]
    Facilities,
    #[sea_orm(iden = "student_life")]
    StudentLife,
    #[sea_orm(iden = "scholarships")]
    Scholarships,
    #[sea_orm(iden = "accommodation")]
    Accommodation,
    #[sea_orm(iden = "contact")]
    Contact,
}

#[derive(DeriveIden, Clone, Copy)]
enum DegreeLevel {
    #[sea_orm(iden = "degree_level")]
    Enum,
    #[sea_orm(iden = "foundation")]
    Foundation,
    #[sea_orm(iden = "diploma")]
    Diploma,
    #[sea_orm(iden = "bachelor")]
    Bachelor,
    #[sea_orm(iden = "master")]
    Master,
    #[sea_orm(iden = "doctorate")]
    Doctorate,
}
