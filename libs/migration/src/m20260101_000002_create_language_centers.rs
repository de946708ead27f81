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
                    .as_enum(CourseLevel::Enum)
                    .values(course_levels())
                    .to_owned(),
            )
            .await?;

        let mut centers = Table::create();
        centers
            .table(LanguageCenters::Table)
            .if_not_exists()
            .col(pk_uuid(LanguageCenters::Id))
            .col(string(LanguageCenters::Name))
            .col(string(LanguageCenters::NameAr))
            .col(text(LanguageCenters::Description).default(""))
            .col(text(LanguageCenters::DescriptionAr).default(""))
            .col(string(LanguageCenters::Slug))
            .col(string_null(LanguageCenters::SlugAr))
            .col(string(LanguageCenters::City).default(""))
            .col(string(LanguageCenters::CityAr).default(""))
            .col(string(LanguageCenters::Country).default(""))
            .col(string_null(LanguageCenters::WebsiteUrl))
            .col(string_null(LanguageCenters::LogoUrl))
            .col(decimal_len_null(LanguageCenters::Rating, 3, 2))
            .col(boolean(LanguageCenters::IsActive).default(true))
            .col(boolean(LanguageCenters::IsFeatured).default(false))
            .col(integer(LanguageCenters::DisplayOrder).default(0));
        audit_columns(&mut centers);
        manager.create_table(centers.to_owned()).await?;

        let mut faqs = Table::create();
        faqs.table(LanguageCenterFaqs::Table)
            .if_not_exists()
            .col(pk_uuid(LanguageCenterFaqs::Id))
            .col(uuid(LanguageCenterFaqs::LanguageCenterId))
            .col(text(LanguageCenterFaqs::Question))
            .col(text(LanguageCenterFaqs::QuestionAr))
            .col(text(LanguageCenterFaqs::Answer))
            .col(text(LanguageCenterFaqs::AnswerAr))
            .col(integer(LanguageCenterFaqs::DisplayOrder).default(0))
            .col(boolean(LanguageCenterFaqs::IsPublished).default(true))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_language_center_faqs_center")
                    .from(LanguageCenterFaqs::Table, LanguageCenterFaqs::LanguageCenterId)
                    .to(LanguageCenters::Table, LanguageCenters::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut faqs);
        manager.create_table(faqs.to_owned()).await?;

        let mut courses = Table::create();
        courses
            .table(LanguageCourses::Table)
            .if_not_exists()
            .col(pk_uuid(LanguageCourses::Id))
            .col(uuid(LanguageCourses::LanguageCenterId))
            .col(string(LanguageCourses::Name))
            .col(string(LanguageCourses::NameAr).default(""))
            .col(text(LanguageCourses::Description).default(""))
            .col(text(LanguageCourses::DescriptionAr).default(""))
            .col(
                ColumnDef::new(LanguageCourses::Level)
                    .enumeration(CourseLevel::Enum, course_levels())
                    .not_null()
                    .default("all_levels"),
            )
            .col(integer_null(LanguageCourses::LessonsPerWeek))
            .col(integer_null(LanguageCourses::MaxClassSize))
            .col(integer(LanguageCourses::DisplayOrder).default(0))
            .col(boolean(LanguageCourses::IsActive).default(true))
            .col(boolean(LanguageCourses::IsFeatured).default(false))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_language_courses_center")
                    .from(LanguageCourses::Table, LanguageCourses::LanguageCenterId)
                    .to(LanguageCenters::Table, LanguageCenters::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut courses);
        manager.create_table(courses.to_owned()).await?;

        // Computed price columns keep full precision; rounding is a display concern
        let mut pricings = Table::create();
        pricings
            .table(CoursePricings::Table)
            .if_not_exists()
            .col(pk_uuid(CoursePricings::Id))
            .col(uuid(CoursePricings::LanguageCourseId))
            .col(integer(CoursePricings::DurationWeeks))
            .col(decimal(CoursePricings::Fee))
            .col(string_len(CoursePricings::Currency, 3).default("USD"))
            .col(decimal_null(CoursePricings::FeePerWeek))
            .col(boolean(CoursePricings::HasDiscount).default(false))
            .col(decimal_null(CoursePricings::DiscountPercentage))
            .col(decimal_null(CoursePricings::DiscountAmount))
            .col(decimal(CoursePricings::FinalPrice))
            .col(boolean(CoursePricings::IsActive).default(true))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_course_pricings_course")
                    .from(CoursePricings::Table, CoursePricings::LanguageCourseId)
                    .to(LanguageCourses::Table, LanguageCourses::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        audit_columns(&mut pricings);
        manager.create_table(pricings.to_owned()).await?;

        for (table, column) in [
            ("language_center_faqs", "language_center_id"),
            ("language_courses", "language_center_id"),
            ("course_pricings", "language_course_id"),
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

        partial_unique_index(manager, "uq_language_centers_name", "language_centers", "name")
            .await?;
        partial_unique_index(manager, "uq_language_centers_slug", "language_centers", "slug")
            .await?;
        partial_unique_index(
            manager,
            "uq_language_centers_slug_ar",
            "language_centers",
            "slug_ar",
        )
        .await?;
        cross_slug_trigger(manager, "language_centers").await?;
        partial_unique_index(
            manager,
            "uq_course_pricings_duration",
            "course_pricings",
            "language_course_id, duration_weeks",
        )
        .await?;

        for table in [
            "language_centers",
            "language_center_faqs",
            "language_courses",
            "course_pricings",
        ] {
            touch_trigger(manager, table).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoursePricings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LanguageCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LanguageCenterFaqs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LanguageCenters::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(CourseLevel::Enum).to_owned())
            .await?;

        Ok(())
    }
}

fn course_levels() -> [CourseLevel; 6] {
    [
        CourseLevel::Beginner,
        CourseLevel::Elementary,
        CourseLevel::Intermediate,
        CourseLevel::UpperIntermediate,
        CourseLevel::Advanced,
        CourseLevel::AllLevels,
    ]
}

#[derive(DeriveIden)]
enum LanguageCenters {
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
enum LanguageCenterFaqs {
    Table,
    Id,
    LanguageCenterId,
    Question,
    QuestionAr,
    Answer,
    AnswerAr,
    DisplayOrder,
    IsPublished,
}

#[derive(DeriveIden)]
enum LanguageCourses {
    Table,
    Id,
    LanguageCenterId,
    Name,
    NameAr,
    Description,
    DescriptionAr,
    Level,
    LessonsPerWeek,
    MaxClassSize,
    DisplayOrder,
    IsActive,
    IsFeatured,
}

#[derive(DeriveIden)]
enum CoursePricings {
    Table,
    Id,
    LanguageCourseId,
    DurationWeeks,
    Fee,
    Currency,
    FeePerWeek,
    HasDiscount,
    DiscountPercentage,
    DiscountAmount,
    FinalPrice,
    IsActive,
}

#[derive(DeriveIden, Clone, Copy)]
enum CourseLevel {
    #[sea_orm(iden = "course_level")]
    Enum,
    #[sea_orm(iden = "beginner")]
    Beginner,
    #[sea_orm(iden = "elementary")]
    Elementary,
    #[sea_orm(iden = "intermediate")]
    Intermediate,
    #[sea_orm(iden = "upper_intermediate")]
    UpperIntermediate,
    #[sea_orm(iden = "advanced")]
    Advanced,
    #[sea_orm(iden = "all_levels")]
    AllLevels,
}
