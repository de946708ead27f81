use chrono::{DateTime, Utc};
use directory_rules::{AuditContext, OrderedChild, validate_currency_code};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

fn default_true() -> bool {
    true
}

fn default_limit() -> u64 {
    50
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_teaching_language() -> String {
    "English".to_string()
}

/// Kind of descriptive section shown on a university page
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "university_content_type")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentType {
    #[sea_orm(string_value = "overview")]
    Overview,
    #[sea_orm(string_value = "admission")]
    Admission,
    #[sea_orm(string_value = "facilities")]
    Facilities,
    #[sea_orm(string_value = "student_life")]
    StudentLife,
    #[sea_orm(string_value = "scholarships")]
    Scholarships,
    #[sea_orm(string_value = "accommodation")]
    Accommodation,
    #[sea_orm(string_value = "contact")]
    Contact,
}

/// Academic level a program leads to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "degree_level")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DegreeLevel {
    #[sea_orm(string_value = "foundation")]
    Foundation,
    #[sea_orm(string_value = "diploma")]
    Diploma,
    #[default]
    #[sea_orm(string_value = "bachelor")]
    Bachelor,
    #[sea_orm(string_value = "master")]
    Master,
    #[sea_orm(string_value = "doctorate")]
    Doctorate,
}

// ===== University =====

/// University listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct University {
    pub id: Uuid,
    /// English display name, unique among live universities
    pub name: String,
    /// Arabic display name
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    /// URL slug, generated from `name` when not supplied
    pub slug: String,
    /// Arabic URL slug, generated from `name_ar` when not supplied
    pub slug_ar: Option<String>,
    pub city: String,
    pub city_ar: String,
    pub country: String,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    /// Average rating between 0 and 5
    pub rating: Option<Decimal>,
    pub is_active: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUniversity {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 256))]
    pub name_ar: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description_ar: String,
    #[validate(length(max = 256))]
    pub slug: Option<String>,
    #[validate(length(max = 256))]
    pub slug_ar: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 128))]
    pub city_ar: String,
    #[validate(length(min = 1, max = 128))]
    pub country: String,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    pub rating: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUniversity {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub name_ar: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 4000))]
    pub description_ar: Option<String>,
    /// New slug; normalized and checked for uniqueness
    #[validate(length(min = 1, max = 256))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub slug_ar: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub city: Option<String>,
    #[validate(length(max = 128))]
    pub city_ar: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub country: Option<String>,
    #[validate(url)]
    pub website_url: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    pub rating: Option<Decimal>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

/// Query filters for listing universities
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct UniversityFilter {
    /// Substring match on the English or Arabic name
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for UniversityFilter {
    fn default() -> Self {
        Self {
            search: None,
            is_active: None,
            is_featured: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl UniversityFilter {
    /// Whether `university` passes every set criterion (paging aside).
    pub fn matches(&self, university: &University) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !university.name.to_lowercase().contains(&needle)
                && !university.name_ar.contains(search)
            {
                return false;
            }
        }
        self.is_active.is_none_or(|v| university.is_active == v)
            && self.is_featured.is_none_or(|v| university.is_featured == v)
    }
}

impl University {
    /// Builds a new record; slugs are resolved by the caller.
    pub fn new(
        input: CreateUniversity,
        slug: String,
        slug_ar: Option<String>,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            name_ar: input.name_ar,
            description: input.description,
            description_ar: input.description_ar,
            slug,
            slug_ar,
            city: input.city,
            city_ar: input.city_ar,
            country: input.country,
            website_url: input.website_url,
            logo_url: input.logo_url,
            rating: input.rating,
            is_active: input.is_active,
            is_featured: input.is_featured,
            display_order: input.display_order,
            created_at: ctx.at,
            updated_at: ctx.at,
            created_by: ctx.actor_id,
            updated_by: ctx.actor_id,
            deleted_at: None,
        }
    }

    /// Applies every field except the slugs, which the service normalizes.
    pub fn apply_update(&mut self, update: UpdateUniversity, ctx: &AuditContext) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(name_ar) = update.name_ar {
            self.name_ar = name_ar;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(description_ar) = update.description_ar {
            self.description_ar = description_ar;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(city_ar) = update.city_ar {
            self.city_ar = city_ar;
        }
        if let Some(country) = update.country {
            self.country = country;
        }
        if let Some(website_url) = update.website_url {
            self.website_url = Some(website_url);
        }
        if let Some(logo_url) = update.logo_url {
            self.logo_url = Some(logo_url);
        }
        if let Some(rating) = update.rating {
            self.rating = Some(rating);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        self.touch(ctx);
    }

    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_at = ctx.at;
        self.updated_by = ctx.actor_id;
    }

    pub fn has_slug(&self, slug: &str) -> bool {
        self.slug == slug || self.slug_ar.as_deref() == Some(slug)
    }
}

// ===== FAQ =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversityFaq {
    pub id: Uuid,
    pub university_id: Uuid,
    pub question: String,
    pub question_ar: String,
    pub answer: String,
    pub answer_ar: String,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUniversityFaq {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub question_ar: String,
    #[validate(length(min = 1, max = 8000))]
    pub answer: String,
    #[serde(default)]
    #[validate(length(max = 8000))]
    pub answer_ar: String,
    /// Appended after the last FAQ when omitted
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUniversityFaq {
    #[validate(length(min = 1, max = 1000))]
    pub question: Option<String>,
    #[validate(length(max = 1000))]
    pub question_ar: Option<String>,
    #[validate(length(min = 1, max = 8000))]
    pub answer: Option<String>,
    #[validate(length(max = 8000))]
    pub answer_ar: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: Option<bool>,
}

impl UniversityFaq {
    pub fn new(
        university_id: Uuid,
        input: CreateUniversityFaq,
        display_order: i32,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            university_id,
            question: input.question,
            question_ar: input.question_ar,
            answer: input.answer,
            answer_ar: input.answer_ar,
            display_order,
            is_published: input.is_published,
            created_at: ctx.at,
            updated_at: ctx.at,
            created_by: ctx.actor_id,
            updated_by: ctx.actor_id,
            deleted_at: None,
        }
    }

    pub fn apply_update(&mut self, update: UpdateUniversityFaq, ctx: &AuditContext) {
        if let Some(question) = update.question {
            self.question = question;
        }
        if let Some(question_ar) = update.question_ar {
            self.question_ar = question_ar;
        }
        if let Some(answer) = update.answer {
            self.answer = answer;
        }
        if let Some(answer_ar) = update.answer_ar {
            self.answer_ar = answer_ar;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        if let Some(is_published) = update.is_published {
            self.is_published = is_published;
        }
        self.touch(ctx);
    }

    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_at = ctx.at;
        self.updated_by = ctx.actor_id;
    }
}

// ===== Content =====

/// One descriptive section of a university page; at most one per type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversityContent {
    pub id: Uuid,
    pub university_id: Uuid,
    pub content_type: ContentType,
    pub title: String,
    pub title_ar: String,
    pub body: String,
    pub body_ar: String,
    pub display_order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUniversityContent {
    pub content_type: ContentType,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub title_ar: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_ar: String,
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUniversityContent {
    /// Moving a section to another type is checked for duplicates
    pub content_type: Option<ContentType>,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(max = 256))]
    pub title_ar: Option<String>,
    pub body: Option<String>,
    pub body_ar: Option<String>,
    pub display_order: Option<i32>,
    pub is_published: Option<bool>,
}

impl UniversityContent {
    pub fn new(
        university_id: Uuid,
        input: CreateUniversityContent,
        display_order: i32,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            university_id,
            content_type: input.content_type,
            title: input.title,
            title_ar: input.title_ar,
            body: input.body,
            body_ar: input.body_ar,
            display_order,
            is_published: input.is_published,
            created_at: ctx.at,
            updated_at: ctx.at,
            created_by: ctx.actor_id,
            updated_by: ctx.actor_id,
            deleted_at: None,
        }
    }

    pub fn apply_update(&mut self, update: UpdateUniversityContent, ctx: &AuditContext) {
        if let Some(content_type) = update.content_type {
            self.content_type = content_type;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(title_ar) = update.title_ar {
            self.title_ar = title_ar;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(body_ar) = update.body_ar {
            self.body_ar = body_ar;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        if let Some(is_published) = update.is_published {
            self.is_published = is_published;
        }
        self.touch(ctx);
    }

    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_at = ctx.at;
        self.updated_by = ctx.actor_id;
    }
}

// ===== Program =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UniversityProgram {
    pub id: Uuid,
    pub university_id: Uuid,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub degree_level: DegreeLevel,
    pub duration_months: Option<i32>,
    /// Yearly tuition in `currency`
    pub tuition_fee: Option<Decimal>,
    pub currency: String,
    pub teaching_language: String,
    pub display_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUniversityProgram {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 256))]
    pub name_ar: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description_ar: String,
    #[serde(default)]
    pub degree_level: DegreeLevel,
    #[validate(range(min = 1, max = 240))]
    pub duration_months: Option<i32>,
    pub tuition_fee: Option<Decimal>,
    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    #[serde(default = "default_teaching_language")]
    #[validate(length(min = 1, max = 64))]
    pub teaching_language: String,
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUniversityProgram {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub name_ar: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 4000))]
    pub description_ar: Option<String>,
    pub degree_level: Option<DegreeLevel>,
    #[validate(range(min = 1, max = 240))]
    pub duration_months: Option<i32>,
    pub tuition_fee: Option<Decimal>,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub teaching_language: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl UniversityProgram {
    pub fn new(
        university_id: Uuid,
        input: CreateUniversityProgram,
        display_order: i32,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            university_id,
            name: input.name,
            name_ar: input.name_ar,
            description: input.description,
            description_ar: input.description_ar,
            degree_level: input.degree_level,
            duration_months: input.duration_months,
            tuition_fee: input.tuition_fee,
            currency: input.currency,
            teaching_language: input.teaching_language,
            display_order,
            is_active: input.is_active,
            is_featured: input.is_featured,
            created_at: ctx.at,
            updated_at: ctx.at,
            created_by: ctx.actor_id,
            updated_by: ctx.actor_id,
            deleted_at: None,
        }
    }

    pub fn apply_update(&mut self, update: UpdateUniversityProgram, ctx: &AuditContext) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(name_ar) = update.name_ar {
            self.name_ar = name_ar;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(description_ar) = update.description_ar {
            self.description_ar = description_ar;
        }
        if let Some(degree_level) = update.degree_level {
            self.degree_level = degree_level;
        }
        if let Some(duration_months) = update.duration_months {
            self.duration_months = Some(duration_months);
        }
        if let Some(tuition_fee) = update.tuition_fee {
            self.tuition_fee = Some(tuition_fee);
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(teaching_language) = update.teaching_language {
            self.teaching_language = teaching_language;
        }
        if let Some(display_order) = update.display_order {
            self.display_order = display_order;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        self.touch(ctx);
    }

    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_at = ctx.at;
        self.updated_by = ctx.actor_id;
    }
}

macro_rules! ordered_child {
    ($ty:ty, $parent:ident) => {
        impl OrderedChild for $ty {
            fn id(&self) -> Uuid {
                self.id
            }

            fn parent_id(&self) -> Uuid {
                self.$parent
            }

            fn display_order(&self) -> i32 {
                self.display_order
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn is_deleted(&self) -> bool {
                self.deleted_at.is_some()
            }

            fn reposition(&mut self, display_order: i32, ctx: &AuditContext) {
                self.display_order = display_order;
                self.touch(ctx);
            }
        }
    };
}

ordered_child!(UniversityFaq, university_id);
ordered_child!(UniversityContent, university_id);
ordered_child!(UniversityProgram, university_id);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_input() -> CreateUniversity {
        CreateUniversity {
            name: "Cairo University".to_string(),
            name_ar: "جامعة القاهرة".to_string(),
            description: String::new(),
            description_ar: String::new(),
            slug: None,
            slug_ar: None,
            city: "Giza".to_string(),
            city_ar: "الجيزة".to_string(),
            country: "Egypt".to_string(),
            website_url: Some("https://cu.edu.eg".to_string()),
            logo_url: None,
            rating: Some(dec!(4.2)),
            is_active: true,
            is_featured: false,
            display_order: 0,
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(create_input().validate().is_ok());

        let mut input = create_input();
        input.name = String::new();
        assert!(input.validate().is_err());

        let mut input = create_input();
        input.website_url = Some("not a url".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_slugs_and_stamps_actor() {
        let ctx = AuditContext::system();
        let mut university =
            University::new(create_input(), "cairo-university".to_string(), None, &ctx);
        let actor = Uuid::now_v7();

        university.apply_update(
            UpdateUniversity {
                name: Some("Cairo Univ.".to_string()),
                slug: Some("ignored-here".to_string()),
                ..Default::default()
            },
            &AuditContext::new(Some(actor)),
        );

        assert_eq!(university.name, "Cairo Univ.");
        assert_eq!(university.slug, "cairo-university");
        assert_eq!(university.updated_by, Some(actor));
        assert_eq!(university.created_by, None);
    }

    #[test]
    fn test_filter_matches_english_and_arabic_names() {
        let university = University::new(
            create_input(),
            "cairo-university".to_string(),
            Some("جامعة-القاهرة".to_string()),
            &AuditContext::system(),
        );

        let by_english = UniversityFilter {
            search: Some("cairo".to_string()),
            ..Default::default()
        };
        let by_arabic = UniversityFilter {
            search: Some("القاهرة".to_string()),
            ..Default::default()
        };
        let featured = UniversityFilter {
            is_featured: Some(true),
            ..Default::default()
        };

        assert!(by_english.matches(&university));
        assert!(by_arabic.matches(&university));
        assert!(!featured.matches(&university));
        assert!(university.has_slug("جامعة-القاهرة"));
    }

    #[test]
    fn test_program_currency_must_be_iso_code() {
        let input: CreateUniversityProgram = serde_json::from_value(serde_json::json!({
            "name": "Computer Science",
            "currency": "usd"
        }))
        .unwrap();
        assert!(input.validate().is_err());

        let input: CreateUniversityProgram = serde_json::from_value(serde_json::json!({
            "name": "Computer Science"
        }))
        .unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.currency, "USD");
        assert_eq!(input.degree_level, DegreeLevel::Bachelor);
    }

    #[test]
    fn test_content_type_wire_names() {
        assert_eq!(ContentType::StudentLife.to_string(), "student_life");
        assert_eq!(
            serde_json::to_value(ContentType::Accommodation).unwrap(),
            serde_json::json!("accommodation")
        );
        assert_eq!("admission".parse::<ContentType>().unwrap(), ContentType::Admission);
    }
}
