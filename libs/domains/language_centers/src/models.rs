use chrono::{DateTime, Utc};
use directory_rules::{AuditContext, OrderedChild, validate_currency_code};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::LanguageCenterResult;
use crate::pricing::{
    PricingTerms, compute_discount_amount, compute_fee_per_week, compute_final_price,
    validate_money,
};

fn default_true() -> bool {
    true
}

fn default_limit() -> u64 {
    50
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Proficiency level a course targets
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "course_level")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CourseLevel {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "elementary")]
    Elementary,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "upper_intermediate")]
    UpperIntermediate,
    #[sea_orm(string_value = "advanced")]
    Advanced,
    #[default]
    #[sea_orm(string_value = "all_levels")]
    AllLevels,
}

// ===== Language center =====

/// Language school listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LanguageCenter {
    pub id: Uuid,
    /// English display name, unique among live language centers
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub slug: String,
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
pub struct CreateLanguageCenter {
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
    /// Generated from `name` when blank
    #[validate(length(max = 256))]
    pub slug: Option<String>,
    /// Generated from `name_ar` when blank
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
pub struct UpdateLanguageCenter {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub name_ar: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 4000))]
    pub description_ar: Option<String>,
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

/// Query filters for listing language centers
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct LanguageCenterFilter {
    /// Substring match on the English or Arabic name
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl Default for LanguageCenterFilter {
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

impl LanguageCenterFilter {
    pub fn matches(&self, center: &LanguageCenter) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !center.name.to_lowercase().contains(&needle) && !center.name_ar.contains(search) {
                return false;
            }
        }
        self.is_active.is_none_or(|v| center.is_active == v)
            && self.is_featured.is_none_or(|v| center.is_featured == v)
    }
}

impl LanguageCenter {
    pub fn new(
        input: CreateLanguageCenter,
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

    /// Applies every field except the slugs.
    pub fn apply_update(&mut self, update: UpdateLanguageCenter, ctx: &AuditContext) {
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
pub struct LanguageCenterFaq {
    pub id: Uuid,
    pub language_center_id: Uuid,
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
pub struct CreateLanguageCenterFaq {
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
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLanguageCenterFaq {
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

impl LanguageCenterFaq {
    pub fn new(
        language_center_id: Uuid,
        input: CreateLanguageCenterFaq,
        display_order: i32,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            language_center_id,
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

    pub fn apply_update(&mut self, update: UpdateLanguageCenterFaq, ctx: &AuditContext) {
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

// ===== Course =====

/// Course offered by a language center; priced per duration via [`CoursePricing`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LanguageCourse {
    pub id: Uuid,
    pub language_center_id: Uuid,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub level: CourseLevel,
    pub lessons_per_week: Option<i32>,
    pub max_class_size: Option<i32>,
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
pub struct CreateLanguageCourse {
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
    pub level: CourseLevel,
    #[validate(range(min = 1, max = 60))]
    pub lessons_per_week: Option<i32>,
    #[validate(range(min = 1, max = 500))]
    pub max_class_size: Option<i32>,
    pub display_order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLanguageCourse {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(max = 256))]
    pub name_ar: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 4000))]
    pub description_ar: Option<String>,
    pub level: Option<CourseLevel>,
    #[validate(range(min = 1, max = 60))]
    pub lessons_per_week: Option<i32>,
    #[validate(range(min = 1, max = 500))]
    pub max_class_size: Option<i32>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl LanguageCourse {
    pub fn new(
        language_center_id: Uuid,
        input: CreateLanguageCourse,
        display_order: i32,
        ctx: &AuditContext,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            language_center_id,
            name: input.name,
            name_ar: input.name_ar,
            description: input.description,
            description_ar: input.description_ar,
            level: input.level,
            lessons_per_week: input.lessons_per_week,
            max_class_size: input.max_class_size,
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

    pub fn apply_update(&mut self, update: UpdateLanguageCourse, ctx: &AuditContext) {
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
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(lessons_per_week) = update.lessons_per_week {
            self.lessons_per_week = Some(lessons_per_week);
        }
        if let Some(max_class_size) = update.max_class_size {
            self.max_class_size = Some(max_class_size);
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

// ===== Course pricing =====

/// Price of a course for one duration.
///
/// `fee_per_week` and `final_price` are always derived from the other fields
/// by [`CoursePricing::recalculate`]; clients cannot set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoursePricing {
    pub id: Uuid,
    pub language_course_id: Uuid,
    pub duration_weeks: i32,
    pub fee: Decimal,
    pub currency: String,
    pub fee_per_week: Option<Decimal>,
    pub has_discount: bool,
    /// Percentage between 0 and 100; takes precedence over `discount_amount`
    pub discount_percentage: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub final_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCoursePricing {
    #[validate(range(min = 1, max = 520))]
    pub duration_weeks: i32,
    #[validate(custom(function = "validate_money"))]
    pub fee: Decimal,
    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: String,
    #[serde(default)]
    pub has_discount: bool,
    pub discount_percentage: Option<Decimal>,
    #[validate(custom(function = "validate_money"))]
    pub discount_amount: Option<Decimal>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCoursePricing {
    #[validate(range(min = 1, max = 520))]
    pub duration_weeks: Option<i32>,
    #[validate(custom(function = "validate_money"))]
    pub fee: Option<Decimal>,
    #[validate(custom(function = "validate_currency_code"))]
    pub currency: Option<String>,
    pub has_discount: Option<bool>,
    pub discount_percentage: Option<Decimal>,
    #[validate(custom(function = "validate_money"))]
    pub discount_amount: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// One row of a bulk update, addressed by id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoursePricingUpdateItem {
    pub id: Uuid,
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: UpdateCoursePricing,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkCreateCoursePricing {
    #[validate(length(min = 1, max = 100), nested)]
    pub items: Vec<CreateCoursePricing>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkUpdateCoursePricing {
    #[validate(length(min = 1, max = 100), nested)]
    pub items: Vec<CoursePricingUpdateItem>,
}

/// Range is checked by the service so it can answer with `InvalidDiscountRange`.
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct ApplyDiscountRequest {
    pub discount_percentage: Decimal,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct PricingFilter {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedCount {
    pub deleted: u64,
}

impl CoursePricing {
    pub fn new(
        language_course_id: Uuid,
        input: CreateCoursePricing,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<Self> {
        let mut pricing = Self {
            id: Uuid::now_v7(),
            language_course_id,
            duration_weeks: input.duration_weeks,
            fee: input.fee,
            currency: input.currency,
            fee_per_week: None,
            has_discount: input.has_discount,
            discount_percentage: input.discount_percentage,
            discount_amount: input.discount_amount,
            final_price: input.fee,
            is_active: input.is_active,
            created_at: ctx.at,
            updated_at: ctx.at,
            created_by: ctx.actor_id,
            updated_by: ctx.actor_id,
            deleted_at: None,
        };
        pricing.recalculate()?;
        Ok(pricing)
    }

    pub fn apply_update(
        &mut self,
        update: UpdateCoursePricing,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        let amount_was_derived = self.terms().active_percentage().is_some();
        let explicit_amount = update.discount_amount.is_some();

        if let Some(duration_weeks) = update.duration_weeks {
            self.duration_weeks = duration_weeks;
        }
        if let Some(fee) = update.fee {
            self.fee = fee;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(has_discount) = update.has_discount {
            self.has_discount = has_discount;
        }
        if let Some(discount_percentage) = update.discount_percentage {
            self.discount_percentage = Some(discount_percentage);
        }
        if let Some(discount_amount) = update.discount_amount {
            self.discount_amount = Some(discount_amount);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }

        // An amount computed from a percentage that no longer applies is stale
        if amount_was_derived && !explicit_amount && self.terms().active_percentage().is_none() {
            self.discount_amount = None;
        }

        self.recalculate()?;
        self.touch(ctx);
        Ok(())
    }

    /// Sets the same percentage discount used by the course-wide discount action.
    pub fn apply_discount(
        &mut self,
        percentage: Decimal,
        ctx: &AuditContext,
    ) -> LanguageCenterResult<()> {
        self.has_discount = percentage > Decimal::ZERO;
        self.discount_percentage = Some(percentage);
        self.discount_amount = Some(compute_discount_amount(self.fee, percentage)?);
        self.recalculate()?;
        self.touch(ctx);
        Ok(())
    }

    pub fn terms(&self) -> PricingTerms {
        PricingTerms {
            fee: self.fee,
            has_discount: self.has_discount,
            discount_percentage: self.discount_percentage,
            discount_amount: self.discount_amount,
        }
    }

    /// Re-derives `fee_per_week`, `final_price` and, for percentage discounts,
    /// `discount_amount`.
    pub fn recalculate(&mut self) -> LanguageCenterResult<()> {
        let terms = self.terms();
        if let Some(amount) = terms.percentage_discount_amount()? {
            self.discount_amount = Some(amount);
        }
        self.fee_per_week = compute_fee_per_week(self.fee, self.duration_weeks);
        self.final_price = compute_final_price(&terms)?;
        Ok(())
    }

    pub fn touch(&mut self, ctx: &AuditContext) {
        self.updated_at = ctx.at;
        self.updated_by = ctx.actor_id;
    }
}

macro_rules! ordered_child {
    ($ty:ty) => {
        impl OrderedChild for $ty {
            fn id(&self) -> Uuid {
                self.id
            }

            fn parent_id(&self) -> Uuid {
                self.language_center_id
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

ordered_child!(LanguageCenterFaq);
ordered_child!(LanguageCourse);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pricing_input(weeks: i32, fee: Decimal) -> CreateCoursePricing {
        CreateCoursePricing {
            duration_weeks: weeks,
            fee,
            currency: "USD".to_string(),
            has_discount: false,
            discount_percentage: None,
            discount_amount: None,
            is_active: true,
        }
    }

    #[test]
    fn test_new_pricing_derives_fee_per_week_and_final_price() {
        let pricing = CoursePricing::new(
            Uuid::now_v7(),
            pricing_input(12, dec!(5000)),
            &AuditContext::system(),
        )
        .unwrap();

        assert_eq!(pricing.fee_per_week, Some(dec!(5000) / dec!(12)));
        assert_eq!(pricing.final_price, dec!(5000));
        assert_eq!(pricing.discount_amount, None);
    }

    #[test]
    fn test_update_recomputes_final_price() {
        let mut pricing = CoursePricing::new(
            Uuid::now_v7(),
            pricing_input(4, dec!(6000)),
            &AuditContext::system(),
        )
        .unwrap();

        pricing.apply_update(
            UpdateCoursePricing {
                has_discount: Some(true),
                discount_percentage: Some(dec!(20)),
                ..Default::default()
            },
            &AuditContext::system(),
        )
        .unwrap();

        assert_eq!(pricing.final_price, dec!(4800));
        assert_eq!(pricing.discount_amount, Some(dec!(1200)));
        assert_eq!(pricing.fee_per_week, Some(dec!(1500)));
    }

    #[test]
    fn test_apply_zero_discount_clears_flag() {
        let mut pricing = CoursePricing::new(
            Uuid::now_v7(),
            pricing_input(10, dec!(1000)),
            &AuditContext::system(),
        )
        .unwrap();

        pricing.apply_discount(dec!(0), &AuditContext::system()).unwrap();

        assert!(!pricing.has_discount);
        assert_eq!(pricing.discount_amount, Some(dec!(0)));
        assert_eq!(pricing.final_price, dec!(1000));
    }

    #[test]
    fn test_zeroing_percentage_drops_derived_amount() {
        let ctx = AuditContext::system();
        let mut input = pricing_input(10, dec!(1000));
        input.has_discount = true;
        input.discount_percentage = Some(dec!(20));
        let mut pricing = CoursePricing::new(Uuid::now_v7(), input, &ctx).unwrap();
        assert_eq!(pricing.discount_amount, Some(dec!(200)));

        pricing
            .apply_update(
                UpdateCoursePricing {
                    discount_percentage: Some(dec!(0)),
                    ..Default::default()
                },
                &ctx,
            )
            .unwrap();

        assert!(pricing.has_discount);
        assert_eq!(pricing.discount_amount, None);
        assert_eq!(pricing.final_price, dec!(1000));
    }

    #[test]
    fn test_switching_to_fixed_amount_keeps_given_amount() {
        let ctx = AuditContext::system();
        let mut input = pricing_input(10, dec!(1000));
        input.has_discount = true;
        input.discount_percentage = Some(dec!(20));
        let mut pricing = CoursePricing::new(Uuid::now_v7(), input, &ctx).unwrap();

        pricing
            .apply_update(
                UpdateCoursePricing {
                    discount_percentage: Some(dec!(0)),
                    discount_amount: Some(dec!(150)),
                    ..Default::default()
                },
                &ctx,
            )
            .unwrap();

        assert_eq!(pricing.discount_amount, Some(dec!(150)));
        assert_eq!(pricing.final_price, dec!(850));
    }

    #[test]
    fn test_pricing_dto_rejects_fee_out_of_range() {
        let mut input = pricing_input(4, Decimal::MAX);
        assert!(input.validate().is_err());

        input.fee = dec!(-1);
        assert!(input.validate().is_err());

        input.fee = dec!(1000);
        input.discount_amount = Some(Decimal::MAX);
        assert!(input.validate().is_err());

        let update = UpdateCoursePricing {
            fee: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_bulk_update_item_flattens_changes() {
        let id = Uuid::now_v7();
        let item: CoursePricingUpdateItem = serde_json::from_value(serde_json::json!({
            "id": id,
            "fee": "750.50"
        }))
        .unwrap();

        assert_eq!(item.id, id);
        assert_eq!(item.changes.fee, Some(dec!(750.50)));
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_course_level_wire_names() {
        assert_eq!(CourseLevel::UpperIntermediate.to_string(), "upper_intermediate");
        assert_eq!(
            serde_json::from_value::<CourseLevel>(serde_json::json!("all_levels")).unwrap(),
            CourseLevel::AllLevels
        );
    }
}
