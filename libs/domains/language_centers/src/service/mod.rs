mod course;
mod faq;
mod language_center;
mod pricing;

pub use course::LanguageCourseService;
pub use faq::LanguageCenterFaqService;
pub use language_center::{LanguageCenterLookup, LanguageCenterService};
pub use pricing::CoursePricingService;

use uuid::Uuid;

use crate::error::{LanguageCenterError, LanguageCenterResult};
use crate::repository::LanguageCenterRepository;

async fn ensure_center<U>(centers: &U, language_center_id: Uuid) -> LanguageCenterResult<()>
where
    U: LanguageCenterRepository + ?Sized,
{
    match centers.get_by_id(language_center_id).await? {
        Some(_) => Ok(()),
        None => Err(LanguageCenterError::ParentNotFound(language_center_id)),
    }
}

fn validation_error(errors: validator::ValidationErrors) -> LanguageCenterError {
    LanguageCenterError::Validation(errors.to_string())
}
