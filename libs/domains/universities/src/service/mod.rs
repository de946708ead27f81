//! Managers for universities and their child records.
//!
//! Child services check that the owning university is live before writing
//! and share the display-order rules in [`directory_rules::ordering`].

mod content;
mod faq;
mod program;
mod university;

pub use content::UniversityContentService;
pub use faq::UniversityFaqService;
pub use program::UniversityProgramService;
pub use university::{UniversityLookup, UniversityService};

use uuid::Uuid;

use crate::error::{UniversityError, UniversityResult};
use crate::repository::UniversityRepository;

async fn ensure_university<U>(universities: &U, university_id: Uuid) -> UniversityResult<()>
where
    U: UniversityRepository + ?Sized,
{
    match universities.get_by_id(university_id).await? {
        Some(_) => Ok(()),
        None => Err(UniversityError::ParentNotFound(university_id)),
    }
}

fn validation_error(errors: validator::ValidationErrors) -> UniversityError {
    UniversityError::Validation(errors.to_string())
}
