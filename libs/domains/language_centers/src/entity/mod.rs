//! SeaORM entities for the language center tables.

pub mod course;
pub mod course_pricing;
pub mod faq;
pub mod language_center;
