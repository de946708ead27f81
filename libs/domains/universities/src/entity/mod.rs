//! SeaORM entities for the university tables.

pub mod content;
pub mod faq;
pub mod program;
pub mod university;
