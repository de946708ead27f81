//! Rules shared by every directory aggregate (universities, language centers).
//!
//! - [`slug`]: URL slug generation for English and Arabic names
//! - [`uniqueness`]: name/slug uniqueness checks over a storage lookup
//! - [`ordering`]: display-order reorder payloads and defaults
//! - [`audit`]: who/when context passed into every mutation
//! - [`upload`]: validation policy for logo and brochure uploads
//! - [`query`]: availability, featured and child-listing query strings
//! - [`validation`]: currency code and rating rules

pub mod audit;
pub mod ordering;
pub mod query;
pub mod slug;
pub mod uniqueness;
pub mod upload;
pub mod validation;

pub use audit::AuditContext;
pub use ordering::{
    DisplayOrderItem, OrderedChild, ReorderRequest, apply_reorder, live_children,
    max_display_order, next_display_order,
};
pub use slug::{generate_slug, resolve_slug};
pub use uniqueness::{UniqueFieldLookup, UniquenessError, UniquenessValidator, UniquenessViolation};
pub use query::{
    ActiveFilter, Availability, FeaturedQuery, NameAvailabilityQuery, PublishedFilter,
    SlugAvailabilityQuery,
};
pub use upload::{UploadDescriptor, UploadError, UploadPolicy};
pub use validation::{is_valid_rating, validate_currency_code};
