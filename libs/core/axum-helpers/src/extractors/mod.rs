//! Custom extractors for Axum handlers.

pub mod request_actor;
pub mod uuid_path;
pub mod validated_json;

pub use request_actor::{ACTOR_HEADER, RequestActor};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
