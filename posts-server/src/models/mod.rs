//! Domain models with validation at construction
//!
//! All client input is checked before it reaches the database.
//! Invalid input returns ValidationErrors, not panic.

pub mod validation;
pub mod post;
pub mod pagination;

pub use validation::{PostField, ValidationError, ValidationErrors};
pub use post::{NewPost, Post, PostId, PostPayload};
pub use pagination::{Paginated, Pagination, DEFAULT_LIMIT};
