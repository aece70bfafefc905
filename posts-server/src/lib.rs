//! posts-server: HTTP/JSON API for blog posts
//!
//! Lists (paginated, filtered, searched), fetches, creates, replaces and
//! deletes rows of a single PostgreSQL `posts` table.

pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ServerConfig, ServerError};
