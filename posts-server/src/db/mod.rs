//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Every client value is bound, never interpolated into statement text
//! - Existence is read from rows affected where one statement suffices
//! - Transactions for multi-step operations

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
