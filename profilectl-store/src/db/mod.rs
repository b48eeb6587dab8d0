//! Database layer - connection pool and the profile repository
//!
//! # Design Principles
//!
//! - Connection pool passed in explicitly - no global handle
//! - One statement per operation - no transactions, no retries
//! - Rely on DB constraints - no check-then-insert
//! - Driver errors returned unmodified

pub mod pool;
pub mod repos;
mod rows;

pub use pool::{create_pool, create_pool_with_options, PoolSettings};
pub use repos::ProfileRepo;
