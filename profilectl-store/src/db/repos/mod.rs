//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses LEFT JOINs so users without a profile still appear
//! - Lets unique/foreign-key constraints reject bad writes
//! - Issues exactly one statement per method

pub mod profiles;

pub use profiles::ProfileRepo;
