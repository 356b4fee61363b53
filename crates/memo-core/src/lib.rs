//! # memo-core
//!
//! Core types, traits, and abstractions for the memo note-taking service.
//!
//! This crate provides the data structures and repository traits that the
//! storage and HTTP crates depend on.

pub mod error;
pub mod models;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{is_unique_violation, Error, Result};
pub use models::*;
pub use tags::parse_tag_string;
pub use traits::*;
