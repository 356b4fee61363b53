//! HTTP handlers for memo-api.

pub mod notes;
pub mod pages;
pub mod tags;
