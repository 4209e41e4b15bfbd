//! Core types and trait definitions for the Candidate Hub.
//!
//! This crate has no HTTP or database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod cache;
pub mod candidate;
pub mod dto;
pub mod error;
pub mod mapping;
pub mod store;

pub use error::{Result, ValidationError};
