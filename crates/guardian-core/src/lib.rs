//! Guardian Core
//!
//! Shared types for the Guardian privacy engine:
//! - The closed `Category` enumeration of sensitive data kinds
//! - Per-category tallies (`CategoryCounts`)
//! - The error type used by every engine crate

pub mod category;
pub mod error;

pub use category::{Category, CategoryCounts};
pub use error::{Error, Result};
