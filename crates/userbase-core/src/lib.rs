//! # Userbase Core
//!
//! Core types shared by every Userbase crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`query_options`]: Translation of raw list query parameters into a
//!   normalized pagination/sort/filter directive
//!
//! # Example
//!
//! ```ignore
//! use userbase_core::errors::AppError;
//! use userbase_core::query_options::{ListOptions, ListOptionsQuery};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//!
//! let options = ListOptions::from(&ListOptionsQuery::default());
//! assert_eq!(options.limit, 10);
//! ```

pub mod errors;
pub mod query_options;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use query_options::{FilterClause, ListOptions, ListOptionsQuery};
