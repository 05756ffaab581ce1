//! Column resolution for provider rosters.
//!
//! Roster files name their columns freely (`Town`, `session_cost`,
//! `THERAPIST`, ...). This crate maps those headers onto the fixed
//! [`CanonicalField`](tf_model::CanonicalField) set using ordered alias
//! lists and case-insensitive matching.
//!
//! # Example
//!
//! ```
//! use tf_map::resolve_columns;
//! use tf_model::CanonicalField;
//!
//! let headers = vec!["Town".to_string(), "Fee".to_string()];
//! let mapping = resolve_columns(&headers);
//! assert_eq!(mapping.get(CanonicalField::City), Some("Town"));
//! assert_eq!(mapping.get(CanonicalField::Price), Some("Fee"));
//! ```

#![deny(unsafe_code)]

mod aliases;
mod error;
mod resolver;

pub use aliases::AliasTable;
pub use error::{MapError, Result};
pub use resolver::{ColumnResolution, ColumnResolver, resolve_columns};
