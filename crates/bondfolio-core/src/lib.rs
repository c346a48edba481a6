//! # Bondfolio Core
//!
//! Core types and abstractions shared by every Bondfolio crate.
//!
//! This crate provides:
//!
//! - **Types**: `Currency`, `GraceType`, `InterestType`, `Role`
//! - **Rates**: Nominal/effective and periodic/annual interest rate conversions
//! - **Errors**: The `CoreError` type used by the conversions and parsers
//!
//! ## Example
//!
//! ```rust
//! use bondfolio_core::prelude::*;
//!
//! // 12% nominal, compounded monthly
//! let effective = nominal_to_effective(0.12, 12).unwrap();
//! assert!((effective - 0.126825).abs() < 1e-6);
//!
//! let interest = InterestType::Nominal { capitalization: 12 };
//! assert_eq!(interest.effective_rate(0.12).unwrap(), effective);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::rates::{
        effective_to_nominal, effective_to_periodic, nominal_to_effective, periodic_to_effective,
    };
    pub use crate::types::{Currency, GraceType, InterestKind, InterestType, Role};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Currency, GraceType, InterestKind, InterestType, Role};
