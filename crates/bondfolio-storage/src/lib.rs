//! Bondfolio Storage Layer
//!
//! Persistence for bond definitions and user accounts.
//!
//! # Features
//!
//! - **Bond Store**: add, get, update, delete, list and filter bond definitions
//! - **User Store**: credential lookup, registration and profile updates
//! - **Snapshots**: point-in-time JSON backups with passwords removed
//! - **Multiple Backends**: a JSON file and an in-memory adapter
//!
//! # Example
//!
//! ```rust
//! use bondfolio_bonds::BondTerms;
//! use bondfolio_core::Currency;
//! use bondfolio_storage::{BondStore, InMemoryStorage, NewBond};
//!
//! let storage = InMemoryStorage::new();
//! let terms = BondTerms::builder()
//!     .nominal_value(1000.0)
//!     .coupon_rate(0.10)
//!     .maturity_periods(4)
//!     .frequency(1)
//!     .market_rate(0.12)
//!     .build()
//!     .unwrap();
//!
//! let record = storage
//!     .add_bond(NewBond::new("Corp 2029", Currency::PEN, terms))
//!     .unwrap();
//! assert_eq!(storage.get_bond(record.id).unwrap().unwrap().name, "Corp 2029");
//! ```
//!
//! # Storage Backends
//!
//! ## FileStorage
//!
//! One JSON document, rewritten atomically on every change. A new store
//! starts with the demo accounts `emisor`, `inversor` and `admin`.
//!
//! ## InMemoryStorage
//!
//! A simple in-memory implementation for testing and development.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod file;
mod memory;
mod tables;
mod types;

pub use adapter::{BondStore, StorageAdapter, UserStore};
pub use error::{StorageError, StorageResult};
pub use file::{FileStorage, DATA_FILE_NAME};
pub use memory::InMemoryStorage;
pub use types::{
    demo_users, BondFilter, BondRecord, BondUpdate, InvestorType, NewBond, NewUser, RiskProfile,
    Snapshot, UserProfile, UserRecord, UserUpdate,
};
