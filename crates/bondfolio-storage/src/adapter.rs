//! Storage traits.
//!
//! [`BondStore`] and [`UserStore`] are the collaborators the application
//! layer works against; [`StorageAdapter`] ties them to a concrete backend.

use chrono::Utc;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{
    BondFilter, BondRecord, BondUpdate, NewBond, NewUser, Snapshot, UserRecord, UserUpdate,
};

/// Persistence for bond definitions.
pub trait BondStore: Send + Sync {
    /// Validates and stores a new bond.
    fn add_bond(&self, bond: NewBond) -> StorageResult<BondRecord>;

    /// Retrieves a bond by ID.
    fn get_bond(&self, id: Uuid) -> StorageResult<Option<BondRecord>>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// Fails with `NotFound` if the bond does not exist.
    fn update_bond(&self, id: Uuid, update: BondUpdate) -> StorageResult<BondRecord>;

    /// Deletes a bond, returning whether it existed.
    fn delete_bond(&self, id: Uuid) -> StorageResult<bool>;

    /// Lists all bonds in creation order.
    fn list_bonds(&self) -> StorageResult<Vec<BondRecord>>;

    /// Lists the bonds matching `filter`, in creation order.
    fn find_bonds(&self, filter: &BondFilter) -> StorageResult<Vec<BondRecord>> {
        let mut bonds = self.list_bonds()?;
        bonds.retain(|bond| filter.matches(bond));
        Ok(bonds)
    }
}

/// Persistence for user accounts.
///
/// Every record returned has its password blanked.
pub trait UserStore: Send + Sync {
    /// Looks up a user by exact username and password.
    ///
    /// On a match `last_login` is set to now.
    fn find_by_credentials(&self, username: &str, password: &str)
        -> StorageResult<Option<UserRecord>>;

    /// Registers a user. Usernames are unique.
    fn create_user(&self, user: NewUser) -> StorageResult<UserRecord>;

    /// Applies a partial update.
    fn update_user(&self, id: Uuid, update: UserUpdate) -> StorageResult<UserRecord>;

    /// Retrieves a user by ID.
    fn get_user(&self, id: Uuid) -> StorageResult<Option<UserRecord>>;

    /// Retrieves a user by username.
    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<UserRecord>>;

    /// Lists all users in registration order.
    fn list_users(&self) -> StorageResult<Vec<UserRecord>>;
}

/// A complete storage backend.
pub trait StorageAdapter: BondStore + UserStore {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Takes a point-in-time copy of every bond and user.
    fn export_snapshot(&self) -> StorageResult<Snapshot> {
        Ok(Snapshot {
            bonds: self.list_bonds()?,
            users: self.list_users()?,
            exported_at: Utc::now(),
        })
    }
}
