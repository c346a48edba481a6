//! Backend-independent record tables.
//!
//! Both backends keep a [`Tables`] value behind a lock; the file backend also
//! serializes it as its on-disk document.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::types::{
    demo_users, BondRecord, BondUpdate, NewBond, NewUser, UserRecord, UserUpdate,
};

/// All records, each table in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Tables {
    #[serde(default)]
    pub bonds: Vec<BondRecord>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl Tables {
    /// Tables holding only the demo accounts.
    pub fn with_demo_users() -> StorageResult<Self> {
        let mut tables = Self::default();
        for user in demo_users() {
            tables.create_user(user)?;
        }
        Ok(tables)
    }

    // =========================================================================
    // BONDS
    // =========================================================================

    pub fn add_bond(&mut self, bond: NewBond) -> StorageResult<BondRecord> {
        let record = bond.into_record()?;
        self.bonds.push(record.clone());
        Ok(record)
    }

    pub fn get_bond(&self, id: Uuid) -> Option<BondRecord> {
        self.bonds.iter().find(|b| b.id == id).cloned()
    }

    pub fn update_bond(&mut self, id: Uuid, update: BondUpdate) -> StorageResult<BondRecord> {
        let record = self
            .bonds
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StorageError::not_found("Bond", id))?;
        record.apply(update)?;
        Ok(record.clone())
    }

    pub fn delete_bond(&mut self, id: Uuid) -> bool {
        let before = self.bonds.len();
        self.bonds.retain(|b| b.id != id);
        self.bonds.len() != before
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub fn find_by_credentials(&mut self, username: &str, password: &str) -> Option<UserRecord> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.username == username && u.password == password)?;
        user.last_login = Some(Utc::now());
        Some(user.without_password())
    }

    pub fn create_user(&mut self, user: NewUser) -> StorageResult<UserRecord> {
        let record = user.into_record()?;
        if self.users.iter().any(|u| u.username == record.username) {
            return Err(StorageError::DuplicateKey {
                entity_type: "User",
                key: record.username,
            });
        }
        let public = record.without_password();
        self.users.push(record);
        Ok(public)
    }

    pub fn update_user(&mut self, id: Uuid, update: UserUpdate) -> StorageResult<UserRecord> {
        let record = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StorageError::not_found("User", id))?;
        record.apply(update)?;
        Ok(record.without_password())
    }

    pub fn get_user(&self, id: Uuid) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(UserRecord::without_password)
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users
            .iter()
            .find(|u| u.username == username)
            .map(UserRecord::without_password)
    }

    pub fn list_users(&self) -> Vec<UserRecord> {
        self.users.iter().map(UserRecord::without_password).collect()
    }
}
