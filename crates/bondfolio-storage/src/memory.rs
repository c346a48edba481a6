//! In-memory storage adapter.
//!
//! Data is not persisted across restarts. Useful for tests and for callers
//! that manage persistence themselves.

use std::sync::RwLock;

use uuid::Uuid;

use crate::adapter::{BondStore, StorageAdapter, UserStore};
use crate::error::{StorageError, StorageResult};
use crate::tables::Tables;
use crate::types::{BondRecord, BondUpdate, NewBond, NewUser, UserRecord, UserUpdate};

/// In-memory storage adapter.
///
/// Thread-safe through a single `RwLock` over all tables.
///
/// # Example
///
/// ```rust
/// use bondfolio_storage::{InMemoryStorage, UserStore};
///
/// let storage = InMemoryStorage::with_demo_users().unwrap();
/// let user = storage.find_by_credentials("emisor", "emisor123").unwrap().unwrap();
/// assert!(user.password.is_empty());
/// assert!(user.last_login.is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    tables: RwLock<Tables>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage seeded with the demo accounts.
    pub fn with_demo_users() -> StorageResult<Self> {
        Ok(Self {
            tables: RwLock::new(Tables::with_demo_users()?),
        })
    }

    /// Clears all data from storage.
    pub fn clear(&self) -> StorageResult<()> {
        *self.tables.write().map_err(StorageError::lock)? = Tables::default();
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StorageResult<T> {
        let tables = self.tables.read().map_err(StorageError::lock)?;
        Ok(f(&tables))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> StorageResult<T>) -> StorageResult<T> {
        let mut tables = self.tables.write().map_err(StorageError::lock)?;
        f(&mut tables)
    }
}

impl BondStore for InMemoryStorage {
    fn add_bond(&self, bond: NewBond) -> StorageResult<BondRecord> {
        self.write(|t| t.add_bond(bond))
    }

    fn get_bond(&self, id: Uuid) -> StorageResult<Option<BondRecord>> {
        self.read(|t| t.get_bond(id))
    }

    fn update_bond(&self, id: Uuid, update: BondUpdate) -> StorageResult<BondRecord> {
        self.write(|t| t.update_bond(id, update))
    }

    fn delete_bond(&self, id: Uuid) -> StorageResult<bool> {
        self.write(|t| Ok(t.delete_bond(id)))
    }

    fn list_bonds(&self) -> StorageResult<Vec<BondRecord>> {
        self.read(|t| t.bonds.clone())
    }
}

impl UserStore for InMemoryStorage {
    fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StorageResult<Option<UserRecord>> {
        self.write(|t| Ok(t.find_by_credentials(username, password)))
    }

    fn create_user(&self, user: NewUser) -> StorageResult<UserRecord> {
        self.write(|t| t.create_user(user))
    }

    fn update_user(&self, id: Uuid, update: UserUpdate) -> StorageResult<UserRecord> {
        self.write(|t| t.update_user(id, update))
    }

    fn get_user(&self, id: Uuid) -> StorageResult<Option<UserRecord>> {
        self.read(|t| t.get_user(id))
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<UserRecord>> {
        self.read(|t| t.get_user_by_username(username))
    }

    fn list_users(&self) -> StorageResult<Vec<UserRecord>> {
        self.read(Tables::list_users)
    }
}

impl StorageAdapter for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BondFilter, UserProfile};
    use bondfolio_bonds::BondTerms;
    use bondfolio_core::types::{Currency, Role};

    fn terms(coupon_rate: f64) -> BondTerms {
        BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(coupon_rate)
            .maturity_periods(4)
            .frequency(1)
            .market_rate(0.12)
            .build()
            .unwrap()
    }

    #[test]
    fn test_find_bonds_keeps_creation_order() {
        let storage = InMemoryStorage::new();
        for (name, currency) in [
            ("Soberano 2030", Currency::PEN),
            ("Corp 2029", Currency::USD),
            ("Soberano 2040", Currency::PEN),
        ] {
            storage
                .add_bond(NewBond::new(name, currency, terms(0.10)))
                .unwrap();
        }

        let filter = BondFilter {
            search: Some("soberano".into()),
            currency: Some(Currency::PEN),
            ..Default::default()
        };
        let names: Vec<_> = storage
            .find_bonds(&filter)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Soberano 2030", "Soberano 2040"]);
        assert_eq!(storage.find_bonds(&BondFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_bond_crud() {
        let storage = InMemoryStorage::new();

        let a = storage
            .add_bond(NewBond::new("A", Currency::PEN, terms(0.10)))
            .unwrap();
        let b = storage
            .add_bond(NewBond::new("B", Currency::USD, terms(0.08)))
            .unwrap();

        let names: Vec<_> = storage
            .list_bonds()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);

        let updated = storage
            .update_bond(
                a.id,
                BondUpdate {
                    name: Some("A2".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "A2");
        assert!(updated.updated_at >= a.updated_at);
        assert_eq!(updated.created_at, a.created_at);

        assert!(storage.delete_bond(b.id).unwrap());
        assert!(!storage.delete_bond(b.id).unwrap());
        assert!(storage.get_bond(b.id).unwrap().is_none());
        assert_eq!(storage.get_bond(a.id).unwrap().unwrap().name, "A2");
    }

    #[test]
    fn test_update_missing_bond() {
        let storage = InMemoryStorage::new();
        let err = storage
            .update_bond(Uuid::new_v4(), BondUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity_type: "Bond", .. }));
    }

    #[test]
    fn test_demo_logins() {
        let storage = InMemoryStorage::with_demo_users().unwrap();

        let admin = storage
            .find_by_credentials("admin", "admin123")
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Issuer);

        let investor = storage
            .find_by_credentials("inversor", "inversor123")
            .unwrap()
            .unwrap();
        assert_eq!(investor.role, Role::Investor);

        assert!(storage
            .find_by_credentials("emisor", "wrong")
            .unwrap()
            .is_none());
        assert!(storage
            .find_by_credentials("EMISOR", "emisor123")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_username() {
        let storage = InMemoryStorage::with_demo_users().unwrap();
        let mut user = crate::types::demo_users().remove(0);
        user.password = "other".to_string();

        assert!(matches!(
            storage.create_user(user),
            Err(StorageError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_update_user_profile() {
        let storage = InMemoryStorage::with_demo_users().unwrap();
        let user = storage.get_user_by_username("emisor").unwrap().unwrap();

        let profile = UserProfile::Issuer {
            company_name: Some("Empresa SAC".to_string()),
            ruc: Some("20123456789".to_string()),
            sector: None,
        };
        let updated = storage
            .update_user(
                user.id,
                UserUpdate {
                    profile: Some(profile.clone()),
                    password: Some("nuevo".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.profile, profile);
        assert!(updated.password.is_empty());

        assert!(storage
            .find_by_credentials("emisor", "nuevo")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_snapshot_blanks_passwords() {
        let storage = InMemoryStorage::with_demo_users().unwrap();
        storage
            .add_bond(NewBond::new("A", Currency::PEN, terms(0.10)))
            .unwrap();

        let snapshot = storage.export_snapshot().unwrap();
        assert_eq!(snapshot.bonds.len(), 1);
        assert_eq!(snapshot.users.len(), 3);
        assert!(snapshot.users.iter().all(|u| u.password.is_empty()));
    }

    #[test]
    fn test_clear() {
        let storage = InMemoryStorage::with_demo_users().unwrap();
        storage.clear().unwrap();
        assert!(storage.list_users().unwrap().is_empty());
    }
}
