//! JSON-file storage adapter.
//!
//! The whole store is one JSON document. Every mutation is applied to a copy
//! of the tables, written to a temporary file and renamed over the original;
//! only then does the in-memory copy change. The file is created on the first
//! mutation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use uuid::Uuid;

use crate::adapter::{BondStore, StorageAdapter, UserStore};
use crate::error::{StorageError, StorageResult};
use crate::tables::Tables;
use crate::types::{BondRecord, BondUpdate, NewBond, NewUser, UserRecord, UserUpdate};

/// File name used inside a data directory.
pub const DATA_FILE_NAME: &str = "bondfolio.json";

/// JSON-file storage adapter.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    tables: RwLock<Tables>,
}

impl FileStorage {
    /// Opens the store at `path`.
    ///
    /// A missing file starts a fresh store seeded with the demo accounts.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        let tables = match fs::read_to_string(&path) {
            Ok(contents) => {
                let tables: Tables = serde_json::from_str(&contents)?;
                log::debug!(
                    "opened {} ({} bonds, {} users)",
                    path.display(),
                    tables.bonds.len(),
                    tables.users.len()
                );
                tables
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no store at {}, starting with demo users", path.display());
                Tables::with_demo_users()?
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            tables: RwLock::new(tables),
        })
    }

    /// Opens `bondfolio.json` inside a data directory.
    pub fn open_in_dir(dir: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open(dir.as_ref().join(DATA_FILE_NAME))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StorageResult<T> {
        let tables = self.tables.read().map_err(StorageError::lock)?;
        Ok(f(&tables))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> StorageResult<T>) -> StorageResult<T> {
        let mut tables = self.tables.write().map_err(StorageError::lock)?;

        let mut next = tables.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *tables = next;

        Ok(out)
    }

    fn persist(&self, tables: &Tables) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(tables)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                log::warn!("could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }

        log::trace!("wrote {}", self.path.display());
        Ok(())
    }
}

impl BondStore for FileStorage {
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
        if self.read(|t| t.get_bond(id).is_none())? {
            return Ok(false);
        }
        self.write(|t| Ok(t.delete_bond(id)))
    }

    fn list_bonds(&self) -> StorageResult<Vec<BondRecord>> {
        self.read(|t| t.bonds.clone())
    }
}

impl UserStore for FileStorage {
    fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StorageResult<Option<UserRecord>> {
        let known = self.read(|t| {
            t.users
                .iter()
                .any(|u| u.username == username && u.password == password)
        })?;
        if !known {
            return Ok(None);
        }
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

impl StorageAdapter for FileStorage {
    fn backend_name(&self) -> &'static str {
        "file"
    }
}
