//! JSON file document store for installations and clients.
//!
//! Whole-file semantics: the aggregate is loaded once into an in-memory
//! cache, mutated there, and rewritten in full on every save. Last writer
//! wins; there is no partial update and no transaction log. On first run the
//! file is seeded from the bundled demo payload.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Client, Installation, MaintenanceDb};

/// Default store file name, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "manutenzioni_db.json";

const BUNDLED_DB: &str = include_str!("../static/manutenzioni_db.json");

/// Errors surfaced by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    cache: RwLock<MaintenanceDb>,
}

impl JsonStore {
    /// Open the store at `path`, seeding it from the bundled demo database
    /// when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        seed_if_missing(&path)?;

        let content = fs::read_to_string(&path)?;
        let db: MaintenanceDb = serde_json::from_str(&content)?;
        log::info!(
            "Store loaded from {} ({} installations, {} clients)",
            path.display(),
            db.installations.len(),
            db.clients.len()
        );

        Ok(Self {
            path,
            cache: RwLock::new(db),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of all installations.
    pub fn installations(&self) -> Vec<Installation> {
        self.cache.read().installations.clone()
    }

    /// Look up one installation by its business key.
    pub fn installation(&self, code: &str) -> Option<Installation> {
        self.cache
            .read()
            .installations
            .iter()
            .find(|i| i.code == code)
            .cloned()
    }

    /// Insert or replace an installation, keyed by code, and persist.
    pub fn save_installation(&self, installation: Installation) -> Result<(), StoreError> {
        let mut db = self.cache.write();
        match db
            .installations
            .iter_mut()
            .find(|i| i.code == installation.code)
        {
            Some(existing) => *existing = installation,
            None => db.installations.push(installation),
        }
        self.persist(&db)
    }

    /// Remove an installation by code and persist. Unknown codes are a no-op.
    pub fn delete_installation(&self, code: &str) -> Result<(), StoreError> {
        let mut db = self.cache.write();
        db.installations.retain(|i| i.code != code);
        self.persist(&db)
    }

    /// Snapshot of all clients.
    pub fn clients(&self) -> Vec<Client> {
        self.cache.read().clients.clone()
    }

    /// Look up one client by id.
    pub fn client(&self, id: &Uuid) -> Option<Client> {
        self.cache
            .read()
            .clients
            .iter()
            .find(|c| &c.id == id)
            .cloned()
    }

    /// Insert or replace a client, keyed by id, and persist.
    pub fn save_client(&self, client: Client) -> Result<(), StoreError> {
        let mut db = self.cache.write();
        match db.clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => *existing = client,
            None => db.clients.push(client),
        }
        self.persist(&db)
    }

    /// Remove a client by id and persist. Unknown ids are a no-op.
    pub fn delete_client(&self, id: &Uuid) -> Result<(), StoreError> {
        let mut db = self.cache.write();
        db.clients.retain(|c| &c.id != id);
        self.persist(&db)
    }

    fn persist(&self, db: &MaintenanceDb) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(db)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn seed_if_missing(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, BUNDLED_DB)?;
    log::info!("Demo database seeded at {}", path.display());
    Ok(())
}
