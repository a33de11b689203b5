mod catalog;
mod credentials;
mod defaults;
mod error;
mod ledger;

pub use catalog::CourseInfo;
pub use credentials::{Role, UserSpec};
pub use defaults::StoreDefaults;
pub use error::{OpError, OpResult};
pub use ledger::{CourseRecord, Exam, Ledger, Project, StudentRecord};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const COURSES_FILE: &str = "courses.json";
pub const STUDENT_DATA_FILE: &str = "student_data.json";

type RoleUsers = BTreeMap<String, String>;

/// The Records Store: three independently persisted collections, loaded when
/// a workspace is opened and rewritten in full after each mutation.
pub struct RecordsStore {
    dir: PathBuf,
    credentials: BTreeMap<Role, RoleUsers>,
    catalog: BTreeMap<String, CourseInfo>,
    ledger: Ledger,
}

impl RecordsStore {
    /// Opens (or initializes) the store in `dir`. `defaults` is the bootstrap
    /// set written out when a document is absent or unreadable; the ledger
    /// has no fixed seed — it derives one empty row per student already in
    /// the credential directory.
    pub fn open(dir: &Path, defaults: StoreDefaults) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create workspace {}", dir.to_string_lossy()))?;

        let credentials: BTreeMap<Role, RoleUsers> =
            load_or_seed(dir, CREDENTIALS_FILE, || defaults.credentials.clone())?;
        let catalog: BTreeMap<String, CourseInfo> =
            load_or_seed(dir, COURSES_FILE, || defaults.catalog.clone())?;
        let ledger: Ledger = load_or_seed(dir, STUDENT_DATA_FILE, || {
            Ledger::seed_for(
                credentials
                    .get(&Role::Student)
                    .map(|users| users.keys())
                    .into_iter()
                    .flatten(),
            )
        })?;

        Ok(RecordsStore {
            dir: dir.to_path_buf(),
            credentials,
            catalog,
            ledger,
        })
    }

    /// Read-only view of the catalog for listing surfaces.
    pub fn catalog(&self) -> &BTreeMap<String, CourseInfo> {
        &self.catalog
    }

    fn save_credentials(&self) -> anyhow::Result<()> {
        write_document(&self.dir.join(CREDENTIALS_FILE), &self.credentials)
    }

    fn save_catalog(&self) -> anyhow::Result<()> {
        write_document(&self.dir.join(COURSES_FILE), &self.catalog)
    }

    fn save_ledger(&self) -> anyhow::Result<()> {
        write_document(&self.dir.join(STUDENT_DATA_FILE), &self.ledger)
    }
}

fn load_or_seed<T, F>(dir: &Path, file: &str, seed: F) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    let path = dir.join(file);
    if path.is_file() {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
        match serde_json::from_str(&text) {
            Ok(value) => return Ok(value),
            Err(e) => {
                // Lossy recovery policy: an unparsable document is replaced
                // with the seed set and rewritten. The caller never sees it.
                warn!(file, error = %e, "unreadable document, reseeding with defaults");
            }
        }
    }
    let value = seed();
    write_document(&path, &value)?;
    Ok(value)
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize document")?;
    std::fs::write(path, text)
        .with_context(|| format!("failed to write {}", path.to_string_lossy()))?;
    Ok(())
}
