//! Plan persistence with file locking.
//!
//! The calculators never read storage themselves; callers load a plan
//! through a [`PlanStore`] and pass its parameters in explicitly.

use crate::{Error, Result, StoredPlan};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage for the active quit plan
pub trait PlanStore {
    /// Load the stored plan, if any
    fn load(&self) -> Result<Option<StoredPlan>>;

    /// Replace the stored plan
    fn save(&self, plan: &StoredPlan) -> Result<()>;
}

/// JSON file plan store
pub struct JsonPlanStore {
    path: PathBuf,
}

impl JsonPlanStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlanStore for JsonPlanStore {
    /// Load with a shared lock.
    ///
    /// A missing file means no plan. A file that cannot be read or parsed is
    /// logged and also treated as no plan.
    fn load(&self) -> Result<Option<StoredPlan>> {
        let path = &self.path;
        if !path.exists() {
            tracing::debug!("No plan file at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open plan file {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock plan file {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read plan file {:?}: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        file.unlock()?;

        let stored = match serde_json::from_str::<StoredPlan>(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to parse plan file {:?}: {}. Ignoring it.", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = stored.plan.validate() {
            tracing::warn!("Plan file {:?} holds an invalid plan: {}. Ignoring it.", path, e);
            return Ok(None);
        }

        tracing::debug!("Loaded plan {} from {:?}", stored.plan.id, path);
        Ok(Some(stored))
    }

    /// Validate, then write atomically through a locked temp file
    fn save(&self, stored: &StoredPlan) -> Result<()> {
        stored.plan.validate()?;

        let path = &self.path;
        let parent = path
            .parent()
            .ok_or_else(|| Error::Config(format!("plan path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, stored)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved plan {} to {:?}", stored.plan.id, path);
        Ok(())
    }
}
