use crate::domain::entities::watchlist::Watchlist;
use crate::domain::error::StoreError;
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Watchlist stored as a JSON array in a single file.
///
/// Writes go to a temp file in the target directory which is then renamed
/// over the target, so readers see either the old list or the new one.
pub struct JsonWatchlistFile {
    path: PathBuf,
}

impl JsonWatchlistFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl WatchlistRepository for JsonWatchlistFile {
    fn load(&self) -> Result<Watchlist, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Watchlist::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, watchlist: &Watchlist) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let encoded =
            serde_json::to_vec(watchlist).map_err(|e| StoreError::Encode(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}
