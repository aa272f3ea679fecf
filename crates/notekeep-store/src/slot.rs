//! Persistent key-value slots that hold the raw token string.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::StoreError;

/// One named value in some persistent place.
///
/// This is the "survives a reload" half of the token store. Implementations
/// don't need their own locking: [`TokenStore`](crate::TokenStore) serializes
/// every call.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so a store holding the slot can sit inside an
/// `Arc` shared across tokio tasks.
pub trait Slot: Send + Sync + 'static {
    /// Returns the stored value, or `None` if nothing is stored.
    fn get(&self) -> Result<Option<String>, StoreError>;

    /// Stores `value`, replacing whatever was there.
    fn set(&self, value: &str) -> Result<(), StoreError>;

    /// Removes the value. Removing an absent value is not an error.
    fn remove(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// FileSlot
// ---------------------------------------------------------------------------

/// A slot backed by a JSON object on disk, one key per slot.
///
/// The file holds a flat `{"key": "value"}` map so several slots (or other
/// client settings) can share it without clobbering each other. Writes go to
/// a temporary file in the same directory and are renamed over the original,
/// so a crash mid-write leaves either the old map or the new one.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
    key: String,
}

impl FileSlot {
    /// Creates a slot for `key` inside the map file at `path`.
    ///
    /// Nothing touches the filesystem until the first read or write; the
    /// parent directory is created on the first write.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// The map file this slot lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Loads the map for an overwrite. A corrupt file is replaced rather
    /// than reported, otherwise a damaged state file would block every
    /// later login and logout.
    ///
    /// The flag is `true` when the file was corrupt and must be rewritten.
    fn load_for_update(&self) -> Result<(BTreeMap<String, String>, bool), StoreError> {
        match self.load() {
            Ok(map) => Ok((map, false)),
            Err(StoreError::Corrupt { path, reason }) => {
                tracing::warn!(path = %path.display(), %reason, "replacing corrupt token slot file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_err)?;

        let bytes = serde_json::to_vec_pretty(map).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl Slot for FileSlot {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(&self.key))
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        let (mut map, _) = self.load_for_update()?;
        map.insert(self.key.clone(), value.to_string());
        self.save(&map)
    }

    fn remove(&self) -> Result<(), StoreError> {
        let (mut map, corrupt) = self.load_for_update()?;
        if map.remove(&self.key).is_none() && !corrupt {
            return Ok(());
        }
        self.save(&map)
    }
}

// ---------------------------------------------------------------------------
// MemorySlot
// ---------------------------------------------------------------------------

/// A slot that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl Slot for MemorySlot {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.value.lock().unwrap_or_else(|e| e.into_inner()).take();
        Ok(())
    }
}
