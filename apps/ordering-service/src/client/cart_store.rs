//! Cart persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

use super::cart::CartLine;

/// File name used when a cart is stored in a directory.
pub const DEFAULT_CART_FILE: &str = "reddragon_cart.json";

/// Errors from reading or writing a stored cart.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Filesystem failure.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored cart is not a JSON array of lines.
    #[error("stored cart is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where a cart's lines live between sessions.
pub trait CartStore: Send + Sync {
    /// Read the stored lines. `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<CartLine>>, CartStorageError>;

    /// Replace the stored lines.
    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError>;
}

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store as [`DEFAULT_CART_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_CART_FILE))
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CartStorageError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError> {
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(lines)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store. Counts saves so callers can see when persistence ran.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    lines: Mutex<Option<Vec<CartLine>>>,
    saves: AtomicUsize,
}

impl MemoryCartStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `lines`.
    #[must_use]
    pub fn with_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: Mutex::new(Some(lines)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Currently stored lines.
    pub fn stored(&self) -> Option<Vec<CartLine>> {
        self.lines.lock().clone()
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CartStorageError> {
        Ok(self.lines.lock().clone())
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError> {
        *self.lines.lock() = Some(lines.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl<T: CartStore + ?Sized> CartStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CartStorageError> {
        (**self).load()
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CartStorageError> {
        (**self).save(lines)
    }
}
