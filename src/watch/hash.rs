// src/watch/hash.rs

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Result;
use blake3::Hasher;
use tracing::debug;

use crate::fs::FileSystem;

/// Compute the content hash of a single file.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    let mut reader = fs.open_read(path)?;
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Last seen content hash per watched file.
pub trait HashStore: Send {
    fn load(&self, path: &Path) -> Option<String>;
    fn save(&mut self, path: &Path, hash: String);
    fn forget(&mut self, path: &Path);

    /// Record `hash` for `path` and report whether it differs from the
    /// previous one. A path seen for the first time counts as changed.
    fn update(&mut self, path: &Path, hash: String) -> bool {
        let changed = self.load(path).as_deref() != Some(hash.as_str());
        if changed {
            self.save(path, hash);
        }
        changed
    }
}

/// Stores hashes in memory for the lifetime of the watcher.
#[derive(Debug, Default)]
pub struct MemoryHashStore {
    map: HashMap<PathBuf, String>,
}

impl MemoryHashStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HashStore for MemoryHashStore {
    fn load(&self, path: &Path) -> Option<String> {
        self.map.get(path).cloned()
    }

    fn save(&mut self, path: &Path, hash: String) {
        debug!(?path, %hash, "stored file hash");
        self.map.insert(path.to_path_buf(), hash);
    }

    fn forget(&mut self, path: &Path) {
        self.map.remove(path);
    }
}
