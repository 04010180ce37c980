use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::BlobError;
use crate::store::{BlobMeta, BlobStore};

/// FileStore is a BlobStore implementation backed by the local filesystem.
///
/// Keys are mapped to paths under `base_dir`:
///   key "avatars/joe.png" → `{base_dir}/avatars/joe.png`
///
/// Parent directories are created automatically on `put`. Keys are
/// validated component by component, so a client-supplied filename can
/// never write outside `base_dir`.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a new FileStore rooted at `base_dir`.
    /// The directory is created if it doesn't exist.
    pub fn open(base_dir: &Path) -> Result<Self, BlobError> {
        fs::create_dir_all(base_dir).map_err(|e| BlobError::Io(e.to_string()))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Resolve a key to a filesystem path. Rejects keys that escape base_dir.
    fn resolve(&self, key: &str) -> Result<PathBuf, BlobError> {
        if key.is_empty() {
            return Err(BlobError::InvalidKey("empty key".to_string()));
        }

        // Backslashes are path separators on Windows clients; a key using
        // them is suspect everywhere.
        if key.starts_with('\\') {
            return Err(BlobError::InvalidKey(format!("absolute path: {:?}", key)));
        }

        let rel = Path::new(key);
        if rel.is_absolute() {
            return Err(BlobError::InvalidKey(format!("absolute path: {:?}", key)));
        }

        // Only plain name components are allowed. `..`, `.`, and root or
        // prefix components all escape or alias the store root.
        for comp in rel.components() {
            match comp {
                Component::Normal(_) => {}
                _ => {
                    return Err(BlobError::InvalidKey(format!(
                        "path traversal in key: {:?}",
                        key
                    )));
                }
            }
        }

        Ok(self.base_dir.join(rel))
    }

    /// Recursively walk a directory, collecting blobs whose keys match prefix.
    fn walk_dir(
        &self,
        dir: &Path,
        prefix: &str,
        results: &mut Vec<BlobMeta>,
    ) -> Result<(), BlobError> {
        if !dir.is_dir() {
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| BlobError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| BlobError::Io(e.to_string()))?;
            let path = entry.path();

            if path.is_dir() {
                self.walk_dir(&path, prefix, results)?;
            } else if path.is_file() {
                // Convert the path back to a key (relative to base_dir).
                if let Ok(rel) = path.strip_prefix(&self.base_dir) {
                    let key = rel.to_string_lossy().to_string();
                    if key.starts_with(prefix) {
                        let meta = entry
                            .metadata()
                            .map_err(|e| BlobError::Io(e.to_string()))?;
                        results.push(BlobMeta {
                            key,
                            size: meta.len(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl BlobStore for FileStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BlobError::Io(e.to_string()))?;
        }
        fs::write(&path, data).map_err(|e| BlobError::Io(e.to_string()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError> {
        let path = self.resolve(key)?;
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read(&path).map_err(|e| BlobError::Io(e.to_string()))?;
        Ok(Some(data))
    }

    fn delete(&self, key: &str) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| BlobError::Io(e.to_string()))?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, BlobError> {
        let path = self.resolve(key)?;
        Ok(path.is_file())
    }

    fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError> {
        let mut results = Vec::new();
        self.walk_dir(&self.base_dir, prefix, &mut results)?;
        results.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn put_then_get() {
        let (_dir, store) = open_store();
        store.put("avatar.png", b"pngdata").unwrap();
        assert_eq!(store.get("avatar.png").unwrap(), Some(b"pngdata".to_vec()));
    }

    #[test]
    fn get_missing_is_none() {
        let (_dir, store) = open_store();
        assert_eq!(store.get("nothing.bin").unwrap(), None);
    }

    #[test]
    fn put_creates_parent_dirs() {
        let (dir, store) = open_store();
        store.put("avatars/u1/face.png", b"x").unwrap();
        assert!(dir.path().join("avatars/u1/face.png").is_file());
    }

    #[test]
    fn put_overwrites() {
        let (_dir, store) = open_store();
        store.put("a.txt", b"one").unwrap();
        store.put("a.txt", b"two").unwrap();
        assert_eq!(store.get("a.txt").unwrap(), Some(b"two".to_vec()));
    }

    #[test]
    fn exists_and_delete() {
        let (_dir, store) = open_store();
        store.put("f.bin", b"data").unwrap();
        assert!(store.exists("f.bin").unwrap());

        store.delete("f.bin").unwrap();
        assert!(!store.exists("f.bin").unwrap());

        // Deleting a missing key is a no-op.
        store.delete("f.bin").unwrap();
    }

    #[test]
    fn list_filters_by_prefix_and_sorts() {
        let (_dir, store) = open_store();
        store.put("avatars/b.png", b"2").unwrap();
        store.put("avatars/a.png", b"1").unwrap();
        store.put("other/z.txt", b"3").unwrap();

        let metas = store.list("avatars/").unwrap();
        let keys: Vec<&str> = metas.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["avatars/a.png", "avatars/b.png"]);
        assert_eq!(metas[0].size, 1);
    }

    #[test]
    fn rejects_invalid_keys() {
        let (_dir, store) = open_store();
        for key in ["", "/etc/passwd", "../escape", "a/../../b", "./a.txt", "\\server\\share"] {
            let err = store.put(key, b"x").unwrap_err();
            assert!(matches!(err, BlobError::InvalidKey(_)), "key {:?}", key);
        }
    }

    #[test]
    fn traversal_never_touches_outside_root() {
        let outer = tempfile::tempdir().unwrap();
        let base = outer.path().join("store");
        let store = FileStore::open(&base).unwrap();

        store.put("../leak.txt", b"x").unwrap_err();
        assert!(!outer.path().join("leak.txt").exists());
    }
}
