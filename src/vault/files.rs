//! Reading and writing the on-disk file pair.
//!
//! A store lives in two files next to each other:
//!
//! ```text
//! <store_dir>/passwd.db   AES-256-GCM ciphertext + tag
//! <store_dir>/nonce       12 raw nonce bytes
//! ```
//!
//! Each file is replaced atomically (temp file + rename), but the pair
//! is not: a crash between the two renames, or two processes saving at
//! once, can leave a nonce that does not match its blob.  The next
//! `open` then fails with `DecryptionFailed` instead of losing data
//! silently.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::crypto::Sealed;
use crate::errors::Result;

/// Locations of the blob and nonce files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub blob: PathBuf,
    pub nonce: PathBuf,
}

impl StorePaths {
    /// Returns `true` if at least one of the two files exists.
    pub fn any_exists(&self) -> bool {
        self.blob.exists() || self.nonce.exists()
    }
}

/// Read both files.  A missing file reads as an empty byte vector.
///
/// Whether the resulting combination is valid is decided by
/// `PasswordStore::open`, not here.
pub fn read_pair(paths: &StorePaths) -> Result<(Vec<u8>, Vec<u8>)> {
    let blob = read_or_empty(&paths.blob)?;
    let nonce = read_or_empty(&paths.nonce)?;
    Ok((blob, nonce))
}

/// Write the nonce file, then the blob file.
pub fn write_pair(paths: &StorePaths, sealed: &Sealed) -> Result<()> {
    write_atomic(&paths.nonce, &sealed.nonce)?;
    write_atomic(&paths.blob, &sealed.blob)?;
    Ok(())
}

fn read_or_empty(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Write `data` to a temp file in the same directory, flush it to disk,
/// then rename it over `path`.  On Unix the file is owner-only (0o600).
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp_path, path)?;
    sync_dir(parent);
    Ok(())
}

/// Persist the rename itself.  Best effort: not every platform can open
/// a directory for syncing.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Ok(handle) = File::open(dir) {
            let _ = handle.sync_all();
        }
    }

    #[cfg(not(unix))]
    {
        let _ = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(dir: &Path) -> StorePaths {
        StorePaths {
            blob: dir.join("passwd.db"),
            nonce: dir.join("nonce"),
        }
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let (blob, nonce) = read_pair(&paths(dir.path())).unwrap();
        assert!(blob.is_empty());
        assert!(nonce.is_empty());
    }

    #[test]
    fn write_then_read_pair() {
        let dir = TempDir::new().unwrap();
        let p = paths(dir.path());
        let sealed = Sealed {
            blob: vec![1, 2, 3],
            nonce: vec![9; 12],
        };

        write_pair(&p, &sealed).unwrap();
        let (blob, nonce) = read_pair(&p).unwrap();
        assert_eq!(blob, sealed.blob);
        assert_eq!(nonce, sealed.nonce);
        assert!(p.any_exists());
    }

    #[test]
    fn write_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let p = paths(&dir.path().join("nested").join("store"));
        let sealed = Sealed {
            blob: vec![0xAA],
            nonce: vec![0xBB; 12],
        };

        write_pair(&p, &sealed).unwrap();
        assert!(p.blob.exists());
        assert!(p.nonce.exists());
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let p = paths(dir.path());
        let sealed = Sealed {
            blob: vec![1],
            nonce: vec![2; 12],
        };
        write_pair(&p, &sealed).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{names:?}");
    }

    #[test]
    fn rewrite_replaces_previous_contents_fully() {
        let dir = TempDir::new().unwrap();
        let p = paths(dir.path());

        let first = Sealed {
            blob: vec![7; 64],
            nonce: vec![1; 12],
        };
        write_pair(&p, &first).unwrap();

        let second = Sealed {
            blob: vec![8; 20],
            nonce: vec![2; 12],
        };
        write_pair(&p, &second).unwrap();

        let (blob, nonce) = read_pair(&p).unwrap();
        assert_eq!(blob, second.blob);
        assert_eq!(nonce, second.nonce);
    }

    #[test]
    fn write_atomic_writes_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("single.bin");
        write_atomic(&target, b"payload").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"payload");
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let p = paths(dir.path());
        let sealed = Sealed {
            blob: vec![1],
            nonce: vec![2; 12],
        };
        write_pair(&p, &sealed).unwrap();

        for path in [&p.blob, &p.nonce] {
            let mode = fs::metadata(path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
