//! Listing of regular files in a directory.

use std::ffi::OsString;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Snapshot of the regular files in a directory.
///
/// Entries keep the order reported by the operating system. The snapshot is
/// taken once at construction and never refreshed.
#[derive(Debug)]
pub struct FileListing {
    directory: PathBuf,
    files: Vec<OsString>,
    access_error: Option<IngestError>,
}

impl FileListing {
    /// Lists regular files in `dir`, propagating access errors.
    ///
    /// Directories and symlinks are skipped.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?;

            // file_type() does not follow symlinks
            let file_type = entry.file_type().map_err(|e| IngestError::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?;
            if file_type.is_file() {
                files.push(entry.file_name());
            }
        }

        tracing::debug!(
            directory = %dir.display(),
            files = files.len(),
            "listed directory"
        );

        Ok(Self {
            directory: dir.to_path_buf(),
            files,
            access_error: None,
        })
    }

    /// Lists regular files in `dir`, degrading to an empty listing on error.
    ///
    /// The cause is logged and kept in [`FileListing::access_error`].
    pub fn open(dir: &Path) -> Self {
        match Self::scan(dir) {
            Ok(listing) => listing,
            Err(error) => {
                tracing::error!(directory = %dir.display(), %error, "failed to list files");
                Self {
                    directory: dir.to_path_buf(),
                    files: Vec::new(),
                    access_error: Some(error),
                }
            }
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Error that left this listing empty, if any.
    pub fn access_error(&self) -> Option<&IngestError> {
        self.access_error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File name at `index` (0-based).
    pub fn get(&self, index: usize) -> Option<&OsString> {
        self.files.get(index)
    }

    /// Full path of the file at `index` (0-based).
    pub fn path(&self, index: usize) -> Option<PathBuf> {
        self.files.get(index).map(|name| self.directory.join(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OsString> {
        self.files.iter()
    }
}

impl Index<usize> for FileListing {
    type Output = OsString;

    fn index(&self, index: usize) -> &Self::Output {
        &self.files[index]
    }
}

impl<'a> IntoIterator for &'a FileListing {
    type Item = &'a OsString;
    type IntoIter = std::slice::Iter<'a, OsString>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &["visits.csv", "notes.txt", "archive.csv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        dir
    }

    #[test]
    fn test_scan_counts_regular_files_only() {
        let dir = create_test_dir();
        let listing = FileListing::scan(dir.path()).unwrap();

        assert_eq!(listing.len(), 3);
        assert!(listing.iter().all(|name| name != "nested"));
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = TempDir::new().unwrap();
        let listing = FileListing::scan(dir.path()).unwrap();
        assert!(listing.is_empty());
        assert!(listing.access_error().is_none());
    }

    #[test]
    fn test_scan_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("visits.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = FileListing::scan(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_open_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let listing = FileListing::open(&dir.path().join("missing"));

        assert_eq!(listing.len(), 0);
        assert!(matches!(
            listing.access_error(),
            Some(IngestError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_index_and_path_agree() {
        let dir = create_test_dir();
        let listing = FileListing::scan(dir.path()).unwrap();

        for index in 0..listing.len() {
            let path = listing.path(index).unwrap();
            assert_eq!(path.file_name().unwrap(), &listing[index]);
            assert!(path.is_file());
        }
        assert!(listing.get(listing.len()).is_none());
        assert!(listing.path(listing.len()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let dir = create_test_dir();
        std::os::unix::fs::symlink(
            dir.path().join("visits.csv"),
            dir.path().join("link.csv"),
        )
        .unwrap();

        let listing = FileListing::scan(dir.path()).unwrap();
        assert_eq!(listing.len(), 3);
    }
}
