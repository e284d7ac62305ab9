//! Timestamped local persistence for report output.

use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::Result;

/// Writes content under a fixed output directory with a timestamped filename.
///
/// Every save lands as `{timestamp}_{stem}.{ext}` so repeated runs never
/// clobber each other. The directory is created on first use.
///
/// # Examples
///
/// ```no_run
/// use docpress::Store;
///
/// let store = Store::new();
/// let path = store.save("# Findings\n", "report", "md")?;
/// println!("saved to {}", path.display());
/// # Ok::<(), docpress::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        Store {
            dir: PathBuf::from("output"),
        }
    }
}

impl Store {
    /// A store rooted at the default `output/` directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Persist content, returning the path it was written to.
    pub fn save(&self, content: impl AsRef<[u8]>, stem: &str, ext: &str) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{stamp}_{stem}.{ext}"));
        fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_content() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        let path = store.save("# Hello\n", "report", "md").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello\n");
    }

    #[test]
    fn test_filename_has_timestamp_prefix() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path());

        let path = store.save("x", "notes", "txt").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        // 20260807_123456_notes.txt
        assert!(name.ends_with("_notes.txt"), "name: {name}");
        let stamp = &name[..15];
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(
            stamp
                .chars()
                .enumerate()
                .all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() }),
            "stamp: {stamp}"
        );
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path().join("nested/output"));

        let path = store.save(b"binary".as_slice(), "blob", "bin").unwrap();
        assert!(path.exists());
    }
}
