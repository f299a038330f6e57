use std::path::PathBuf;

use super::error::{RepositoryError, RepositoryResult};
use super::key_value_repository::KeyValueRepository;

/// JSON file-based key-value repository.
/// Each key is stored as `<key>.json` in ~/.config/pachico/ (or a chosen directory).
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Create repository under the platform config directory
    pub fn new() -> RepositoryResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RepositoryError::Initialization {
                message: "Could not determine config directory".to_string(),
            })?
            .join("pachico");

        Ok(Self { dir: config_dir })
    }

    /// Create repository rooted at an explicit directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueRepository for JsonFileRepository {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let path = self.key_path(key);

        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let path = self.key_path(key);

        std::fs::create_dir_all(&self.dir)?;

        // Write to file atomically (write to temp, then rename)
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn storage_path(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::with_dir(tmp.path());
        assert!(repo.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("dir");
        let repo = JsonFileRepository::with_dir(&dir);

        repo.set("k", "[1]").unwrap();
        repo.set("k", "[2]").unwrap();

        assert_eq!(repo.get("k").unwrap().as_deref(), Some("[2]"));
        assert!(dir.join("k.json").exists());
        assert!(!dir.join("k.json.tmp").exists());
    }

    #[test]
    fn test_keys_are_independent() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::with_dir(tmp.path());

        repo.set("a", "1").unwrap();
        repo.set("b", "2").unwrap();

        assert_eq!(repo.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get("b").unwrap().as_deref(), Some("2"));
    }
}
