use super::error::RepositoryResult;

/// Raw key-value persistence backend.
///
/// Operations are synchronous so writes land in the order they are issued.
pub trait KeyValueRepository: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if nothing is stored
    fn get(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// Where values are kept (for diagnostics)
    fn storage_path(&self) -> String;
}
