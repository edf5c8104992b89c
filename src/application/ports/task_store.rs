use async_trait::async_trait;

/// Raised when a task name collides, ignoring case, with a stored one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Task '{0}' already exists")]
pub struct DuplicateTaskError(pub String);

impl DuplicateTaskError {
    pub fn task_name(&self) -> &str {
        &self.0
    }
}

/// Working set of task names with case-insensitive identity.
///
/// Lookups that find nothing return `None` or `false`; the only failure is a name collision.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, name: &str) -> Result<String, DuplicateTaskError>;

    async fn get(&self, name: &str) -> Option<String>;

    async fn list_all(&self) -> Vec<String>;

    async fn rename(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<Option<String>, DuplicateTaskError>;

    async fn delete(&self, name: &str) -> bool;

    async fn exists(&self, name: &str) -> bool;
}
