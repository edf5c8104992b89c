use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{DuplicateTaskError, TaskStore};
use crate::domain::TaskKey;

struct StoredTask {
    key: TaskKey,
    name: String,
}

/// Task names held in insertion order behind a single lock.
///
/// Each mutation runs its collision check and its write under the same write guard, so no reader
/// ever sees two names sharing a key.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<Vec<StoredTask>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position(tasks: &[StoredTask], key: &TaskKey) -> Option<usize> {
    tasks.iter().position(|task| task.key == *key)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    #[tracing::instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<String, DuplicateTaskError> {
        let key = TaskKey::from_name(name);
        let mut tasks = self.tasks.write().await;

        if position(&tasks, &key).is_some() {
            tracing::debug!("Rejected duplicate task");
            return Err(DuplicateTaskError(name.to_string()));
        }

        tasks.push(StoredTask {
            key,
            name: name.to_string(),
        });
        tracing::info!(task_count = tasks.len(), "Task created");
        Ok(name.to_string())
    }

    async fn get(&self, name: &str) -> Option<String> {
        let key = TaskKey::from_name(name);
        let tasks = self.tasks.read().await;
        position(&tasks, &key).map(|index| tasks[index].name.clone())
    }

    async fn list_all(&self) -> Vec<String> {
        let tasks = self.tasks.read().await;
        tasks.iter().map(|task| task.name.clone()).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn rename(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<Option<String>, DuplicateTaskError> {
        let old_key = TaskKey::from_name(old_name);
        let new_key = TaskKey::from_name(new_name);
        let mut tasks = self.tasks.write().await;

        let Some(index) = position(&tasks, &old_key) else {
            return Ok(None);
        };

        let collides = tasks
            .iter()
            .enumerate()
            .any(|(other, task)| other != index && task.key == new_key);
        if collides {
            tracing::debug!("Rejected rename onto an existing task");
            return Err(DuplicateTaskError(new_name.to_string()));
        }

        tasks[index] = StoredTask {
            key: new_key,
            name: new_name.to_string(),
        };
        tracing::info!("Task renamed");
        Ok(Some(new_name.to_string()))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, name: &str) -> bool {
        let key = TaskKey::from_name(name);
        let mut tasks = self.tasks.write().await;

        match position(&tasks, &key) {
            Some(index) => {
                tasks.remove(index);
                tracing::info!(task_count = tasks.len(), "Task deleted");
                true
            }
            None => false,
        }
    }

    async fn exists(&self, name: &str) -> bool {
        let key = TaskKey::from_name(name);
        position(&self.tasks.read().await, &key).is_some()
    }
}
