use std::sync::Arc;

use quiz_core::model::{QuizSnapshot, User};
use tracing::{debug, warn};

use crate::records::{SnapshotRecord, UserRecord};
use crate::repository::{KeyValueStore, StorageError};

/// Key holding the serialized logged-in user.
pub const USER_KEY: &str = "quizUser";
/// Key holding the serialized in-progress quiz snapshot.
pub const QUIZ_PROGRESS_KEY: &str = "quizProgress";

/// Reads and writes the user and quiz snapshot entries.
///
/// Corrupted entries are treated as absent: they are logged, removed, and
/// reported as `None` so startup always reaches an interactive screen.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_user(&self) -> Result<Option<User>, StorageError> {
        let Some(raw) = self.kv.get(USER_KEY).await? else {
            return Ok(None);
        };
        let user = serde_json::from_str::<UserRecord>(&raw)
            .map_err(|err| err.to_string())
            .and_then(|record| record.into_user().map_err(|err| err.to_string()));
        match user {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                self.discard(USER_KEY, &reason).await?;
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the user cannot be serialized or stored.
    pub async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(&UserRecord::from_user(user))
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(USER_KEY, &json).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_snapshot(&self) -> Result<Option<QuizSnapshot>, StorageError> {
        let Some(raw) = self.kv.get(QUIZ_PROGRESS_KEY).await? else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str::<SnapshotRecord>(&raw)
            .map_err(|err| err.to_string())
            .and_then(|record| record.into_snapshot().map_err(|err| err.to_string()));
        match snapshot {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(reason) => {
                self.discard(QUIZ_PROGRESS_KEY, &reason).await?;
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be serialized or stored.
    pub async fn save_snapshot(&self, snapshot: &QuizSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(&SnapshotRecord::from_snapshot(snapshot))
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(QUIZ_PROGRESS_KEY, &json).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be removed.
    pub async fn clear_snapshot(&self) -> Result<(), StorageError> {
        self.kv.remove(QUIZ_PROGRESS_KEY).await
    }

    /// Remove both the user and the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either entry cannot be removed.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.kv.remove(USER_KEY).await?;
        self.kv.remove(QUIZ_PROGRESS_KEY).await
    }

    async fn discard(&self, key: &str, reason: &str) -> Result<(), StorageError> {
        warn!(key, reason, "discarding malformed persisted state");
        self.kv.remove(key).await?;
        debug!(key, "removed malformed entry");
        Ok(())
    }
}
