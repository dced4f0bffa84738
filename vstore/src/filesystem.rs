//! Filesystem-backed session store: one JSON blob per storage key.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use vcommon::{MessageId, StorageKey};
use vsession::{ConversationLog, Message, Origin, SessionError, SessionFuture, SessionStore};

pub const DEFAULT_STORAGE_KEY: &str = "health-advisor-messages";

/// Stores the whole transcript as one JSON file named after the storage key.
///
/// Writes are full overwrites through a temporary file plus rename, so a
/// reader never sees a half-written transcript. A missing or malformed file
/// restores as an empty log; only unexpected IO failures surface as errors.
#[derive(Debug)]
pub struct FilesystemSessionStore {
    root: PathBuf,
    key: StorageKey,
    lock: Mutex<()>,
}

impl FilesystemSessionStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::with_key(root, StorageKey::new(DEFAULT_STORAGE_KEY))
    }

    pub fn with_key(root: impl AsRef<Path>, key: StorageKey) -> Result<Self, SessionError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|error| {
            SessionError::storage(format!("failed to create session store root: {error}"))
        })?;

        Ok(Self {
            root,
            key,
            lock: Mutex::new(()),
        })
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    fn slot_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.key))
    }

    fn read_log(&self) -> Result<ConversationLog, SessionError> {
        let path = self.slot_path();
        if !path.exists() {
            return Ok(ConversationLog::empty());
        }

        let bytes = fs::read(&path).map_err(|error| {
            SessionError::storage(format!("failed to read session file: {error}"))
        })?;

        // Malformed content means "no history", never a surfaced error.
        let Ok(persisted) = serde_json::from_slice::<PersistedLog>(&bytes) else {
            return Ok(ConversationLog::empty());
        };

        match persisted.into_log() {
            Ok(log) => Ok(log),
            Err(_) => Ok(ConversationLog::empty()),
        }
    }

    fn write_log(&self, log: &ConversationLog) -> Result<(), SessionError> {
        let persisted = PersistedLog::from_log(log)?;
        let bytes = serde_json::to_vec_pretty(&persisted).map_err(|error| {
            SessionError::serialization(format!("failed to serialize transcript: {error}"))
        })?;

        write_atomic(&self.slot_path(), &bytes)
    }

    fn remove_slot(&self) -> Result<(), SessionError> {
        match fs::remove_file(self.slot_path()) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SessionError::storage(format!(
                "failed to erase session file: {error}"
            ))),
        }
    }
}

impl SessionStore for FilesystemSessionStore {
    fn restore<'a>(&'a self) -> SessionFuture<'a, Result<ConversationLog, SessionError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| SessionError::storage("filesystem store lock poisoned"))?;

            self.read_log()
        })
    }

    fn persist<'a>(&'a self, log: ConversationLog) -> SessionFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| SessionError::storage("filesystem store lock poisoned"))?;

            self.write_log(&log)
        })
    }

    fn erase<'a>(&'a self) -> SessionFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| SessionError::storage("filesystem store lock poisoned"))?;

            self.remove_slot()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedLog {
    messages: Vec<PersistedMessage>,
}

impl PersistedLog {
    fn from_log(log: &ConversationLog) -> Result<Self, SessionError> {
        Ok(Self {
            messages: log
                .iter()
                .map(PersistedMessage::from_message)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn into_log(self) -> Result<ConversationLog, SessionError> {
        let messages = self
            .messages
            .into_iter()
            .map(PersistedMessage::into_message)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ConversationLog::from_messages(messages))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedMessage {
    id: u64,
    origin: String,
    text: String,
    created_at_secs: i64,
    created_at_nanos: i64,
}

impl PersistedMessage {
    fn from_message(message: &Message) -> Result<Self, SessionError> {
        let (secs, nanos) = encode_system_time(message.created_at)?;
        Ok(Self {
            id: message.id.value(),
            origin: origin_to_string(message.origin),
            text: message.text.clone(),
            created_at_secs: secs,
            created_at_nanos: nanos,
        })
    }

    fn into_message(self) -> Result<Message, SessionError> {
        Ok(Message::new(
            MessageId::new(self.id),
            origin_from_str(&self.origin)?,
            self.text,
            decode_system_time(self.created_at_secs, self.created_at_nanos)?,
        ))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SessionError> {
    let Some(parent) = path.parent() else {
        return Err(SessionError::storage(
            "session file missing parent directory",
        ));
    };
    fs::create_dir_all(parent).map_err(|error| {
        SessionError::storage(format!("failed to create parent directory: {error}"))
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        SessionError::storage(format!("failed to write temporary session file: {error}"))
    })?;

    if path.exists() {
        fs::remove_file(path).map_err(|error| {
            SessionError::storage(format!("failed to replace existing session file: {error}"))
        })?;
    }
    fs::rename(&tmp, path)
        .map_err(|error| SessionError::storage(format!("failed to finalize session file: {error}")))
}

fn encode_system_time(value: SystemTime) -> Result<(i64, i64), SessionError> {
    let duration = value.duration_since(UNIX_EPOCH).map_err(|error| {
        SessionError::serialization(format!("timestamp predates unix epoch: {error}"))
    })?;
    Ok((
        duration.as_secs() as i64,
        i64::from(duration.subsec_nanos()),
    ))
}

fn decode_system_time(seconds: i64, nanos: i64) -> Result<SystemTime, SessionError> {
    if seconds < 0 {
        return Err(SessionError::serialization(format!(
            "timestamp seconds must be non-negative, got {seconds}"
        )));
    }
    if !(0..1_000_000_000).contains(&nanos) {
        return Err(SessionError::serialization(format!(
            "timestamp nanos must be in [0, 1_000_000_000), got {nanos}"
        )));
    }
    Ok(UNIX_EPOCH + Duration::new(seconds as u64, nanos as u32))
}

fn origin_to_string(origin: Origin) -> String {
    match origin {
        Origin::User => "user".to_string(),
        Origin::Advisor => "advisor".to_string(),
    }
}

fn origin_from_str(value: &str) -> Result<Origin, SessionError> {
    match value {
        "user" => Ok(Origin::User),
        "advisor" => Ok(Origin::Advisor),
        _ => Err(SessionError::serialization(format!(
            "unknown message origin value '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use vcommon::{MessageId, StorageKey};
    use vsession::{ConversationLog, Message, SessionStore};

    use super::{FilesystemSessionStore, DEFAULT_STORAGE_KEY};

    fn sample_log() -> ConversationLog {
        ConversationLog::empty()
            .append(Message::user(MessageId::new(1), "What is a healthy heart rate?"))
            .append(Message::advisor(MessageId::new(2), "60-100 bpm"))
            .append(Message::user(MessageId::new(3), "line one\nline two"))
    }

    #[tokio::test]
    async fn persist_then_restore_round_trips_the_transcript() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilesystemSessionStore::new(dir.path()).expect("store");

        let log = sample_log();
        store.persist(log.clone()).await.expect("persist");

        let restored = store.restore().await.expect("restore");
        assert_eq!(restored, log);
    }

    #[tokio::test]
    async fn restore_of_a_missing_slot_is_empty() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilesystemSessionStore::new(dir.path()).expect("store");

        let restored = store.restore().await.expect("restore");
        assert!(restored.is_empty());
    }

    #[tokio::test]
    async fn malformed_content_restores_as_no_history() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilesystemSessionStore::new(dir.path()).expect("store");

        let path = dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json"));
        fs::write(&path, b"{ this is not json").expect("write garbage");
        let restored = store.restore().await.expect("restore");
        assert!(restored.is_empty());

        // Structurally valid JSON with bad field values is no history either.
        fs::write(
            &path,
            br#"{"messages":[{"id":1,"origin":"ghost","text":"x","created_at_secs":1,"created_at_nanos":0}]}"#,
        )
        .expect("write bad origin");
        let restored = store.restore().await.expect("restore");
        assert!(restored.is_empty());
    }

    #[tokio::test]
    async fn persist_overwrites_the_previous_transcript() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilesystemSessionStore::new(dir.path()).expect("store");

        store.persist(sample_log()).await.expect("persist");

        let shorter = ConversationLog::empty().append(Message::user(MessageId::new(9), "only one"));
        store.persist(shorter.clone()).await.expect("persist again");

        let restored = store.restore().await.expect("restore");
        assert_eq!(restored, shorter);
    }

    #[tokio::test]
    async fn erase_removes_the_slot_and_is_idempotent() {
        let dir = TempDir::new().expect("tempdir");
        let store = FilesystemSessionStore::new(dir.path()).expect("store");

        store.persist(sample_log()).await.expect("persist");
        store.erase().await.expect("erase");
        assert!(!dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json")).exists());

        // Erasing an already-empty slot succeeds.
        store.erase().await.expect("erase again");

        let restored = store.restore().await.expect("restore");
        assert!(restored.is_empty());
    }

    #[tokio::test]
    async fn custom_keys_use_their_own_slot() {
        let dir = TempDir::new().expect("tempdir");
        let store_a = FilesystemSessionStore::with_key(dir.path(), StorageKey::new("slot-a"))
            .expect("store a");
        let store_b = FilesystemSessionStore::with_key(dir.path(), StorageKey::new("slot-b"))
            .expect("store b");

        store_a.persist(sample_log()).await.expect("persist");

        assert_eq!(store_a.restore().await.expect("restore a").len(), 3);
        assert!(store_b.restore().await.expect("restore b").is_empty());
    }
}
