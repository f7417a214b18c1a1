//! In-memory learner session store.
//!
//! Each slot holds one learner's session and the transient state of their
//! dictation drills. Slots live until the session is finished or has been
//! idle longer than the configured limit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use listening_core::{Catalog, DictationDrill, DrillKind, LearnerSession, Level};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// One learner's session plus drill state.
#[derive(Debug, Clone)]
pub struct SessionSlot {
    pub learner: LearnerSession,
    pub sentences: DictationDrill,
    pub spelling: DictationDrill,
    /// Phoneme whose words fill the spelling drill.
    pub phoneme: Option<String>,
    /// Last time a request touched this session.
    pub last_seen: DateTime<Utc>,
}

impl SessionSlot {
    pub fn new(learner: LearnerSession, catalog: &Catalog) -> Self {
        let sentences = DictationDrill::new(
            DrillKind::sentence(),
            sentence_pool(catalog, learner.level),
        );
        Self {
            last_seen: learner.started_at,
            learner,
            sentences,
            spelling: DictationDrill::new(DrillKind::Spelling, Vec::new()),
            phoneme: None,
        }
    }

    /// Change difficulty. Both drills drop their current item.
    pub fn set_level(&mut self, level: Level, catalog: &Catalog) {
        self.learner.set_level(level);
        self.sentences.replace_pool(sentence_pool(catalog, level));
        self.spelling.replace_pool(Vec::new());
        self.phoneme = None;
    }

    /// Fill the spelling drill with the words of `phoneme`.
    ///
    /// Re-selecting the active phoneme keeps the current word.
    pub fn choose_phoneme(&mut self, phoneme: &str, catalog: &Catalog) -> Result<()> {
        if self.phoneme.as_deref() == Some(phoneme) {
            return Ok(());
        }
        let words = catalog.words(self.learner.level, phoneme)?.to_vec();
        self.spelling.replace_pool(words);
        self.phoneme = Some(phoneme.to_string());
        Ok(())
    }
}

fn sentence_pool(catalog: &Catalog, level: Level) -> Vec<String> {
    catalog
        .sentences(level)
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}

/// Sessions keyed by id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, slot: SessionSlot) -> Uuid {
        let id = slot.learner.id;
        self.sessions.write().await.insert(id, slot);
        id
    }

    /// Run `f` against a session under the write lock.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionSlot) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        slot.last_seen = Utc::now();
        f(slot)
    }

    /// Run `f` against a session without changing it.
    ///
    /// Reads count as activity, so this takes the write lock to refresh
    /// `last_seen`.
    pub async fn read<T>(&self, id: Uuid, f: impl FnOnce(&SessionSlot) -> T) -> Result<T> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        slot.last_seen = Utc::now();
        Ok(f(slot))
    }

    pub async fn remove(&self, id: Uuid) -> Result<SessionSlot> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop sessions not seen for at least `max_idle` before `now`.
    ///
    /// Returns the number of sessions removed.
    pub async fn remove_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| {
            (now - slot.last_seen)
                .to_std()
                .map(|idle| idle < max_idle)
                .unwrap_or(true)
        });
        before - sessions.len()
    }
}

/// Periodically remove sessions idle for `max_idle` or longer.
pub fn spawn_idle_sweep(store: Arc<SessionStore>, max_idle: Duration) -> JoinHandle<()> {
    let period = (max_idle / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = store.remove_idle(Utc::now(), max_idle).await;
            if removed > 0 {
                tracing::info!("Removed {} idle sessions", removed);
            }
        }
    })
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Session {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> SessionSlot {
        let catalog = Catalog::builtin().unwrap();
        SessionSlot::new(LearnerSession::start(Utc::now()), &catalog)
    }

    #[tokio::test]
    async fn insert_and_remove() {
        let store = SessionStore::new();
        let id = store.insert(slot()).await;
        assert_eq!(store.len().await, 1);

        let removed = store.remove(id).await.unwrap();
        assert_eq!(removed.learner.id, id);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = SessionStore::new();
        let result = store.read(Uuid::new_v4(), |slot| slot.learner.score).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn with_session_mutates_in_place() {
        let store = SessionStore::new();
        let id = store.insert(slot()).await;
        store
            .with_session(id, |slot| {
                slot.learner.add_points(3);
                Ok(())
            })
            .await
            .unwrap();
        let score = store.read(id, |slot| slot.learner.score).await.unwrap();
        assert_eq!(score, 3);
    }

    #[tokio::test]
    async fn idle_sessions_are_swept() {
        let store = SessionStore::new();
        let stale = store.insert(slot()).await;
        let active = store.insert(slot()).await;
        let idle_limit = Duration::from_secs(30 * 60);

        let later = Utc::now() + chrono::Duration::minutes(45);
        store
            .with_session(active, |slot| {
                slot.last_seen = later - chrono::Duration::minutes(5);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(store.remove_idle(later, idle_limit).await, 1);
        assert!(matches!(
            store.read(stale, |slot| slot.learner.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(store.len().await, 1);

        // Nothing left to sweep.
        assert_eq!(store.remove_idle(later, idle_limit).await, 0);
    }

    #[tokio::test]
    async fn access_refreshes_last_seen() {
        let store = SessionStore::new();
        let mut stale = slot();
        stale.last_seen = Utc::now() - chrono::Duration::hours(2);
        let id = store.insert(stale).await;

        store.read(id, |_| ()).await.unwrap();

        let removed = store
            .remove_idle(Utc::now(), Duration::from_secs(60 * 60))
            .await;
        assert_eq!(removed, 0);
        assert_eq!(store.len().await, 1);
    }

    #[test]
    fn level_change_reloads_sentences() {
        let catalog = Catalog::builtin().unwrap();
        let mut slot = SessionSlot::new(LearnerSession::start(Utc::now()), &catalog);
        slot.sentences.select("The dog runs fast.").unwrap();
        slot.choose_phoneme("th", &catalog).unwrap();

        slot.set_level(Level::Hard, &catalog);
        assert_eq!(slot.learner.level, Level::Hard);
        assert_eq!(slot.sentences.current(), None);
        assert_eq!(slot.sentences.pool(), catalog.sentences(Level::Hard).unwrap());
        assert_eq!(slot.phoneme, None);
        assert!(slot.spelling.pool().is_empty());
    }

    #[test]
    fn choose_phoneme_fills_spelling_pool() {
        let catalog = Catalog::builtin().unwrap();
        let mut slot = SessionSlot::new(LearnerSession::start(Utc::now()), &catalog);
        slot.choose_phoneme("sh", &catalog).unwrap();
        slot.spelling.select("shell").unwrap();

        slot.choose_phoneme("sh", &catalog).unwrap();
        assert_eq!(slot.spelling.current(), Some("shell"));

        let err = slot.choose_phoneme("ough", &catalog).unwrap_err();
        assert!(matches!(err, ApiError::Content(_)));
        assert_eq!(slot.phoneme.as_deref(), Some("sh"));
    }
}
