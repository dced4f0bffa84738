//! Request orchestration: single-flight submission, settlement, history clear.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use vadvisor::AdvisorClient;
use vcommon::MessageIdSequence;

use crate::{
    ConversationLog, IgnoreReason, InMemorySessionStore, Message, NoopSessionHooks, SessionHooks,
    SessionStore, Settlement,
};

/// Shown when the endpoint replied but carried no usable answer text.
pub const EMPTY_ANSWER_FALLBACK: &str =
    "⚠️ Désolé, je n’ai pas pu récupérer la réponse. Réessayez plus tard.";

/// Shown when the remote call failed outright.
pub const REQUEST_FAILED_FALLBACK: &str =
    "⚠️ Je n'ai pas pu traiter votre demande. Réessayez plus tard. Pour les cas graves, consultez un médecin.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed(TurnResult),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResult {
    pub user_message: Message,
    /// `None` when the settlement was dropped because the history was
    /// cleared while the call was outstanding.
    pub advisor_message: Option<Message>,
    pub settlement: Settlement,
}

/// Conversation session manager.
///
/// Owns the transcript, the busy flag, and the one outstanding advisory
/// call. `submit` is the single entry point for user questions; it is a
/// no-op while a call is in flight or when the question is blank, so the
/// service stays correct even when the UI fails to disable its submit
/// control.
pub struct SessionService {
    advisor: Arc<dyn AdvisorClient>,
    store: Arc<dyn SessionStore>,
    hooks: Arc<dyn SessionHooks>,
    ids: MessageIdSequence,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
    log: ConversationLog,
    generation: u64,
}

pub struct SessionServiceBuilder {
    advisor: Arc<dyn AdvisorClient>,
    store: Option<Arc<dyn SessionStore>>,
    hooks: Option<Arc<dyn SessionHooks>>,
}

impl SessionServiceBuilder {
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn build(self) -> SessionService {
        SessionService {
            advisor: self.advisor,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemorySessionStore::new())),
            hooks: self.hooks.unwrap_or_else(|| Arc::new(NoopSessionHooks)),
            ids: MessageIdSequence::new(),
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }
}

impl SessionService {
    pub fn builder(advisor: Arc<dyn AdvisorClient>) -> SessionServiceBuilder {
        SessionServiceBuilder {
            advisor,
            store: None,
            hooks: None,
        }
    }

    pub fn new(advisor: Arc<dyn AdvisorClient>, store: Arc<dyn SessionStore>) -> Self {
        Self::builder(advisor).store(store).build()
    }

    /// Loads the persisted transcript into the live log and seeds the id
    /// sequence above every restored id. A missing or unreadable transcript
    /// silently becomes an empty one; nothing is persisted back at this
    /// point, so a saved session survives an empty startup.
    pub async fn restore(&self) -> ConversationLog {
        let log = match self.store.restore().await {
            Ok(log) => log,
            Err(error) => {
                self.hooks.on_persistence_failure("restore", &error);
                ConversationLog::empty()
            }
        };

        if let Some(max_id) = log.max_id() {
            self.ids.advance_past(max_id);
        }

        let mut state = self.state();
        state.log = log.clone();
        log
    }

    /// Submits one question. Runs the full turn: append the user message,
    /// issue the advisory call, append the settlement message, release the
    /// busy flag. Blank input and an in-flight call both make this a no-op.
    pub async fn submit(&self, question: &str) -> SubmitOutcome {
        if question.trim().is_empty() {
            self.hooks.on_submit_ignored(IgnoreReason::EmptyInput);
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.hooks.on_submit_ignored(IgnoreReason::Busy);
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }

        let user_message = Message::user(self.ids.next_id(), question);
        let (generation, snapshot) = {
            let mut state = self.state();
            state.log = state.log.append(user_message.clone());
            (state.generation, state.log.clone())
        };

        self.persist(snapshot).await;
        self.hooks.on_turn_start(user_message.id);

        let started = Instant::now();
        let outcome = self.advisor.ask(question).await;
        let elapsed = started.elapsed();

        let (settlement, text) = match outcome {
            Ok(reply) => match reply.usable_answer() {
                Some(answer) => (Settlement::Answered, answer.to_string()),
                None => (Settlement::EmptyAnswer, EMPTY_ANSWER_FALLBACK.to_string()),
            },
            Err(error) => {
                self.hooks.on_remote_failure(&error);
                (Settlement::Failed, REQUEST_FAILED_FALLBACK.to_string())
            }
        };

        // A settlement lands only on the log generation it targeted; when the
        // history was cleared mid-flight, the reply is dropped instead of
        // re-populating an emptied transcript.
        let settled = {
            let mut state = self.state();
            if state.generation == generation {
                let advisor_message = Message::advisor(self.ids.next_id(), text);
                state.log = state.log.append(advisor_message.clone());
                Some((advisor_message, state.log.clone()))
            } else {
                None
            }
        };

        let advisor_message = match settled {
            Some((message, snapshot)) => {
                self.persist(snapshot).await;
                Some(message)
            }
            None => {
                self.hooks.on_stale_settlement_dropped(generation);
                None
            }
        };

        self.hooks.on_turn_settled(settlement, elapsed);
        self.busy.store(false, Ordering::Release);

        SubmitOutcome::Completed(TurnResult {
            user_message,
            advisor_message,
            settlement,
        })
    }

    /// Empties the transcript and erases its persisted copy. Never blocked
    /// by an in-flight call; bumping the generation makes that call's
    /// eventual settlement stale.
    pub async fn clear_history(&self) {
        {
            let mut state = self.state();
            state.log = ConversationLog::empty();
            state.generation += 1;
        }

        if let Err(error) = self.store.erase().await {
            self.hooks.on_persistence_failure("erase", &error);
        }

        self.hooks.on_history_cleared();
    }

    /// Current transcript snapshot.
    pub fn transcript(&self) -> ConversationLog {
        self.state().log.clone()
    }

    /// True exactly while one advisory call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    async fn persist(&self, snapshot: ConversationLog) {
        // Empty logs are never written: persisting the empty startup log
        // would clobber a previously saved transcript.
        if snapshot.is_empty() {
            return;
        }

        if let Err(error) = self.store.persist(snapshot).await {
            self.hooks.on_persistence_failure("persist", &error);
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // Log updates are single assignments; a poisoned lock still holds a
        // consistent value, so recover it instead of propagating the panic.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
