//! Transcript message and conversation log types.

use std::time::SystemTime;

use vcommon::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Advisor,
}

/// A single transcript entry. Immutable once created; the log is append-only
/// apart from a full clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub origin: Origin,
    pub created_at: SystemTime,
}

impl Message {
    pub fn new(
        id: MessageId,
        origin: Origin,
        text: impl Into<String>,
        created_at: SystemTime,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            origin,
            created_at,
        }
    }

    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Origin::User, text, SystemTime::now())
    }

    pub fn advisor(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, Origin::Advisor, text, SystemTime::now())
    }
}

/// Ordered transcript with value semantics: `append` returns a new log and
/// never mutates the receiver, so snapshots taken before a suspension point
/// stay valid whatever happens to the live log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&self, message: Message) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Highest id in the log. Used to seed the id sequence after a restore.
    pub fn max_id(&self) -> Option<MessageId> {
        self.messages.iter().map(|message| message.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConversationLog, Message, Origin};
    use vcommon::MessageId;

    #[test]
    fn append_preserves_the_original_log() {
        let empty = ConversationLog::empty();
        let one = empty.append(Message::user(MessageId::new(1), "hello"));
        let two = one.append(Message::advisor(MessageId::new(2), "hi there"));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(two.messages()[0].origin, Origin::User);
        assert_eq!(two.messages()[1].origin, Origin::Advisor);
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut log = ConversationLog::empty();
        for n in 0..5 {
            log = log.append(Message::user(MessageId::new(n), format!("q{n}")));
        }

        let ids: Vec<u64> = log.iter().map(|m| m.id.value()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("q4"));
    }

    #[test]
    fn max_id_tracks_the_highest_entry() {
        assert_eq!(ConversationLog::empty().max_id(), None);

        let log = ConversationLog::from_messages(vec![
            Message::user(MessageId::new(7), "a"),
            Message::advisor(MessageId::new(12), "b"),
            Message::user(MessageId::new(9), "c"),
        ]);
        assert_eq!(log.max_id(), Some(MessageId::new(12)));
    }
}
