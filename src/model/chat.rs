// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{SystemTime, UNIX_EPOCH};

use super::ids::MessageId;
use super::suggestion::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One conversation turn. Never mutated after append, except to flip an
/// embedded suggestion's accepted flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    text: String,
    suggestion: Option<Suggestion>,
    timestamp_millis: u128,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>, suggestion: Option<Suggestion>) -> Self {
        let timestamp_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            id: MessageId::fresh(),
            role,
            text: text.into(),
            suggestion,
            timestamp_millis,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn timestamp_millis(&self) -> u128 {
        self.timestamp_millis
    }
}

/// Append-only ordered conversation log.
///
/// Entries are addressable by id for the accepted-flag mutation; there is no
/// deletion, editing, or reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatMessage::new(Role::User, text, None))
    }

    pub fn push_model(&mut self, text: impl Into<String>) -> MessageId {
        self.push(ChatMessage::new(Role::Model, text, None))
    }

    pub fn push_model_suggestion(
        &mut self,
        text: impl Into<String>,
        suggestion: Suggestion,
    ) -> MessageId {
        self.push(ChatMessage::new(Role::Model, text, Some(suggestion)))
    }

    fn push(&mut self, message: ChatMessage) -> MessageId {
        let id = message.id().clone();
        self.messages.push(message);
        id
    }

    pub fn message(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id() == id)
    }

    pub fn suggestion_for(&self, id: &MessageId) -> Option<&Suggestion> {
        self.message(id).and_then(ChatMessage::suggestion)
    }

    /// Flips the accepted flag on the suggestion attached to `id`.
    ///
    /// Reports false when the message is missing, carries no suggestion, or
    /// was already accepted.
    pub fn mark_suggestion_accepted(&mut self, id: &MessageId) -> bool {
        self.messages
            .iter_mut()
            .find(|m| m.id() == id)
            .and_then(|m| m.suggestion.as_mut())
            .is_some_and(Suggestion::mark_accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatLog, Role};
    use crate::model::{Suggestion, SuggestionKind, SuggestionTarget};

    #[test]
    fn preserves_insertion_order() {
        let mut log = ChatLog::new();
        log.push_user("first");
        log.push_model("second");
        log.push_user("third");

        let texts: Vec<&str> = log.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(log.messages()[0].role(), Role::User);
        assert_eq!(log.messages()[1].role(), Role::Model);
    }

    #[test]
    fn marks_embedded_suggestion_accepted_once() {
        let mut log = ChatLog::new();
        let suggestion = Suggestion::new(
            "old",
            "new",
            SuggestionKind::Shorten,
            SuggestionTarget::ReplaceSpan,
        );
        let id = log.push_model_suggestion("Here is the change:", suggestion);

        assert!(log.mark_suggestion_accepted(&id));
        assert!(!log.mark_suggestion_accepted(&id));
        assert!(log.suggestion_for(&id).expect("suggestion").accepted());
    }

    #[test]
    fn marking_plain_message_is_a_no_op() {
        let mut log = ChatLog::new();
        let id = log.push_model("no suggestion here");
        assert!(!log.mark_suggestion_accepted(&id));
    }
}
