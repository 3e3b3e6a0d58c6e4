// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::SuggestionId;

/// The editing task that produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Rewrite,
    Shorten,
    Expand,
    Academic,
    Custom,
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewrite => f.write_str("rewrite"),
            Self::Shorten => f.write_str("shorten"),
            Self::Expand => f.write_str("expand"),
            Self::Academic => f.write_str("academic"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// What accepting a suggestion does to the document.
///
/// An explicit field, so the applier never has to sniff the suggested text
/// for a heading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionTarget {
    /// Replace the captured span (or fall back to text substitution).
    ReplaceSpan,
    /// Append a new heading block at the end of the body.
    InsertHeading,
}

/// A proposed text replacement awaiting user acceptance.
///
/// Immutable except for the `accepted` flag, which transitions false→true
/// exactly once, on apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    id: SuggestionId,
    original_text: String,
    suggested_text: String,
    kind: SuggestionKind,
    target: SuggestionTarget,
    accepted: bool,
}

impl Suggestion {
    pub fn new(
        original_text: impl Into<String>,
        suggested_text: impl Into<String>,
        kind: SuggestionKind,
        target: SuggestionTarget,
    ) -> Self {
        Self {
            id: SuggestionId::fresh(),
            original_text: original_text.into(),
            suggested_text: suggested_text.into(),
            kind,
            target,
            accepted: false,
        }
    }

    pub fn id(&self) -> &SuggestionId {
        &self.id
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn suggested_text(&self) -> &str {
        &self.suggested_text
    }

    pub fn kind(&self) -> SuggestionKind {
        self.kind
    }

    pub fn target(&self) -> SuggestionTarget {
        self.target
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Flips the accepted flag. Reports false when it was already set, so
    /// callers can keep the transition exactly-once.
    pub fn mark_accepted(&mut self) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Suggestion, SuggestionKind, SuggestionTarget};

    #[test]
    fn accepted_transitions_exactly_once() {
        let mut suggestion = Suggestion::new(
            "old",
            "new",
            SuggestionKind::Rewrite,
            SuggestionTarget::ReplaceSpan,
        );
        assert!(!suggestion.accepted());
        assert!(suggestion.mark_accepted());
        assert!(suggestion.accepted());
        assert!(!suggestion.mark_accepted());
        assert!(suggestion.accepted());
    }
}
