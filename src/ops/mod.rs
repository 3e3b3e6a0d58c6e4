// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations on the document: suggestion application and the
//! rich-text command surface.
//!
//! Applying a suggestion walks a fixed fallback chain: exact range
//! replacement while the captured handle is still valid, then text-based
//! substitution (title before body), then whole-body replacement for
//! near-document spans, then trailing append. Accepted suggestions are never
//! re-applied.

use std::fmt;

use crate::model::{MessageId, Region, Session, SuggestionId, SuggestionTarget};

/// Portion of the body a suggestion's original text must span before a
/// failed substitution is treated as a whole-document rewrite.
const WHOLE_BODY_FRACTION: f64 = 0.8;

/// How the document was changed by an accepted suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    InsertedHeading,
    ReplacedRange,
    ReplacedTitle,
    ReplacedFirstInBody,
    ReplacedWholeBody,
    AppendedToBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    MessageNotFound { message_id: MessageId },
    NoSuggestion { message_id: MessageId },
    AlreadyAccepted { suggestion_id: SuggestionId },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MessageNotFound { message_id } => {
                write!(f, "message not found (id={message_id})")
            }
            Self::NoSuggestion { message_id } => {
                write!(f, "message carries no suggestion (id={message_id})")
            }
            Self::AlreadyAccepted { suggestion_id } => {
                write!(f, "suggestion already accepted (id={suggestion_id})")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

/// Applies the suggestion attached to `message_id` to the session document.
///
/// On success the suggestion's accepted flag is set (exactly once) and the
/// live selection is cleared. A second apply attempt reports
/// [`ApplyError::AlreadyAccepted`] and leaves the document untouched.
pub fn apply_suggestion(
    session: &mut Session,
    message_id: &MessageId,
) -> Result<ApplyOutcome, ApplyError> {
    let message = session
        .chat()
        .message(message_id)
        .ok_or_else(|| ApplyError::MessageNotFound {
            message_id: message_id.clone(),
        })?;
    let suggestion = message
        .suggestion()
        .ok_or_else(|| ApplyError::NoSuggestion {
            message_id: message_id.clone(),
        })?;
    if suggestion.accepted() {
        return Err(ApplyError::AlreadyAccepted {
            suggestion_id: suggestion.id().clone(),
        });
    }

    let original = suggestion.original_text().to_owned();
    let suggested = suggestion.suggested_text().to_owned();
    let target = suggestion.target();

    let outcome = match target {
        SuggestionTarget::InsertHeading => {
            session
                .document_mut()
                .exec(EditCommand::InsertHeading { text: &suggested });
            ApplyOutcome::InsertedHeading
        }
        SuggestionTarget::ReplaceSpan => {
            let range_replace = session
                .selection()
                .map(|selection| selection.range().clone())
                .filter(|range| range.is_valid_in(session.document()));
            match range_replace {
                Some(range) => {
                    session.document_mut().exec(EditCommand::ReplaceSpan {
                        region: range.region(),
                        start: range.start(),
                        end: range.end(),
                        text: &suggested,
                    });
                    ApplyOutcome::ReplacedRange
                }
                None => fallback_replace(session, &original, &suggested),
            }
        }
    };

    session.chat_mut().mark_suggestion_accepted(message_id);
    session.clear_selection();
    Ok(outcome)
}

/// Text-based substitution used when no valid range handle exists.
///
/// Title match wins over body match, even when the original text occurs in
/// both regions.
fn fallback_replace(session: &mut Session, original: &str, suggested: &str) -> ApplyOutcome {
    let title = session.document().title().to_owned();
    let body = session.document().content().to_owned();

    if !original.is_empty() && (title == original || title.contains(original)) {
        session.document_mut().set_title(suggested);
        return ApplyOutcome::ReplacedTitle;
    }

    if !original.is_empty() {
        if let Some(at) = body.find(original) {
            session.document_mut().exec(EditCommand::ReplaceSpan {
                region: Region::Body,
                start: at,
                end: at + original.len(),
                text: suggested,
            });
            return ApplyOutcome::ReplacedFirstInBody;
        }
    }

    if original.is_empty() || original.len() as f64 > body.len() as f64 * WHOLE_BODY_FRACTION {
        session.document_mut().set_content(suggested);
        return ApplyOutcome::ReplacedWholeBody;
    }

    session.document_mut().append_paragraph(suggested);
    ApplyOutcome::AppendedToBody
}

/// The rich-text command set: the contract is the command, not the execution
/// primitive of any particular surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand<'a> {
    Bold {
        region: Region,
        start: usize,
        end: usize,
    },
    Italic {
        region: Region,
        start: usize,
        end: usize,
    },
    BulletList {
        region: Region,
        start: usize,
        end: usize,
    },
    InsertHeading {
        text: &'a str,
    },
    InsertText {
        region: Region,
        at: usize,
        text: &'a str,
    },
    ReplaceSpan {
        region: Region,
        start: usize,
        end: usize,
        text: &'a str,
    },
}

/// An editable surface that can execute rich-text commands.
pub trait EditSurface {
    /// Executes a command; reports false when the span was unusable and the
    /// surface is unchanged.
    fn exec(&mut self, command: EditCommand<'_>) -> bool;
}

// Extracted command execution over the plain-text document buffer.
include!("surface.rs");
