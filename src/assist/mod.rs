// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Suggestion pipeline: task catalog, chat routing, and the async worker
//! that talks to the model collaborator.
//!
//! Every failure is absorbed into a fixed model-turn message; nothing in
//! this module raises an unhandled fault to the UI.

use crate::model::{CitationStyle, Persona, Reference, Selection, Suggestion, SuggestionKind};

pub mod intent;
pub mod worker;

pub use intent::{classify, ChatRoute, RewriteTarget};

/// Fixed user-visible message for any collaborator failure.
pub const REQUEST_FAILED_MESSAGE: &str = "Sorry, I could not complete that request.";

/// Fixed user-visible message when no credential is configured.
pub const MISSING_KEY_MESSAGE: &str =
    "API key missing. Set GEMINI_API_KEY to enable the assistant.";

/// Lead text of a model turn that carries a rewrite suggestion.
pub const SUGGESTION_LEAD: &str = "Here is the suggested change:";

/// Lead text of a model turn that carries a heading suggestion.
pub const HEADING_LEAD: &str = "Prepared a heading that fits the text:";

/// Maximum characters of the selection excerpt echoed into the user turn.
pub const ACTION_EXCERPT_CHARS: usize = 30;

/// A named editing task: the label shown in the UI plus the task/constraint
/// strings sent to the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub label: &'static str,
    pub task: &'static str,
    pub constraints: &'static str,
    pub kind: SuggestionKind,
}

pub const TASK_SHORTEN: TaskSpec = TaskSpec {
    label: "Shorten",
    task: "Shorten this text",
    constraints: "Output length: shorter",
    kind: SuggestionKind::Shorten,
};

pub const TASK_ACADEMIC: TaskSpec = TaskSpec {
    label: "Academic",
    task: "Make it more academic",
    constraints: "Tone: Academic",
    kind: SuggestionKind::Academic,
};

pub const TASK_REWRITE: TaskSpec = TaskSpec {
    label: "Rewrite",
    task: "Rewrite",
    constraints: "Focus on academic quality and clarity.",
    kind: SuggestionKind::Rewrite,
};

pub const TASK_EXPAND: TaskSpec = TaskSpec {
    label: "Expand",
    task: "Expand this text",
    constraints: "Output length: longer. Develop the argument.",
    kind: SuggestionKind::Expand,
};

pub const TASK_SIMPLIFY: TaskSpec = TaskSpec {
    label: "Simplify",
    task: "Simplify the language",
    constraints: "Clarity over complexity.",
    kind: SuggestionKind::Custom,
};

/// Quick actions offered in the empty chat state.
pub const QUICK_ACTIONS: [TaskSpec; 4] = [TASK_ACADEMIC, TASK_SHORTEN, TASK_SIMPLIFY, TASK_EXPAND];

/// Actions on the floating selection toolbar.
pub const TOOLBAR_ACTIONS: [TaskSpec; 2] = [TASK_SHORTEN, TASK_ACADEMIC];

/// The user-turn text recorded before a task is sent: the task plus a short
/// excerpt of the selection when one exists.
pub fn user_action_text(task: &str, selection: Option<&Selection>) -> String {
    match selection {
        Some(selection) => format!("{task}: \"{}\"", selection.excerpt(ACTION_EXCERPT_CHARS)),
        None => task.to_owned(),
    }
}

/// One rewrite call: task, target text, constraints, persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    pub task: String,
    pub target_text: String,
    pub constraints: String,
    pub kind: SuggestionKind,
    pub persona: Persona,
}

/// Commands accepted by the assistant worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistCommand {
    Rewrite(RewriteRequest),
    Ask {
        question: String,
        title: String,
        content: String,
        persona: Persona,
    },
    ExtractReferences {
        content: String,
        style: CitationStyle,
    },
}

/// The operation a worker event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOp {
    Rewrite,
    Ask,
    ExtractReferences,
}

/// Events delivered back to the UI, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistEvent {
    Suggestion { lead: String, suggestion: Suggestion },
    Answer { text: String },
    References { references: Vec<Reference> },
    Failed { op: AssistOp, message: String },
}
