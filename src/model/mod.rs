// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Domain model: document, selection, suggestions, conversation log,
//! references, settings, and the session container that owns them.

pub mod chat;
pub mod document;
pub mod ids;
pub mod reference;
pub mod selection;
pub mod session;
pub mod settings;
pub mod suggestion;

pub use chat::{ChatLog, ChatMessage, Role};
pub use document::{Document, Region, SpanRange};
pub use ids::{Id, IdError, MessageId, ReferenceId, RequestId, SuggestionId};
pub use reference::{detect_citations, Reference, ReferenceDto};
pub use selection::{ScreenPoint, Selection};
pub use session::Session;
pub use settings::{CitationStyle, FontSize, Persona, Settings, ThemeMode};
pub use suggestion::{Suggestion, SuggestionKind, SuggestionTarget};
