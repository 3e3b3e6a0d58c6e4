// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::chat::ChatLog;
use super::document::Document;
use super::reference::Reference;
use super::selection::Selection;
use super::settings::Settings;

/// The top-level state the TUI runs against: document, reference list,
/// settings, conversation log, and the (at most one) live selection.
///
/// Owned by the app shell and passed down explicitly; there are no ambient
/// singletons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    document: Document,
    references: Vec<Reference>,
    settings: Settings,
    chat: ChatLog,
    selection: Option<Selection>,
}

impl Session {
    pub fn new(document: Document, settings: Settings) -> Self {
        Self {
            document,
            references: Vec::new(),
            settings,
            chat: ChatLog::new(),
            selection: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Wholesale replacement; extraction results are never merged with the
    /// prior list.
    pub fn set_references(&mut self, references: Vec<Reference>) {
        self.references = references;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatLog {
        &mut self.chat
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
