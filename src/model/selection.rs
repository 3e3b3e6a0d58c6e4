// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{Document, Region, SpanRange};

/// Screen-cell anchor for the floating action toolbar, in terminal
/// coordinates (row above the selection, column at its start).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenPoint {
    pub top: u16,
    pub left: u16,
}

/// The single live selection inside an editable region.
///
/// Created when a non-empty selection exists fully inside a recognized
/// region; cleared when a suggestion is applied or the user dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    text: String,
    range: SpanRange,
    anchor: ScreenPoint,
}

impl Selection {
    /// Captures a selection, or `None` for empty/collapsed spans.
    pub fn capture(
        document: &Document,
        region: Region,
        start: usize,
        end: usize,
        anchor: ScreenPoint,
    ) -> Option<Self> {
        if start >= end {
            return None;
        }
        let text = document.region_text(region);
        if end > text.len() || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        let captured = &text[start..end];
        if captured.trim().is_empty() {
            return None;
        }
        Some(Self {
            text: captured.to_owned(),
            range: SpanRange::new(region, start, end, captured),
            anchor,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> &SpanRange {
        &self.range
    }

    pub fn anchor(&self) -> ScreenPoint {
        self.anchor
    }

    /// Short excerpt used when logging a user action ("Shorten: \"...\"").
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut excerpt: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            excerpt.push('…');
        }
        excerpt
    }
}
