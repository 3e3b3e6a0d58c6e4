// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// An editable text surface: the document title or its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Title,
    Body,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Body => f.write_str("body"),
        }
    }
}

/// An addressable span inside an editable region.
///
/// The captured text makes the handle reusable after the live cursor
/// selection has moved on: a range is only considered valid while the
/// document slice at `start..end` still equals what was captured. Offsets are
/// byte offsets on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRange {
    region: Region,
    start: usize,
    end: usize,
    captured: String,
}

impl SpanRange {
    pub fn new(region: Region, start: usize, end: usize, captured: impl Into<String>) -> Self {
        Self {
            region,
            start,
            end,
            captured: captured.into(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn captured(&self) -> &str {
        &self.captured
    }

    /// A handle is valid only while the region still contains the captured
    /// text at the captured offsets.
    pub fn is_valid_in(&self, document: &Document) -> bool {
        let text = document.region_text(self.region);
        self.start <= self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
            && &text[self.start..self.end] == self.captured
    }
}

/// The single in-memory document (no persistence across sessions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: String,
    content: String,
}

impl Document {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn region_text(&self, region: Region) -> &str {
        match region {
            Region::Title => &self.title,
            Region::Body => &self.content,
        }
    }

    pub fn set_region_text(&mut self, region: Region, text: impl Into<String>) {
        match region {
            Region::Title => self.title = text.into(),
            Region::Body => self.content = text.into(),
        }
    }

    /// Splices `replacement` over `start..end` of the given region.
    ///
    /// Callers are expected to hold a validated [`SpanRange`]; out-of-bounds
    /// or non-boundary offsets leave the document untouched and report false.
    pub fn replace_range(
        &mut self,
        region: Region,
        start: usize,
        end: usize,
        replacement: &str,
    ) -> bool {
        let text = match region {
            Region::Title => &mut self.title,
            Region::Body => &mut self.content,
        };
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return false;
        }
        text.replace_range(start..end, replacement);
        true
    }

    /// Appends a paragraph to the body, blank-line separated.
    pub fn append_paragraph(&mut self, text: &str) {
        if !self.content.is_empty() {
            self.content.push_str("\n\n");
        }
        self.content.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Region, SpanRange};

    #[test]
    fn replace_range_splices_body() {
        let mut document = Document::new("Intro", "climate change is here");
        assert!(document.replace_range(Region::Body, 0, 14, "warming"));
        assert_eq!(document.content(), "warming is here");
        assert_eq!(document.title(), "Intro");
    }

    #[test]
    fn replace_range_rejects_out_of_bounds() {
        let mut document = Document::new("Intro", "short");
        assert!(!document.replace_range(Region::Body, 0, 99, "nope"));
        assert_eq!(document.content(), "short");
    }

    #[test]
    fn replace_range_rejects_non_char_boundary() {
        let mut document = Document::new("Intro", "café body");
        // Offset 4 falls inside the two-byte 'é'.
        assert!(!document.replace_range(Region::Body, 3, 4, "x"));
        assert_eq!(document.content(), "café body");
    }

    #[test]
    fn span_range_validity_tracks_edits() {
        let mut document = Document::new("Intro", "climate change matters");
        let range = SpanRange::new(Region::Body, 0, 14, "climate change");
        assert!(range.is_valid_in(&document));

        document.set_content("the climate change matters");
        assert!(!range.is_valid_in(&document));
    }

    #[test]
    fn append_paragraph_separates_with_blank_line() {
        let mut document = Document::new("Intro", "first");
        document.append_paragraph("second");
        assert_eq!(document.content(), "first\n\nsecond");

        let mut empty = Document::default();
        empty.append_paragraph("only");
        assert_eq!(empty.content(), "only");
    }
}
