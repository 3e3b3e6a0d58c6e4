// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Deserialize;

use super::ids::ReferenceId;

/// Raw bibliography entry as returned by the extraction call.
///
/// The collaborator is instructed to leave unresolvable fields empty, but
/// sentinel placeholder text has been observed in the wild; ingest scrubs it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub doi: Option<String>,
}

/// A bibliography entry. Absent fields stay absent; the rendering layer
/// omits them instead of showing placeholder text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    id: ReferenceId,
    authors: Option<String>,
    year: Option<String>,
    title: Option<String>,
    source: Option<String>,
    doi: Option<String>,
}

impl Reference {
    pub fn from_dto(dto: ReferenceDto) -> Self {
        let id = ReferenceId::new(dto.id).unwrap_or_else(|_| ReferenceId::fresh());
        Self {
            id,
            authors: scrub_field(&dto.authors),
            year: scrub_field(&dto.year),
            title: scrub_field(&dto.title),
            source: scrub_field(&dto.source),
            doi: dto.doi.as_deref().and_then(scrub_field),
        }
    }

    pub fn id(&self) -> &ReferenceId {
        &self.id
    }

    pub fn authors(&self) -> Option<&str> {
        self.authors.as_deref()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }
}

/// Finds parenthesized in-text citation candidates like `(Smith & Doe,
/// 2023)` or `(Chen et al., 2022)`, deduplicated in order of appearance.
///
/// A local pre-scan only; the bibliography itself always comes from the
/// extraction call.
pub fn detect_citations(text: &str) -> Vec<String> {
    static PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        regex::Regex::new(r"\(([^()]*\b(?:19|20)\d{2}[a-z]?)\)").expect("citation pattern")
    });

    let mut seen = Vec::new();
    for capture in pattern.captures_iter(text) {
        let citation = capture[1].trim().to_owned();
        if !seen.contains(&citation) {
            seen.push(citation);
        }
    }
    seen
}

/// Treats sentinel "missing information" marker text as absent.
///
/// Covers empty/whitespace values, bracketed placeholders like
/// `[information missing]`, and a handful of common filler words.
fn scrub_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return None;
    }
    let lowered = trimmed.to_ascii_lowercase();
    if matches!(
        lowered.as_str(),
        "n/a" | "na" | "null" | "none" | "unknown" | "not found" | "missing"
    ) {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{scrub_field, Reference, ReferenceDto};

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("[information missing]")]
    #[case("[Bilgi Eksik]")]
    #[case("N/A")]
    #[case("unknown")]
    #[case("Not Found")]
    fn scrubs_placeholder_values(#[case] value: &str) {
        assert_eq!(scrub_field(value), None);
    }

    #[rstest]
    #[case("Smith & Doe", "Smith & Doe")]
    #[case("  2023 ", "2023")]
    #[case("Nature [in press]", "Nature [in press]")]
    fn keeps_real_values(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(scrub_field(value).as_deref(), Some(expected));
    }

    #[test]
    fn from_dto_scrubs_and_keeps_wire_id() {
        let reference = Reference::from_dto(ReferenceDto {
            id: "ref-1".to_owned(),
            authors: "Smith & Doe".to_owned(),
            year: "2023".to_owned(),
            title: "[Bilgi Eksik]".to_owned(),
            source: String::new(),
            doi: Some("10.1000/xyz".to_owned()),
        });
        assert_eq!(reference.id().as_str(), "ref-1");
        assert_eq!(reference.authors(), Some("Smith & Doe"));
        assert_eq!(reference.year(), Some("2023"));
        assert_eq!(reference.title(), None);
        assert_eq!(reference.source(), None);
        assert_eq!(reference.doi(), Some("10.1000/xyz"));
    }

    #[test]
    fn from_dto_mints_id_when_absent() {
        let reference = Reference::from_dto(ReferenceDto::default());
        assert!(!reference.id().as_str().is_empty());
    }

    #[test]
    fn detects_in_text_citations_in_order() {
        let text = "Recent studies (Smith & Doe, 2023) and earlier surveys \
                    (Chen et al., 2022) agree; see also (Smith & Doe, 2023).";
        assert_eq!(
            super::detect_citations(text),
            vec!["Smith & Doe, 2023", "Chen et al., 2022"]
        );
    }

    #[test]
    fn ignores_parentheses_without_a_year() {
        assert!(super::detect_citations("an aside (not a citation) here").is_empty());
    }
}
