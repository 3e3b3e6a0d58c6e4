// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rule-table classification of free-text chat input.
//!
//! Rules are checked in table order; the first whose keyword set matches
//! decides the route. Inputs with no matching rule fall through to general
//! question answering.

/// Where a routed rewrite should take its target text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteTarget {
    Title,
    Selection,
    Body,
}

/// The resolved route for one chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRoute {
    /// Answered locally with a heading suggestion; no model round trip for
    /// the route decision.
    InsertHeading { title: String },
    Rewrite { target: RewriteTarget },
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    InsertHeading,
    Edit,
}

struct KeywordRule {
    kind: RuleKind,
    keywords: &'static [&'static str],
}

/// Ordered rule table. Heading intent must precede edit intent because its
/// phrasings share words with the edit keyword set.
const RULES: &[KeywordRule] = &[
    KeywordRule {
        kind: RuleKind::InsertHeading,
        keywords: &[
            "add a heading",
            "add heading",
            "insert a heading",
            "insert heading",
            "new heading",
            "add a section",
            "new section",
            "second heading",
        ],
    },
    KeywordRule {
        kind: RuleKind::Edit,
        keywords: &[
            "translate",
            "rewrite",
            "rephrase",
            "paraphrase",
            "shorten",
            "shorter",
            "expand",
            "longer",
            "summarize",
            "summarise",
            "simplify",
            "improve",
            "refine",
            "fix",
            "correct",
            "edit",
            "academic",
            "concise",
            "formal",
        ],
    },
];

/// Wording that retargets an edit at the document title.
const TITLE_KEYWORDS: &[&str] = &["title", "the heading"];

/// Topic words used to name a locally suggested heading.
const HEADING_TOPICS: &[(&str, &str)] = &[
    ("literature", "Literature Review"),
    ("method", "Methods"),
    ("result", "Results"),
    ("discussion", "Discussion"),
    ("conclusion", "Conclusion"),
];

const DEFAULT_HEADING: &str = "New Section";

/// Classifies one chat input against the rule table.
pub fn classify(input: &str, has_selection: bool) -> ChatRoute {
    let lowered = input.to_lowercase();

    for rule in RULES {
        if !rule.keywords.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }
        match rule.kind {
            RuleKind::InsertHeading => {
                return ChatRoute::InsertHeading {
                    title: heading_title(&lowered),
                };
            }
            RuleKind::Edit => {
                let target = if TITLE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
                    RewriteTarget::Title
                } else if has_selection {
                    RewriteTarget::Selection
                } else {
                    RewriteTarget::Body
                };
                return ChatRoute::Rewrite { target };
            }
        }
    }

    ChatRoute::Ask
}

fn heading_title(lowered: &str) -> String {
    HEADING_TOPICS
        .iter()
        .find(|(topic, _)| lowered.contains(topic))
        .map(|(_, title)| (*title).to_owned())
        .unwrap_or_else(|| DEFAULT_HEADING.to_owned())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{classify, ChatRoute, RewriteTarget};

    #[rstest]
    #[case("please shorten this paragraph", true, RewriteTarget::Selection)]
    #[case("please shorten this paragraph", false, RewriteTarget::Body)]
    #[case("make the title more academic", true, RewriteTarget::Title)]
    #[case("fix the title please", false, RewriteTarget::Title)]
    #[case("translate this to English", true, RewriteTarget::Selection)]
    fn routes_edit_intent(
        #[case] input: &str,
        #[case] has_selection: bool,
        #[case] expected: RewriteTarget,
    ) {
        assert_eq!(
            classify(input, has_selection),
            ChatRoute::Rewrite { target: expected }
        );
    }

    #[rstest]
    #[case("add a heading about the literature", "Literature Review")]
    #[case("insert heading for methods", "Methods")]
    #[case("add a section please", "New Section")]
    fn routes_heading_intent(#[case] input: &str, #[case] title: &str) {
        assert_eq!(
            classify(input, false),
            ChatRoute::InsertHeading {
                title: title.to_owned()
            }
        );
    }

    #[test]
    fn heading_rule_wins_over_edit_keywords() {
        // "add a heading" phrasings also contain no edit keyword, but even a
        // mixed phrasing resolves to the heading rule first.
        assert!(matches!(
            classify("add a heading and fix the flow", false),
            ChatRoute::InsertHeading { .. }
        ));
    }

    #[rstest]
    #[case("what does this paragraph argue?")]
    #[case("who is Smith?")]
    #[case("")]
    fn everything_else_is_a_question(#[case] input: &str) {
        assert_eq!(classify(input, true), ChatRoute::Ask);
    }
}
