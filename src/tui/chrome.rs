// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Screen/focus enums, panel titles, footer help, and toast helpers used
/// by TUI rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Editor,
    References,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Editor,
    Chat,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn footer_help_pairs(screen: Screen, focus: Focus) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Editor => match focus {
            Focus::Editor => &[
                ("Tab", "chat"),
                ("F2", "references"),
                ("F3", "settings"),
                ("Shift+arrows", "select"),
                ("Alt+B/I/L", "style"),
                ("Alt+H", "heading"),
                ("Alt+R", "rewrite"),
                ("Ctrl+Q", "quit"),
            ],
            Focus::Chat => &[
                ("Tab", "editor"),
                ("Enter", "send"),
                ("Alt+Y", "apply suggestion"),
                ("Alt+1..4", "quick actions"),
                ("Esc", "dismiss/back"),
                ("Ctrl+Q", "quit"),
            ],
        },
        Screen::References => &[
            ("s", "scan document"),
            ("Esc", "editor"),
            ("q", "quit"),
        ],
        Screen::Settings => &[
            ("Up/Down", "row"),
            ("Enter", "change"),
            ("Esc", "editor"),
            ("q", "quit"),
        ],
    }
}

fn footer_help_line(
    screen: Screen,
    focus: Focus,
    theme: &TuiTheme,
    toast_suffix: &str,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (key, label)) in footer_help_pairs(screen, focus).iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", theme.muted_style()));
        }
        spans.push(Span::styled(format!("[{key}]"), theme.footer_key_style()));
        spans.push(Span::styled(format!(" {label}"), theme.muted_style()));
    }
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), theme.banner_style()));
    }
    Line::from(spans)
}

fn outcome_toast(outcome: ApplyOutcome) -> &'static str {
    match outcome {
        ApplyOutcome::InsertedHeading => "Inserted heading",
        ApplyOutcome::ReplacedRange => "Applied to selection",
        ApplyOutcome::ReplacedTitle => "Replaced title",
        ApplyOutcome::ReplacedFirstInBody => "Replaced matching text",
        ApplyOutcome::ReplacedWholeBody => "Replaced document body",
        ApplyOutcome::AppendedToBody => "Appended to document",
    }
}

/// One rendered bibliography entry; absent fields are omitted, never
/// shown as placeholder text.
fn reference_line(reference: &Reference) -> String {
    let mut parts = Vec::new();
    match (reference.authors(), reference.year()) {
        (Some(authors), Some(year)) => parts.push(format!("{authors} ({year}).")),
        (Some(authors), None) => parts.push(format!("{authors}.")),
        (None, Some(year)) => parts.push(format!("({year}).")),
        (None, None) => {}
    }
    if let Some(title) = reference.title() {
        parts.push(format!("{title}."));
    }
    if let Some(source) = reference.source() {
        parts.push(format!("{source}."));
    }
    if let Some(doi) = reference.doi() {
        parts.push(format!("doi:{doi}"));
    }
    if parts.is_empty() {
        return reference.id().as_str().to_owned();
    }
    parts.join(" ")
}

/// Styled visual lines for an editable region, splitting spans at the
/// selection bounds.
fn region_lines(
    text: &str,
    width: u16,
    selection: Option<(usize, usize)>,
    base: Style,
    selected: Style,
) -> Vec<Line<'static>> {
    let wrapped = layout::wrap_text(text, width);
    let mut out = Vec::with_capacity(wrapped.len());
    for line in &wrapped {
        let mut spans = Vec::new();
        match selection {
            Some((sel_start, sel_end)) if sel_start < line.end && sel_end > line.start => {
                let lo = sel_start.max(line.start);
                let hi = sel_end.min(line.end);
                if line.start < lo {
                    spans.push(Span::styled(text[line.start..lo].to_owned(), base));
                }
                spans.push(Span::styled(text[lo..hi].to_owned(), selected));
                if hi < line.end {
                    spans.push(Span::styled(text[hi..line.end].to_owned(), base));
                }
            }
            _ => spans.push(Span::styled(text[line.start..line.end].to_owned(), base)),
        }
        out.push(Line::from(spans));
    }
    out
}
