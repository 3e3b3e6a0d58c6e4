// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Command execution over the plain-text buffer, using lightweight
/// markdown-style markers (`**bold**`, `*italic*`, `- ` bullets, `## `
/// headings).
impl EditSurface for crate::model::Document {
    fn exec(&mut self, command: EditCommand<'_>) -> bool {
        match command {
            EditCommand::Bold { region, start, end } => toggle_wrap(self, region, start, end, "**"),
            EditCommand::Italic { region, start, end } => toggle_wrap(self, region, start, end, "*"),
            EditCommand::BulletList { region, start, end } => {
                toggle_bullets(self, region, start, end)
            }
            EditCommand::InsertHeading { text } => {
                let name = text.trim();
                let heading = if name.is_empty() {
                    "## New Section".to_owned()
                } else {
                    format!("## {name}")
                };
                self.append_paragraph(&heading);
                true
            }
            EditCommand::InsertText { region, at, text } => {
                self.replace_range(region, at, at, text)
            }
            EditCommand::ReplaceSpan {
                region,
                start,
                end,
                text,
            } => self.replace_range(region, start, end, text),
        }
    }
}

fn span_slice(document: &crate::model::Document, region: Region, start: usize, end: usize) -> Option<&str> {
    let text = document.region_text(region);
    if start >= end
        || end > text.len()
        || !text.is_char_boundary(start)
        || !text.is_char_boundary(end)
    {
        return None;
    }
    Some(&text[start..end])
}

fn toggle_wrap(
    document: &mut crate::model::Document,
    region: Region,
    start: usize,
    end: usize,
    marker: &str,
) -> bool {
    let Some(slice) = span_slice(document, region, start, end) else {
        return false;
    };

    let already_bold = slice.len() >= 4 && slice.starts_with("**") && slice.ends_with("**");
    let wrapped = match marker {
        // A bold span looks italic-wrapped from the outside; treat it as
        // unwrapped so italic stacks (`***x***`) instead of eating a star.
        "*" => !already_bold
            && slice.len() > 2 * marker.len()
            && slice.starts_with(marker)
            && slice.ends_with(marker),
        _ => slice.len() > 2 * marker.len()
            && slice.starts_with(marker)
            && slice.ends_with(marker),
    };

    let replacement = if wrapped {
        slice[marker.len()..slice.len() - marker.len()].to_owned()
    } else {
        format!("{marker}{slice}{marker}")
    };
    document.replace_range(region, start, end, &replacement)
}

fn toggle_bullets(
    document: &mut crate::model::Document,
    region: Region,
    start: usize,
    end: usize,
) -> bool {
    if span_slice(document, region, start, end).is_none() {
        return false;
    }
    let text = document.region_text(region);

    // Expand to whole lines so bullets never start mid-sentence.
    let window_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let window_end = text[end..].find('\n').map(|i| end + i).unwrap_or(text.len());
    let window = &text[window_start..window_end];

    let lines: Vec<&str> = window.split('\n').collect();
    let all_bulleted = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.starts_with("- "));

    let rebuilt: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                (*line).to_owned()
            } else if all_bulleted {
                line.strip_prefix("- ").unwrap_or(line).to_owned()
            } else if line.starts_with("- ") {
                (*line).to_owned()
            } else {
                format!("- {line}")
            }
        })
        .collect();

    document.replace_range(region, window_start, window_end, &rebuilt.join("\n"))
}
