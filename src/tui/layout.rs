// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Soft-wrapping and byte-offset <-> screen-position mapping for the
//! editor pane. Offsets are byte indices into the region text; columns
//! are char counts from the wrapped line start.

/// One visual line: a byte range into the source text. The range never
/// contains a `\n` and never splits a char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WrappedLine {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// Greedy word wrap at `width` columns. Breaks after the last space that
/// fits; hard-breaks words longer than a line. Always yields at least one
/// line so every offset `0..=text.len()` maps to a position.
pub(crate) fn wrap_text(text: &str, width: u16) -> Vec<WrappedLine> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    let mut hard_start = 0;
    for hard_line in text.split('\n') {
        let hard_end = hard_start + hard_line.len();
        let mut start = hard_start;
        loop {
            let rest = &text[start..hard_end];
            let mut count = 0;
            let mut break_at = rest.len();
            let mut last_space = None;
            for (idx, ch) in rest.char_indices() {
                if count == width {
                    break_at = idx;
                    break;
                }
                if ch == ' ' {
                    last_space = Some(idx);
                }
                count += 1;
            }
            if break_at == rest.len() {
                lines.push(WrappedLine {
                    start,
                    end: hard_end,
                });
                break;
            }
            // Break after the space so it stays on the upper line.
            let split = match last_space {
                Some(space) => space + 1,
                None => break_at,
            };
            lines.push(WrappedLine {
                start,
                end: start + split,
            });
            start += split;
        }
        hard_start = hard_end + 1;
    }

    if lines.is_empty() {
        lines.push(WrappedLine { start: 0, end: 0 });
    }
    lines
}

/// Screen position of a byte offset: (visual row, char column).
pub(crate) fn position_of(text: &str, lines: &[WrappedLine], offset: usize) -> (u16, u16) {
    for (row, line) in lines.iter().enumerate() {
        let is_last = row + 1 == lines.len();
        if offset < line.end || (offset == line.end && is_last) {
            if offset < line.start {
                return (row as u16, 0);
            }
            let col = text[line.start..offset].chars().count();
            return (row as u16, col as u16);
        }
        // An offset exactly at a soft-break boundary belongs to the next
        // line; one at a hard `\n` belongs to the line it terminates.
        if offset == line.end && line.end < text.len() && text.as_bytes()[line.end] == b'\n' {
            let col = text[line.start..offset].chars().count();
            return (row as u16, col as u16);
        }
    }
    let row = lines.len().saturating_sub(1);
    (row as u16, 0)
}

/// Byte offset of a (row, char-column) position, clamped to the line.
pub(crate) fn offset_at(text: &str, lines: &[WrappedLine], row: u16, col: u16) -> usize {
    let Some(line) = lines.get(usize::from(row)) else {
        return text.len();
    };
    let mut offset = line.start;
    let mut remaining = col;
    for (idx, _) in text[line.start..line.end].char_indices() {
        if remaining == 0 {
            return line.start + idx;
        }
        offset = line.start + idx;
        remaining -= 1;
    }
    if remaining == 0 && offset < line.end {
        // Walked every char; land just past the last one.
        return line.end;
    }
    line.end.min(text.len()).max(line.start)
}

/// Moves an offset up or down one visual line, keeping the column.
pub(crate) fn move_vertical(text: &str, width: u16, offset: usize, delta: i32) -> usize {
    let lines = wrap_text(text, width);
    let (row, col) = position_of(text, &lines, offset);
    let target = i32::from(row) + delta;
    if target < 0 {
        return 0;
    }
    if target as usize >= lines.len() {
        return text.len();
    }
    offset_at(text, &lines, target as u16, col)
}

/// Previous char boundary, saturating at zero.
pub(crate) fn prev_char(text: &str, offset: usize) -> usize {
    text[..offset]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Next char boundary, saturating at the text length.
pub(crate) fn next_char(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map(|ch| offset + ch.len_utf8())
        .unwrap_or(text.len())
}

/// Start offset of the visual line containing `offset`.
pub(crate) fn line_start(text: &str, width: u16, offset: usize) -> usize {
    let lines = wrap_text(text, width);
    let (row, _) = position_of(text, &lines, offset);
    lines[usize::from(row)].start
}

/// End offset of the visual line containing `offset`.
pub(crate) fn line_end(text: &str, width: u16, offset: usize) -> usize {
    let lines = wrap_text(text, width);
    let (row, _) = position_of(text, &lines, offset);
    lines[usize::from(row)].end
}
