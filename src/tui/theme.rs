// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

use crate::model::ThemeMode;

/// Styles derived from the session's theme mode. Rebuilt whenever the
/// theme toggles; no caching.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TuiTheme {
    mode: ThemeMode,
}

impl TuiTheme {
    pub(crate) fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub(crate) fn base_style(&self) -> Style {
        match self.mode {
            ThemeMode::Dark => Style::default().fg(Color::Gray),
            ThemeMode::Light => Style::default().fg(Color::Black).bg(Color::White),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.accent())
        } else {
            self.base_style().fg(self.muted())
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn toolbar_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn banner_style(&self) -> Style {
        self.base_style().fg(self.accent())
    }

    pub(crate) fn user_turn_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn model_turn_style(&self) -> Style {
        self.base_style()
    }

    pub(crate) fn suggestion_style(&self) -> Style {
        self.base_style().fg(self.accent())
    }

    pub(crate) fn accepted_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::CROSSED_OUT)
    }

    pub(crate) fn thinking_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.muted())
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    fn accent(&self) -> Color {
        match self.mode {
            ThemeMode::Dark => Color::LightCyan,
            ThemeMode::Light => Color::Blue,
        }
    }

    fn muted(&self) -> Color {
        match self.mode {
            ThemeMode::Dark => Color::DarkGray,
            ThemeMode::Light => Color::Gray,
        }
    }
}
