// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// Named instruction profile controlling tone/strictness of model responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persona {
    #[default]
    StrictAcademic,
    FriendlyPeer,
    MinimalistEditor,
}

impl Persona {
    pub const ALL: [Self; 3] = [Self::StrictAcademic, Self::FriendlyPeer, Self::MinimalistEditor];

    pub fn label(self) -> &'static str {
        match self {
            Self::StrictAcademic => "Strict Academic",
            Self::FriendlyPeer => "Friendly Peer",
            Self::MinimalistEditor => "Minimalist Editor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::StrictAcademic => "Formal, rigorous tone",
            Self::FriendlyPeer => "Constructive, encouraging edits",
            Self::MinimalistEditor => "Minimal necessary changes, preserves voice",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Self::StrictAcademic => Self::FriendlyPeer,
            Self::FriendlyPeer => Self::MinimalistEditor,
            Self::MinimalistEditor => Self::StrictAcademic,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace([' ', '_'], "-").as_str() {
            "strict-academic" | "strict" => Ok(Self::StrictAcademic),
            "friendly-peer" | "friendly" => Ok(Self::FriendlyPeer),
            "minimalist-editor" | "minimalist" => Ok(Self::MinimalistEditor),
            other => Err(format!("unknown persona '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    Ieee,
    Harvard,
}

impl CitationStyle {
    pub const ALL: [Self; 4] = [Self::Apa, Self::Mla, Self::Ieee, Self::Harvard];

    pub fn label(self) -> &'static str {
        match self {
            Self::Apa => "APA",
            Self::Mla => "MLA",
            Self::Ieee => "IEEE",
            Self::Harvard => "Harvard",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Self::Apa => Self::Mla,
            Self::Mla => Self::Ieee,
            Self::Ieee => Self::Harvard,
            Self::Harvard => Self::Apa,
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Editor text-size preset. A terminal cannot change glyph size, so the
/// presets map to the editor page width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Normal, Self::Large];

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Normal => "Normal",
            Self::Large => "Large",
        }
    }

    /// Target page width of the editor column, in terminal cells.
    pub fn page_width(self) -> u16 {
        match self {
            Self::Small => 100,
            Self::Normal => 80,
            Self::Large => 60,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Self::Small => Self::Normal,
            Self::Normal => Self::Large,
            Self::Large => Self::Small,
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-tunable settings owned by the session. Not persisted across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub theme: ThemeMode,
    pub font_size: FontSize,
    pub citation_style: CitationStyle,
    pub persona: Persona,
}
