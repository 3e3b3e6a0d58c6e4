// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The external model collaborator.
//!
//! Three logical operations — rewrite, answer, extract references — behind
//! the [`Collaborator`] trait, implemented against the Gemini
//! `generateContent` REST surface.

use std::fmt;

use crate::model::{CitationStyle, Persona, Reference};

pub mod gemini;

pub use gemini::GeminiClient;

/// The model collaborator contract. Rewrites return only revised content
/// with no conversational wrapping; extraction returns structured entries
/// whose unresolvable fields are empty rather than placeholder text.
#[allow(async_fn_in_trait)]
pub trait Collaborator {
    async fn rewrite(
        &self,
        task: &str,
        target_text: &str,
        constraints: &str,
        persona: Persona,
    ) -> Result<String, ClientError>;

    async fn answer(
        &self,
        question: &str,
        title: &str,
        content: &str,
        persona: Persona,
    ) -> Result<String, ClientError>;

    async fn extract_references(
        &self,
        content: &str,
        style: CitationStyle,
    ) -> Result<Vec<Reference>, ClientError>;
}

#[derive(Debug)]
pub enum ClientError {
    /// No credential configured; calls short-circuit without touching the
    /// network.
    MissingApiKey,
    Http(reqwest::Error),
    Status { status: u16, body: String },
    MalformedResponse(String),
    EmptyResponse,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => f.write_str("no API key configured"),
            Self::Http(err) => write!(f, "transport failure: {err}"),
            Self::Status { status, body } => {
                write!(f, "collaborator returned HTTP {status}: {body}")
            }
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
            Self::EmptyResponse => f.write_str("collaborator returned no content"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
