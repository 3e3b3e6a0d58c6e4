// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scriba — terminal academic writing assistant (editor + AI sidebar).
//!
//! The document, chat log, and settings live in a single in-memory
//! `Session`; all substantive text work is delegated to a remote model
//! collaborator.

pub mod assist;
pub mod client;
pub mod model;
pub mod ops;
pub mod tui;
