// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Async worker that drains assistant commands and posts events back to
//! the UI thread.
//!
//! Each command runs as its own local task, so overlapping requests are
//! not serialized; events land in whatever order the collaborator answers.

use tracing::{debug, warn};

use crate::client::{ClientError, Collaborator};
use crate::model::{Suggestion, SuggestionTarget};

use super::{
    AssistCommand, AssistEvent, AssistOp, RewriteRequest, MISSING_KEY_MESSAGE,
    REQUEST_FAILED_MESSAGE, SUGGESTION_LEAD,
};

/// Runs until the command channel closes. Must be spawned on a
/// [`tokio::task::LocalSet`]; collaborator futures are not `Send`.
pub async fn run<C>(
    client: C,
    mut commands: tokio::sync::mpsc::UnboundedReceiver<AssistCommand>,
    events: std::sync::mpsc::Sender<AssistEvent>,
) where
    C: Collaborator + Clone + 'static,
{
    while let Some(command) = commands.recv().await {
        let client = client.clone();
        let events = events.clone();
        tokio::task::spawn_local(async move {
            let event = handle(&client, command).await;
            // The UI dropping its receiver means shutdown; nothing to do.
            let _ = events.send(event);
        });
    }
    debug!("assistant worker shutting down");
}

async fn handle<C: Collaborator>(client: &C, command: AssistCommand) -> AssistEvent {
    match command {
        AssistCommand::Rewrite(request) => rewrite(client, request).await,
        AssistCommand::Ask {
            question,
            title,
            content,
            persona,
        } => match client.answer(&question, &title, &content, persona).await {
            Ok(text) => AssistEvent::Answer { text },
            Err(err) => failed(AssistOp::Ask, err),
        },
        AssistCommand::ExtractReferences { content, style } => {
            match client.extract_references(&content, style).await {
                Ok(references) => {
                    debug!(count = references.len(), "extracted references");
                    AssistEvent::References { references }
                }
                Err(err) => failed(AssistOp::ExtractReferences, err),
            }
        }
    }
}

async fn rewrite<C: Collaborator>(client: &C, request: RewriteRequest) -> AssistEvent {
    let RewriteRequest {
        task,
        target_text,
        constraints,
        kind,
        persona,
    } = request;
    match client
        .rewrite(&task, &target_text, &constraints, persona)
        .await
    {
        Ok(revised) => AssistEvent::Suggestion {
            lead: SUGGESTION_LEAD.to_owned(),
            suggestion: Suggestion::new(
                target_text,
                revised.trim().to_owned(),
                kind,
                SuggestionTarget::ReplaceSpan,
            ),
        },
        Err(err) => failed(AssistOp::Rewrite, err),
    }
}

fn failed(op: AssistOp, err: ClientError) -> AssistEvent {
    warn!(?op, error = %err, "assistant request failed");
    let message = match err {
        ClientError::MissingApiKey => MISSING_KEY_MESSAGE,
        _ => REQUEST_FAILED_MESSAGE,
    };
    AssistEvent::Failed {
        op,
        message: message.to_owned(),
    }
}
