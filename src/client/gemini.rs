// SPDX-FileCopyrightText: 2026 Scriba Authors
// SPDX-License-Identifier: LicenseRef-Scriba-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Scriba and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::model::{CitationStyle, Persona, Reference, ReferenceDto};

use super::{ClientError, Collaborator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Flash tier handles rewrites and question answering.
pub const FLASH_MODEL: &str = "gemini-3-flash-preview";

/// Pro tier handles search-grounded reference extraction.
pub const PRO_MODEL: &str = "gemini-3-pro-preview";

/// Question answering sees at most this many characters of document context.
pub const CONTEXT_PREFIX_CHARS: usize = 1000;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for the Gemini `generateContent` REST surface.
///
/// Calls carry no timeout: there is no retry, backoff, or cancellation
/// anywhere in the pipeline, and a hung call simply leaves the thinking
/// indicator up.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    flash_model: String,
    pro_model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            flash_model: FLASH_MODEL.to_owned(),
            pro_model: PRO_MODEL.to_owned(),
        }
    }

    /// Reads the credential from `GEMINI_API_KEY`; an absent key is not an
    /// error here — every call then short-circuits to
    /// [`ClientError::MissingApiKey`].
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_flash_model(mut self, model: impl Into<String>) -> Self {
        self.flash_model = model.into();
        self
    }

    pub fn with_pro_model(mut self, model: impl Into<String>) -> Self {
        self.pro_model = model.into();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, ClientError> {
        let api_key = self.api_key.as_deref().ok_or(ClientError::MissingApiKey)?;
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        debug!(model, "sending generateContent request");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model, status = status.as_u16(), "generateContent failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.first_text().ok_or(ClientError::EmptyResponse)?;
        Ok(text)
    }
}

impl Collaborator for GeminiClient {
    async fn rewrite(
        &self,
        task: &str,
        target_text: &str,
        constraints: &str,
        persona: Persona,
    ) -> Result<String, ClientError> {
        let request = GenerateContentRequest::new(rewrite_prompt(task, target_text, constraints))
            .with_system_instruction(system_instruction(persona));
        let text = self.generate(&self.flash_model, &request).await?;
        let revised = text.trim().to_owned();
        if revised.is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(revised)
    }

    async fn answer(
        &self,
        question: &str,
        title: &str,
        content: &str,
        persona: Persona,
    ) -> Result<String, ClientError> {
        let request = GenerateContentRequest::new(answer_prompt(question, title, content))
            .with_system_instruction(system_instruction(persona));
        let text = self.generate(&self.flash_model, &request).await?;
        Ok(text.trim().to_owned())
    }

    async fn extract_references(
        &self,
        content: &str,
        style: CitationStyle,
    ) -> Result<Vec<Reference>, ClientError> {
        let request = GenerateContentRequest::new(extraction_prompt(content, style))
            .with_search_grounding()
            .with_json_response(reference_schema());
        let text = self.generate(&self.pro_model, &request).await?;
        parse_reference_payload(&text)
    }
}

/// The instruction profile of the active persona, prepended to every call.
pub fn system_instruction(persona: Persona) -> String {
    let profile = match persona {
        Persona::StrictAcademic => {
            "You are a highly formal academic editor. Prioritize objective language, formal \
             sentence structures, and precise academic terminology. Be rigorous."
        }
        Persona::FriendlyPeer => {
            "You are a helpful academic peer. Provide constructive edits that improve flow and \
             readability while maintaining professional standards. Be encouraging."
        }
        Persona::MinimalistEditor => {
            "You are a minimalist editor. Make only absolutely necessary changes to fix errors \
             or clarity issues. Preserve the author's original voice strictly."
        }
    };
    format!(
        "{profile}\n\
         Your role is to assist the user by editing, expanding, refining, or restructuring \
         academic text.\n\
         Rules:\n\
         - If asked to edit or rewrite, return ONLY the revised text content.\n\
         - DO NOT add conversational filler like \"Here is the revised text\" or \"Sure, I \
         changed it\".\n\
         - Maintain academic tone and clarity.\n\
         - Prefer clarity over complexity."
    )
}

fn rewrite_prompt(task: &str, target_text: &str, constraints: &str) -> String {
    format!(
        "Task: {task}\nTarget Text to Modify: \"{target_text}\"\nConstraints: {constraints}\n\n\
         IMPORTANT: Return ONLY the revised text. NO explanations. NO conversational filler."
    )
}

fn answer_prompt(question: &str, title: &str, content: &str) -> String {
    let context = format!("Title: {title}\nContent: {content}");
    format!(
        "Context (Document Content): {}\nUser Question: {question}",
        truncate_chars(&context, CONTEXT_PREFIX_CHARS)
    )
}

fn extraction_prompt(content: &str, style: CitationStyle) -> String {
    format!(
        "Detect the in-text citations in the document and turn them into a complete \
         bibliography in {style} format.\n\n\
         IMPORTANT INSTRUCTIONS:\n\
         1. Even when the text only gives an author and a year (e.g. Smith, 2023), use Google \
         Search to find the publication's full title, the journal or book name, and the DOI.\n\
         2. Verify the details online.\n\
         3. If a detail cannot be found at all, leave that field empty (\"\" or null). Never \
         write placeholder text such as \"[information missing]\".\n\
         4. Return the result as JSON only.\n\n\
         Document: \"\"\"{content}\"\"\""
    )
}

/// Char-boundary-safe prefix of at most `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

fn reference_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "authors": { "type": "STRING" },
                "year": { "type": "STRING" },
                "title": { "type": "STRING" },
                "source": { "type": "STRING" },
                "doi": { "type": "STRING" },
            },
            "required": ["id", "authors", "year", "title"],
        },
    })
}

/// Parses the structured extraction payload, tolerating a Markdown code
/// fence around the JSON body.
fn parse_reference_payload(text: &str) -> Result<Vec<Reference>, ClientError> {
    let body = strip_code_fence(text.trim());
    let dtos: Vec<ReferenceDto> = serde_json::from_str(body)
        .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;
    Ok(dtos.into_iter().map(Reference::from_dto).collect())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(text)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn new(prompt: String) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Content::text(prompt)],
            tools: None,
            generation_config: None,
        }
    }

    fn with_system_instruction(mut self, instruction: String) -> Self {
        self.system_instruction = Some(Content::text(instruction));
        self
    }

    fn with_search_grounding(mut self) -> Self {
        self.tools = Some(vec![Tool {
            google_search: serde_json::Map::new(),
        }]);
        self
    }

    fn with_json_response(mut self, schema: serde_json::Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: "application/json".to_owned(),
            response_schema: Some(schema),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
