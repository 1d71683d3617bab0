//! Responses API payload serde models.

use serde::{Deserialize, Serialize};

use crate::ChatMessage;

pub(crate) const OUTPUT_TEXT_DELTA: &str = "response.output_text.delta";
pub(crate) const REFUSAL_DELTA: &str = "response.refusal.delta";
pub(crate) const RESPONSE_FAILED: &str = "response.failed";

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesApiRequest<'a> {
    pub model: &'a str,
    pub input: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
    pub store: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelListEnvelope {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
}

pub(crate) fn sorted_model_ids(envelope: ModelListEnvelope) -> Vec<String> {
    let mut ids = envelope
        .data
        .into_iter()
        .map(|entry| entry.id)
        .collect::<Vec<_>>();
    ids.sort();
    ids
}
