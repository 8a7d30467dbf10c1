//! LLM fallback client.
//!
//! Implements the [`FallbackResolver`] contract against an
//! OpenRouter-compatible chat-completions API: the whole unparsed set goes
//! out in one batch request, and a strict JSON object mapping old basenames
//! to new basenames comes back. Temperature 0 keeps the mapping
//! deterministic. Any transport or parse failure degrades to an error the
//! engine treats as an empty mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::engine::FallbackResolver;
use crate::models::config::FallbackConfig;
use crate::{Error, Result};

const SYSTEM_PROMPT: &str = "You normalize TV episode filenames to a strict format. \
     Output a JSON object mapping each old basename to its new basename.";

/// Chat completion request payload.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Fallback client for an OpenRouter-compatible chat API.
pub struct LlmClient {
    config: FallbackConfig,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: FallbackConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { config, client })
    }

    /// Build the user prompt: target format, rules, worked examples, and
    /// the batch of basenames to map.
    fn build_prompt(&self, basenames: &[String]) -> String {
        let instructions = json!({
            "target_format": "<show> - SxxEyy[-Ezz] [- <title>] [- Extended] [- <resolution> - [provider][source][audio][video][group]]<ext>",
            "rules": [
                "Keep the original extension.",
                "Normalize audio: DD 5 1 / DDP5 1 / DDP5.1 -> DDP5.1; also allow AC3, EAC3, DTS, DTS-HD MA, TrueHD, Atmos.",
                "Normalize codec: h264/H.264/x264/AVC -> x264; h265/H.265/HEVC/x265 -> x265; AV1 -> AV1.",
                "Preserve the release group only when explicitly present as trailing -GROUP; omit if unknown.",
                "Use WEB-DL/WEBRip/BluRay/BDRip/HDTV as present.",
                "Keep explicit episode ranges (e.g. S07E11-E12) in the episode token.",
                "If a field is unknown, omit it rather than guessing.",
                "Return strictly a JSON object: {\"<old basename>\": \"<new basename>\", ...}. Omit names you cannot map."
            ],
            "examples": [
                [
                    "The Office US S07E11-E12 Classy Christmas Extended Cut 1080p PCOK WEB-DL DDP5 1 H 264-FLUX.mkv",
                    "The Office (US) - S07E11-E12 - Classy Christmas - Extended - 1080p - [PCOK][WEB-DL][DDP5.1][x264][FLUX].mkv"
                ],
                [
                    "The.Office.US.S03E10.Part1.Part2.EXTENDED.1080p.PCOK.WEB-DL.DDP5.1.H.264-TEPES.mkv",
                    "The Office (US) - S03E10 - Part 1 Part 2 - Extended - 1080p - [PCOK][WEB-DL][DDP5.1][x264][TEPES].mkv"
                ]
            ],
            "basenames": basenames,
        });
        instructions.to_string()
    }
}

/// Parse the model's response content into a mapping. Anything that is not
/// a JSON object of strings yields an empty mapping.
fn parse_mapping_content(content: &str) -> HashMap<String, String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect(),
        _ => HashMap::new(),
    }
}

impl FallbackResolver for LlmClient {
    async fn resolve(&self, unparsed: &[String]) -> Result<HashMap<String, String>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::FallbackUnavailable("OPENROUTER_API_KEY not set".to_string()))?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: self.build_prompt(unparsed),
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        tracing::debug!("Sending {} unparsed names to fallback", unparsed.len());

        let response: ChatResponse = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("");

        Ok(parse_mapping_content(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_carries_batch_and_rules() {
        let client = LlmClient::new(FallbackConfig {
            api_key: None,
            ..Default::default()
        })
        .unwrap();

        let prompt = client.build_prompt(&["weird_name.mkv".to_string()]);
        assert!(prompt.contains("weird_name.mkv"));
        assert!(prompt.contains("Keep the original extension."));
        assert!(prompt.contains("S07E11-E12"));
    }

    #[test]
    fn test_parse_mapping_content() {
        let mapping = parse_mapping_content(r#"{"a.mkv": "b.mkv"}"#);
        assert_eq!(mapping.get("a.mkv").map(String::as_str), Some("b.mkv"));

        assert!(parse_mapping_content("not json").is_empty());
        assert!(parse_mapping_content(r#"["a", "b"]"#).is_empty());
        // Non-string values are dropped, not errors.
        let mapping = parse_mapping_content(r#"{"a.mkv": 3, "b.mkv": "c.mkv"}"#);
        assert_eq!(mapping.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_without_api_key_is_unavailable() {
        let client = LlmClient::new(FallbackConfig {
            api_key: None,
            ..Default::default()
        })
        .unwrap();

        let err = client.resolve(&["x.mkv".to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::FallbackUnavailable(_)));
    }
}
