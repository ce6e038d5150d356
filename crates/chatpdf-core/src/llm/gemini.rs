use crate::api::{model_path, ApiClient};
use crate::error::{ChatPdfError, Result, Service};
use crate::traits::LlmClient;
use chatpdf_config::{ApiConfig, Credentials, LlmConfig};
use serde::Deserialize;
use serde_json::json;

/// Hosted generative model (`generateContent`)
pub struct GeminiClient {
    api: ApiClient,
    model: String,
    temperature: f32,
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig, api: &ApiConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(
                &api.base_url,
                credentials,
                config.timeout_secs,
                Service::Generation,
            )?,
            model: model_path(&config.model),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn request(&self, prompt: &str) -> serde_json::Value {
        let mut generation_config = json!({ "temperature": self.temperature });
        if let Some(max) = self.max_output_tokens {
            generation_config["maxOutputTokens"] = json!(max);
        }
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        })
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let resp: GenerateContentResponse = self
            .api
            .post(&format!("{}:generateContent", self.model), &self.request(prompt))?;
        reply_text(resp)
    }
}

fn reply_text(resp: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ChatPdfError::Unexpected(format!(
            "generation service returned no answer ({})",
            reason
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ChatPdfError::Unexpected(format!(
            "generation service returned an empty answer (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(max_output_tokens: Option<u32>) -> GeminiClient {
        let config = LlmConfig {
            max_output_tokens,
            ..Default::default()
        };
        GeminiClient::new(&config, &ApiConfig::default(), Credentials::new("k")).unwrap()
    }

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let body = client(None).request("hi");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.3).abs() < 1e-6);
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());

        let body = client(Some(256)).request("hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn test_reply_text_joins_parts() {
        let resp = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"Paris is "},{"text":"the capital."}],"role":"model"},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(reply_text(resp).unwrap(), "Paris is the capital.");
    }

    #[test]
    fn test_blocked_prompt() {
        let resp = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = reply_text(resp).unwrap_err();
        assert_eq!(err.kind(), "UnexpectedError");
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_candidate_without_content() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        let err = reply_text(resp).unwrap_err();
        assert!(err.to_string().contains("finish reason: SAFETY"));
    }
}
