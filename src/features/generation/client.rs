//! Thin client for the Hugging Face hosted inference API.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Sampling parameters forwarded to the hosted model. Fields left as
/// `None` are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_text: Option<bool>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

pub struct InferenceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl InferenceClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        InferenceClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Send a prompt to a hosted model and return the first generated text.
    pub async fn text_generation(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
        timeout: Duration,
    ) -> anyhow::Result<String> {
        let url = format!("{}/{}", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&InferenceRequest {
                inputs: prompt,
                parameters: params,
            })
            .send()
            .await
            .with_context(|| format!("request to model {} failed", model))?
            .error_for_status()
            .with_context(|| format!("model {} returned an error status", model))?;

        let generated: Vec<GeneratedText> = response
            .json()
            .await
            .context("invalid inference response body")?;

        generated
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| anyhow::anyhow!("empty inference response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_params_are_omitted_from_the_request_body() {
        let params = GenerationParams {
            max_new_tokens: Some(400),
            temperature: 0.7,
            do_sample: Some(true),
            return_full_text: Some(false),
            ..Default::default()
        };
        let body = serde_json::to_value(InferenceRequest {
            inputs: "prompt",
            parameters: &params,
        })
        .unwrap();

        assert_eq!(body["inputs"], "prompt");
        assert_eq!(body["parameters"]["max_new_tokens"], 400);
        assert!(body["parameters"].get("max_length").is_none());
    }

    #[test]
    fn parses_generated_text_payload() {
        let payload = r#"[{"generated_text": "What is photosynthesis?"}]"#;
        let parsed: Vec<GeneratedText> = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed[0].generated_text, "What is photosynthesis?");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = InferenceClient::new("https://example.test/models/", "key");
        assert_eq!(client.base_url, "https://example.test/models");
    }
}
