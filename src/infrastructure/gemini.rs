use crate::domain::{GenerateRequest, GenerationBackend, RESPONSE_MIME_TYPE};
use super::config::Config;
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP transport for the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("building HTTP client")?;
        Ok(Self::with_client(config, client))
    }

    /// Uses a caller-built HTTP client, e.g. one without proxy settings.
    pub fn with_client(config: &Config, client: reqwest::blocking::Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

fn request_body(request: &GenerateRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![TextPart {
                text: &request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: RESPONSE_MIME_TYPE,
            response_schema: &request.response_schema,
            temperature: request.temperature,
        },
    }
}

fn extract_text(body: &str) -> anyhow::Result<String> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).context("decoding generateContent response")?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(anyhow!("Gemini returned no candidates: {reason}"));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(anyhow!(
            "Gemini candidate had no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ));
    }
    Ok(text)
}

impl GenerationBackend for GeminiBackend {
    fn generate(&self, request: &GenerateRequest) -> anyhow::Result<String> {
        let url = self.endpoint(&request.model);
        tracing::debug!(%url, prompt_len = request.prompt.len(), "Calling Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()
            .context("sending request to Gemini")?;

        let status = response.status();
        let body = response.text().context("reading Gemini response body")?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<GeminiError>(&body) {
                return Err(anyhow!("Gemini API error ({}): {}", status, err.error.message));
            }
            return Err(anyhow!("Gemini API error ({}): {}", status, body));
        }

        extract_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusinessInput, ReportClient, response_schema};
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let client = ReportClient::new(NeverCalled);
        let request = client.build_request(&BusinessInput::new("a", "b", "c", "d"));
        let body = serde_json::to_value(request_body(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], json!(request.prompt));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
        assert_eq!(body["generationConfig"]["responseSchema"], response_schema());
    }

    struct NeverCalled;

    impl GenerationBackend for NeverCalled {
        fn generate(&self, _request: &GenerateRequest) -> anyhow::Result<String> {
            unreachable!("backend should not be called")
        }
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_text(&body.to_string()).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_text(&body.to_string()).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_text_empty_candidate() {
        let body = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        let err = extract_text(&body.to_string()).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_endpoint() {
        let config = Config {
            api_key: "k".to_string(),
            model: "gemini-2.5-pro".to_string(),
            base_url: "http://localhost:1234".to_string(),
        };
        let backend = GeminiBackend::new(&config).unwrap();
        assert_eq!(
            backend.endpoint("gemini-2.5-pro"),
            "http://localhost:1234/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}
