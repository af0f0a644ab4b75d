//! Report generation services.
//!
//! This module turns a [`BusinessInput`] into a request for the generative
//! backend and turns the backend's text back into a [`BusinessReport`].
//! The transport itself sits behind [`GenerationBackend`], so the request
//! and parsing rules here can be exercised without a network.

use super::errors::{ReportError, ReportResult};
use super::models::{BusinessInput, BusinessReport};
use serde_json::{Value, json};
use std::time::Instant;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Sampling temperature sent with every request.
pub const REPORT_TEMPERATURE: f32 = 0.5;

/// MIME type the backend is asked to answer with.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// A single request to the generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub response_schema: Value,
    pub temperature: f32,
}

/// Transport to a generative model.
///
/// Implementations perform exactly one outbound call and return the raw
/// text the model produced.
pub trait GenerationBackend: Send + Sync {
    fn generate(&self, request: &GenerateRequest) -> anyhow::Result<String>;
}

/// Produces a complete report for a business, or fails as a whole.
pub trait ReportGenerator: Send + Sync {
    fn request_report(&self, input: &BusinessInput) -> ReportResult<BusinessReport>;
}

/// Builds the prompt sent to the model.
///
/// All four field values are embedded exactly as entered.
///
/// # Examples
///
/// ```
/// use growth_planner::domain::{BusinessInput, build_prompt};
///
/// let input = BusinessInput::new("Artisan Coffee Roasters", "Food & Beverage", "Online", "Small");
/// let prompt = build_prompt(&input);
/// assert!(prompt.contains("- Business Name: \"Artisan Coffee Roasters\""));
/// ```
pub fn build_prompt(input: &BusinessInput) -> String {
    format!(
        "You are a world-class business consultant and strategist.\n\
         Analyze the following business information and generate a comprehensive, actionable business improvement plan.\n\
         Provide the output in the specified JSON format.\n\
         \n\
         Business Information:\n\
         - Business Name: \"{}\"\n\
         - Business Category/Field: \"{}\"\n\
         - Location of Service: \"{}\"\n\
         - Additional Details: \"{}\"\n\
         \n\
         Your report should be insightful, professional, and provide concrete, actionable advice.\n\
         Focus on creating a clear roadmap for growth and improvement.\n",
        input.name, input.category, input.location, input.details
    )
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

fn section_schema(description: &str, example_title: &str, points: &str) -> Value {
    json!({
        "type": "OBJECT",
        "description": description,
        "properties": {
            "title": {
                "type": "STRING",
                "description": format!("Title for this section, e.g., '{example_title}'"),
            },
            "content": {
                "type": "STRING",
                "description": "Introductory paragraph for this section.",
            },
            "points": string_list(points),
        },
        "required": ["title", "content", "points"],
    })
}

/// The structured-output schema the backend must follow.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": {
                "type": "STRING",
                "description": "A brief, high-level summary of the entire business improvement plan.",
            },
            "swotAnalysis": {
                "type": "OBJECT",
                "description": "A SWOT analysis for the business.",
                "properties": {
                    "strengths": string_list("Internal positive attributes."),
                    "weaknesses": string_list("Internal negative attributes."),
                    "opportunities": string_list("External factors that could be exploited."),
                    "threats": string_list("External factors that could harm the business."),
                },
                "required": ["strengths", "weaknesses", "opportunities", "threats"],
            },
            "growthAreas": section_schema(
                "Key areas with high potential for business growth.",
                "Key Growth Areas",
                "Bulleted list of specific growth areas.",
            ),
            "marketingStrategies": section_schema(
                "Actionable marketing strategies.",
                "Actionable Marketing Strategies",
                "Bulleted list of specific marketing strategies.",
            ),
            "operationalImprovements": section_schema(
                "Suggestions for improving business operations.",
                "Operational Improvements",
                "Bulleted list of specific operational improvements.",
            ),
        },
        "required": [
            "executiveSummary",
            "swotAnalysis",
            "growthAreas",
            "marketingStrategies",
            "operationalImprovements",
        ],
    })
}

/// Parses the model's text into a report.
///
/// Surrounding whitespace is ignored. Missing keys or wrongly typed values
/// reject the whole payload; keys outside the schema are ignored.
pub fn parse_report(text: &str) -> serde_json::Result<BusinessReport> {
    serde_json::from_str(text.trim())
}

/// Report generator backed by a [`GenerationBackend`].
pub struct ReportClient<B> {
    backend: B,
    model: String,
}

impl<B: GenerationBackend> ReportClient<B> {
    pub fn new(backend: B) -> Self {
        Self::with_model(backend, DEFAULT_MODEL)
    }

    pub fn with_model(backend: B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, input: &BusinessInput) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(input),
            response_schema: response_schema(),
            temperature: REPORT_TEMPERATURE,
        }
    }
}

impl<B: GenerationBackend> ReportGenerator for ReportClient<B> {
    fn request_report(&self, input: &BusinessInput) -> ReportResult<BusinessReport> {
        let request = self.build_request(input);
        let span = tracing::info_span!(
            "report.request",
            model = %request.model,
            temperature = f64::from(request.temperature),
            prompt_len = request.prompt.len(),
        );
        let _enter = span.enter();
        let start = Instant::now();

        let text = self.backend.generate(&request).map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "Error generating business report");
            ReportError::RequestFailed
        })?;

        let report = parse_report(&text).map_err(|err| {
            tracing::error!(
                error = %err,
                response_len = text.len(),
                "Backend response did not match the report schema"
            );
            ReportError::RequestFailed
        })?;

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Business report generated"
        );
        Ok(report)
    }
}
