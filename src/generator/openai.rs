use crate::error::GeneratorError;
use crate::generator::{prompt, GenerationRequest, QuestionGenerator};
use crate::model::{retain_well_formed, Question, QuestionBatch};
use async_trait::async_trait;
use reqwest::Client;
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use tracing::{debug, error, info, instrument, warn};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const TOOL_NAME: &str = "generate_quiz_questions";

/// Configuration for the OpenAI-backed generator.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        // Try to load .env file (silently fail if not found)
        let _ = dotenvy::dotenv();
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    tools: Vec<Tool>,
    tool_choice: ToolChoice,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    tool_type: String,
    function: ToolFunction,
}

#[derive(Debug, Serialize)]
struct ToolFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    function: ToolChoiceFunction,
}

#[derive(Debug, Serialize)]
struct ToolChoiceFunction {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: ToolCallFunction,
}

#[derive(Debug, Deserialize)]
struct ToolCallFunction {
    arguments: String,
}

/// Generator backed by the OpenAI chat-completions API. Output is requested
/// through a forced tool call whose parameters are the schemars-derived
/// schema for [`QuestionBatch`].
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    http: Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        info!(model = %config.model, "Creating new OpenAI question generator");
        Self {
            config,
            http: Client::new(),
        }
    }

    fn request_body(&self, request: &GenerationRequest) -> ChatRequest {
        let schema = serde_json::to_value(schema_for!(QuestionBatch))
            .unwrap_or_else(|_| serde_json::json!({"type": "object"}));
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt::user_content(request),
                },
            ],
            tools: vec![Tool {
                tool_type: "function".to_string(),
                function: ToolFunction {
                    name: TOOL_NAME.to_string(),
                    description: "Return 5-6 themed multiple-choice questions".to_string(),
                    parameters: schema,
                },
            }],
            tool_choice: ToolChoice {
                choice_type: "function".to_string(),
                function: ToolChoiceFunction {
                    name: TOOL_NAME.to_string(),
                },
            },
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiGenerator {
    #[instrument(skip(self, request), fields(model = %self.config.model, batch_size = request.batch_size, difficulty = %request.difficulty, first_call = request.theme.is_some()))]
    async fn generate(&self, request: GenerationRequest) -> Result<Vec<Question>, GeneratorError> {
        debug!("Preparing OpenAI generation request");
        let body = self.request_body(&request);

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                GeneratorError::Http(e.to_string())
            })?;

        if response.status() == 401 {
            error!("OpenAI authentication failed");
            return Err(GeneratorError::Authentication);
        }
        if response.status() == 429 {
            warn!("OpenAI rate limit exceeded");
            return Err(GeneratorError::RateLimit);
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %text, "OpenAI API error");
            return Err(GeneratorError::Api(text));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Http(e.to_string()))?;

        // The forced tool call puts the batch in the first call's arguments,
        // serialized as a JSON string.
        let raw_args = parsed
            .choices
            .first()
            .and_then(|c| c.message.tool_calls.first())
            .map(|t| t.function.arguments.as_str())
            .ok_or_else(|| {
                error!("No tool call in OpenAI response");
                GeneratorError::MalformedResponse("no tool call in response".to_string())
            })?;

        let batch: QuestionBatch = serde_json::from_str(raw_args).map_err(|e| {
            error!(error = %e, "Failed to parse tool call arguments");
            GeneratorError::MalformedResponse(e.to_string())
        })?;

        let returned = batch.questions.len();
        let questions = retain_well_formed(batch.questions);

        info!(
            returned,
            accepted = questions.len(),
            "OpenAI generation completed"
        );
        Ok(questions)
    }

    fn clone_box(&self) -> Box<dyn QuestionGenerator> {
        Box::new(self.clone())
    }
}
