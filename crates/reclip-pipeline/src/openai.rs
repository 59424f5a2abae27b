//! OpenAI client for transcription and tag suggestion.
//!
//! Implements the [`Transcriber`] and [`Tagger`] capabilities with
//! Whisper and chat completions. A missing or placeholder API key makes
//! every call report `Unavailable` so the enrichment stage degrades
//! instead of failing.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::capabilities::{CapabilityError, CapabilityResult, Tagger, Transcriber};
use crate::error::{PipelineError, PipelineResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const TRANSCRIPTION_MODEL: &str = "whisper-1";
const TAGGING_MODEL: &str = "gpt-4";

/// Keys left at the .env.example placeholder count as not configured.
const PLACEHOLDER_KEY: &str = "your_openai_api_key_here";

/// OpenAI API client.
pub struct OpenAiClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

/// Whisper transcription response.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Chat completion request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a new client. `api_key = None` yields an always-unavailable
    /// client, which is a valid degraded configuration.
    pub fn new(api_key: Option<String>, request_timeout: Duration) -> PipelineResult<Self> {
        let api_key = api_key.filter(|k| !k.is_empty() && k != PLACEHOLDER_KEY);
        if api_key.is_none() {
            info!("OpenAI API key not configured; transcription and tagging will degrade");
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| PipelineError::config_error(format!("HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Create a client from `OPENAI_API_KEY`.
    pub fn from_env(request_timeout: Duration) -> PipelineResult<Self> {
        Self::new(std::env::var("OPENAI_API_KEY").ok(), request_timeout)
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn key(&self) -> CapabilityResult<&str> {
        self.api_key.as_deref().ok_or(CapabilityError::Unavailable)
    }

    async fn call_transcription(&self, audio: &Path) -> CapabilityResult<String> {
        let key = self.key()?;

        let bytes = tokio::fs::read(audio)
            .await
            .map_err(|e| CapabilityError::failed(format!("read audio file: {e}")))?;

        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| CapabilityError::failed(format!("multipart: {e}")))?;

        let form = multipart::Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .text("language", "en")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CapabilityError::failed(format!("transcription request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::failed(format!(
                "transcription API returned {status}: {body}"
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::failed(format!("parse transcription response: {e}")))?;

        Ok(parsed.text)
    }

    async fn call_tagging(&self, transcript: &str, title: &str) -> CapabilityResult<Vec<String>> {
        let key = self.key()?;

        let request = ChatRequest {
            model: TAGGING_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a helpful assistant that analyzes video transcripts and generates relevant tags.".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_tag_prompt(transcript, title),
                },
            ],
            temperature: 0.7,
            max_tokens: 150,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CapabilityError::failed(format!("tagging request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::failed(format!(
                "tagging API returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CapabilityError::failed(format!("parse tagging response: {e}")))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| CapabilityError::failed("no choices in tagging response"))?;

        parse_tag_list(content)
    }
}

/// Build the tag suggestion prompt.
fn build_tag_prompt(transcript: &str, title: &str) -> String {
    format!(
        r#"Analyze this onboarding video transcript and generate 3-5 relevant tags.
Title: {title}
Transcript: {transcript}

Return only tags as a JSON array of strings. Focus on: technologies mentioned, tasks performed, skills demonstrated, and workflow types."#
    )
}

/// Parse the model's reply into a tag list, tolerating markdown fences.
fn parse_tag_list(content: &str) -> CapabilityResult<Vec<String>> {
    let text = content.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);

    let tags: Vec<String> = serde_json::from_str(text.trim())
        .map_err(|e| CapabilityError::failed(format!("malformed tag list: {e}")))?;

    debug!(count = tags.len(), "Parsed suggested tags");
    Ok(tags)
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, audio: &Path) -> CapabilityResult<String> {
        self.call_transcription(audio).await
    }
}

#[async_trait]
impl Tagger for OpenAiClient {
    async fn suggest_tags(&self, transcript: &str, title: &str) -> CapabilityResult<Vec<String>> {
        self.call_tagging(transcript, title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(Some("test-key".to_string()), Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri())
    }

    async fn write_audio(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let audio = dir.path().join("clip.mp3");
        tokio::fs::write(&audio, b"not really mp3").await.unwrap();
        audio
    }

    #[test]
    fn test_placeholder_key_is_unconfigured() {
        let client =
            OpenAiClient::new(Some(PLACEHOLDER_KEY.to_string()), Duration::from_secs(5)).unwrap();
        assert!(client.api_key.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let client = OpenAiClient::new(None, Duration::from_secs(5)).unwrap();
        let err = client.suggest_tags("text", "title").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Unavailable));
    }

    #[tokio::test]
    async fn test_transcribe_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"text": "hello from whisper"})),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir).await;

        let text = client_for(&server).transcribe(&audio).await.unwrap();
        assert_eq!(text, "hello from whisper");
    }

    #[tokio::test]
    async fn test_transcribe_api_error_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir).await;

        let err = client_for(&server).transcribe(&audio).await.unwrap_err();
        assert!(matches!(err, CapabilityError::Failed(_)));
    }

    #[tokio::test]
    async fn test_suggest_tags_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "[\"docker\", \"ci\", \"deployment\"]"}}]
            })))
            .mount(&server)
            .await;

        let tags = client_for(&server)
            .suggest_tags("we deploy with docker", "Part 1")
            .await
            .unwrap();
        assert_eq!(tags, vec!["docker", "ci", "deployment"]);
    }

    #[tokio::test]
    async fn test_suggest_tags_strips_markdown_fences() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "```json\n[\"testing\"]\n```"}}]
            })))
            .mount(&server)
            .await;

        let tags = client_for(&server)
            .suggest_tags("transcript", "title")
            .await
            .unwrap();
        assert_eq!(tags, vec!["testing"]);
    }

    #[tokio::test]
    async fn test_suggest_tags_malformed_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "Sure! Here are some tags: docker, ci"}}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .suggest_tags("transcript", "title")
            .await
            .unwrap_err();
        assert!(matches!(err, CapabilityError::Failed(_)));
    }

    #[test]
    fn test_parse_tag_list_plain_and_fenced() {
        assert_eq!(
            parse_tag_list("[\"a\", \"b\"]").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            parse_tag_list("```json\n[\"a\"]\n```").unwrap(),
            vec!["a".to_string()]
        );
        assert!(parse_tag_list("{\"tags\": []}").is_err());
    }
}
