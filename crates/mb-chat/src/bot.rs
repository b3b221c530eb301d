use crate::fallback::fallback_response;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const FALLBACK_NOTE: &str = "Using fallback due to API error";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

pub const SYSTEM_PROMPT: &str = "আপনি একজন বাংলাদেশী স্বাস্থ্য সহায়ক চ্যাটবট। আপনার নাম \"মন বন্ধু\"। আপনার কাজ হলো:

1. বাংলায় স্বাস্থ্য সম্পর্কিত প্রশ্নের উত্তর দেওয়া
2. সাধারণ স্বাস্থ্য পরামর্শ প্রদান করা
3. জরুরি অবস্থায় হাসপাতালে যাওয়ার পরামর্শ দেওয়া
4. মাতৃস্বাস্থ্য, শিশু স্বাস্থ্য, মানসিক স্বাস্থ্য সম্পর্কে তথ্য দেওয়া
5. সহানুভূতিশীল এবং বন্ধুত্বপূর্ণ ভাষায় কথা বলা

গুরুত্বপূর্ণ নির্দেশনা:
- সবসময় বাংলায় উত্তর দিন
- জটিল চিকিৎসার পরামর্শ দেবেন না, ডাক্তার দেখতে বলুন
- সংক্ষিপ্ত এবং স্পষ্ট উত্তর দিন
- জরুরি অবস্থায় হাসপাতালে যাওয়ার পরামর্শ দিন";

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Without a key every reply comes from the fallback table.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat API returned status {status}")]
    Status { status: u16 },
    #[error("chat API response had no message")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Openai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    pub source: ReplySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChatReply {
    fn fallback(message: &str, note: Option<&str>) -> Self {
        Self {
            response: fallback_response(message).to_string(),
            source: ReplySource::Fallback,
            note: note.map(str::to_string),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Chatbot {
    config: ChatConfig,
    client: Client,
}

impl Chatbot {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Answers `message`. Never fails: any trouble with the remote model
    /// turns into a canned answer tagged with a note.
    pub async fn reply(&self, message: &str) -> ChatReply {
        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("no chat API key configured, answering from fallback table");
            return ChatReply::fallback(message, None);
        };
        match self.complete(api_key, message).await {
            Ok(response) => ChatReply {
                response,
                source: ReplySource::Openai,
                note: None,
            },
            Err(err) => {
                warn!(error = %err, "chat completion failed, answering from fallback table");
                ChatReply::fallback(message, Some(FALLBACK_NOTE))
            }
        }
    }

    async fn complete(&self, api_key: &str, message: &str) -> Result<String, ChatError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }
        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}
