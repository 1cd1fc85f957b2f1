// src/services/chatbot.rs
use std::error::Error;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::ClientError,
    message::{ApiInfo, ChatRequest, ChatResponse, HealthResponse, rejection_message},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const CHAT_PATH: &str = "/api/v1/chat";
const HEALTH_PATH: &str = "/api/v1/health";
const INFO_PATH: &str = "/api/v1/info";

/// Ask the chatbot at [`DEFAULT_BASE_URL`].
pub async fn ask_chatbot(query: &str, api_key: Option<&str>) -> Result<ChatResponse, ClientError> {
    ChatbotClient::default().ask(query, api_key).await
}

/// Client for the chatbot HTTP API.
///
/// Holds only the base address. Every call builds its own HTTP client, so no
/// connection outlives the call that opened it. No timeout is set.
#[derive(Debug, Clone)]
pub struct ChatbotClient {
    base_url: String,
}

impl Default for ChatbotClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ChatbotClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one query. The query is forwarded as-is; the service validates it.
    ///
    /// A non-2xx answer becomes [`ClientError::Server`] carrying the service's
    /// `detail.message` (or `"Unknown error"`). Transport and decoding failures
    /// come back untouched as [`ClientError::Transport`]. Every failure is
    /// logged once.
    pub async fn ask(&self, query: &str, api_key: Option<&str>) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest::new(query, api_key);
        self.post_chat(&request)
            .await
            .inspect_err(|err| log_failure(&self.url(CHAT_PATH), err))
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get(HEALTH_PATH)
            .await
            .inspect_err(|err| log_failure(&self.url(HEALTH_PATH), err))
    }

    pub async fn info(&self) -> Result<ApiInfo, ClientError> {
        self.get(INFO_PATH)
            .await
            .inspect_err(|err| log_failure(&self.url(INFO_PATH), err))
    }

    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = client()?
            .post(self.url(CHAT_PATH))
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = client()?.get(self.url(path)).send().await?;
        read_json(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn client() -> Result<Client, reqwest::Error> {
    Client::builder().pool_max_idle_per_host(0).build()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        // An unreadable body is treated like an unparseable one.
        let body = response.bytes().await.unwrap_or_default();
        return Err(ClientError::Server {
            status,
            message: rejection_message(&body),
        });
    }

    Ok(response.json::<T>().await?)
}

fn log_failure(url: &str, err: &ClientError) {
    tracing::error!(url, error = %error_chain(err), "Error querying chatbot");
}

/// `err` followed by each of its sources, joined with `": "`.
fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
