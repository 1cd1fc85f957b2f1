pub mod error;
pub mod message;
pub mod services;

pub use error::ClientError;
pub use message::{ChatRequest, ChatResponse};
pub use services::chatbot::{ChatbotClient, DEFAULT_BASE_URL, ask_chatbot};
