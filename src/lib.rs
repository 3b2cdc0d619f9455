//! Async client for the GroqCloud API.
//!
//! ```no_run
//! use groqcloud::{Conversation, GroqClient, Message};
//!
//! # async fn run() -> groqcloud::Result<()> {
//! let client = GroqClient::new("gsk_...").await?;
//! let mut conversation = Conversation::new("Answer in one word.");
//! conversation.add_messages([Message::user("Name a yellow fruit")]);
//! let response = conversation
//!     .complete(&client, "llama3-8b-8192", None)
//!     .await?;
//! println!("{:?}", response.first_content());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod config;
pub mod request;
pub mod models;
pub mod audio;
pub mod transport;
pub mod client;
pub mod conversation;
pub mod session;

pub use audio::{AudioTask, Transcription};
pub use client::GroqClient;
pub use config::{ClientConfig, CompletionConfig, TranscriptionConfig};
pub use conversation::Conversation;
pub use error::{Error, Result};
pub use models::Model;
pub use request::{
  ChatCompletionRequest, ChatCompletionResponse, Choice, Message,
  ResponseFormat, ResponseFormatType, Role, Usage,
};
pub use session::ConversationSession;
pub use transport::{
  ApiRequest, ApiResponse, HttpTransport, Method, MultipartForm,
  RequestBody, Transport,
};
