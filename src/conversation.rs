//! Conversation history and chat completion over it

use log::{debug, error};

use crate::client::GroqClient;
use crate::config::CompletionConfig;
use crate::error::{Error, Result};
use crate::request::{
  ChatCompletionRequest, ChatCompletionResponse, Message, ResponseFormat,
};
use crate::transport::Transport;

/// Ordered chat history seeded by a system prompt.
///
/// The first message is always the system prompt. Messages are only ever
/// appended, and [`Conversation::clear_history`] is the single way to drop
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation
{   system_prompt: String
  , history: Vec<Message>
}

impl Conversation
{   pub fn new(system_prompt: impl Into<String>) -> Self
    {   let system_prompt = system_prompt.into();
        let history = vec![Message::system(system_prompt.clone())];
        Conversation
        {   system_prompt
          , history
        }
    }

    pub fn system_prompt(&self) -> &str
    {   &self.system_prompt
    }

    /// Messages in the order they are sent to the model
    pub fn history(&self) -> &[Message]
    {   &self.history
    }

    pub fn len(&self) -> usize
    {   self.history.len()
    }

    /// Always false; the system message is never removed
    pub fn is_empty(&self) -> bool
    {   self.history.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message>
    {   self.history.last()
    }

    /// Append messages after every existing entry, in the given order
    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>
    {   let before = self.history.len();
        self.history.extend(messages);
        debug!(
          "Added {} messages to conversation",
          self.history.len() - before
        );
    }

    /// Drop every turn, keeping only the system prompt
    pub fn clear_history(&mut self)
    {   debug!("Clearing conversation history");
        self.history = vec![Message::system(self.system_prompt.clone())];
    }

    /// Request body for the current history.
    ///
    /// With no config the request asks for a `text` response format;
    /// with a config only the fields it sets are sent.
    pub fn build_request(
      &self
    , model: &str
    , config: Option<&CompletionConfig>
    ) -> ChatCompletionRequest
    {   let mut request = ChatCompletionRequest::new(
          model,
          self.history.clone()
        );

        match config
        {   Some(config) => {
              request.temperature = config.temperature;
              request.top_p = config.top_p;
              request.stream = config.stream;
              request.stop = config.stop.clone();
              request.max_tokens = config.max_tokens;
              request.presence_penalty = config.presence_penalty;
              request.frequency_penalty = config.frequency_penalty;
              request.user = config.user.clone();
              request.seed = config.seed;
              request.response_format = config.response_format.clone();
            }
          , None => {
              request.response_format = Some(ResponseFormat::text());
            }
        }
        request
    }

    /// Send the history to `model` and append the first choice as an
    /// assistant message.
    ///
    /// History is left untouched unless the whole exchange succeeds.
    pub async fn complete<T: Transport>(
      &mut self
    , client: &GroqClient<T>
    , model: &str
    , config: Option<&CompletionConfig>
    ) -> Result<ChatCompletionResponse>
    {   debug!(
          "Completing conversation of {} messages with {}",
          self.history.len(),
          model
        );
        let request = self.build_request(model, config);
        let response = client.chat_completion(&request).await?;

        let content = response
          .first_content()
          .ok_or_else(|| {
            error!("No choices in response");
            Error::MalformedResponse(
              "response contained no choices".to_string()
            )
          })?
          .to_string();

        self.add_messages([Message::assistant(content)]);
        Ok(response)
    }
}
