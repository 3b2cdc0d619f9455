//! Chat completion wire types

use serde::{Deserialize, Serialize};

/// Speaker of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

impl Role
{   pub fn as_str(&self) -> &'static str
    {   match self
        {   Role::System => "system"
          , Role::User => "user"
          , Role::Assistant => "assistant"
        }
    }
}

impl std::fmt::Display for Role
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

/// One turn in a dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message
{   pub role: Role
  , pub content: String
}

impl Message
{   pub fn new(role: Role, content: impl Into<String>) -> Self
    {   Message
        {   role
          , content: content.into()
        }
    }

    pub fn system(content: impl Into<String>) -> Self
    {   Message::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self
    {   Message::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {   Message::new(Role::Assistant, content)
    }
}

/// Output format the model is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatType
{   Text
  , JsonObject
}

/// `response_format` object of a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat
{   #[serde(rename = "type")]
    pub format_type: ResponseFormatType
}

impl ResponseFormat
{   pub fn text() -> Self
    {   ResponseFormat { format_type: ResponseFormatType::Text }
    }

    pub fn json_object() -> Self
    {   ResponseFormat { format_type: ResponseFormatType::JsonObject }
    }
}

/// Body of `POST chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<Message>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>
}

impl ChatCompletionRequest
{   /// Request carrying only the required fields
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self
    {   ChatCompletionRequest
        {   model: model.into()
          , messages
          , temperature: None
          , top_p: None
          , stream: None
          , stop: None
          , max_tokens: None
          , presence_penalty: None
          , frequency_penalty: None
          , user: None
          , seed: None
          , response_format: None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub index: u32
  , pub message: Message
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// Token counts and timings reported by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage
{   pub prompt_tokens: u32
  , pub completion_tokens: u32
  , pub total_tokens: u32
  , pub queue_time: f64
  , pub prompt_time: f64
  , pub completion_time: f64
  , pub total_time: f64
}

/// Decoded `chat/completions` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse
{   #[serde(default)]
    pub id: String
  , #[serde(default)]
    pub object: String
  , /// Unix timestamp
    #[serde(default)]
    pub created: i64
  , #[serde(default)]
    pub model: String
  , /// Empty when the API omits the field
    #[serde(default)]
    pub choices: Vec<Choice>
  , #[serde(default)]
    pub usage: Usage
  , #[serde(default)]
    pub system_fingerprint: Option<String>
}

impl ChatCompletionResponse
{   /// Content of the first choice, if any
    pub fn first_content(&self) -> Option<&str>
    {   self.choices
          .first()
          .map(|c| c.message.content.as_str())
    }
}
