//! Configuration for the client, chat completions and audio requests

use std::fmt;

use serde::{Deserialize, Serialize};
use log::debug;

use crate::error::{Error, Result};
use crate::request::ResponseFormat;

/// Default GroqCloud OpenAI-compatible namespace
pub const DEFAULT_API_BASE: &str
  = "https://api.groq.com/openai/v1";

const API_KEY_VARS: [&str; 2] = ["GROQ_API_KEY", "GROQ_TOKEN"];
const API_BASE_VAR: &str = "GROQ_API_BASE";
const TIMEOUT_VAR: &str = "GROQ_TIMEOUT_SECS";

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig
{   /// API key sent as a bearer token
    pub api_key: String
  , /// API base URL (if custom)
    #[serde(default)]
    pub api_base: Option<String>
  , /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>
  , /// Probe the models endpoint on construction
    #[serde(default = "default_verify")]
    pub verify_api_key: bool
}

fn default_verify() -> bool
{   true
}

impl fmt::Debug for ClientConfig
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("ClientConfig")
          .field("api_key", &"<redacted>")
          .field("api_base", &self.api_base)
          .field("timeout_secs", &self.timeout_secs)
          .field("verify_api_key", &self.verify_api_key)
          .finish()
    }
}

impl ClientConfig
{   pub fn new(api_key: impl Into<String>) -> Self
    {   ClientConfig
        {   api_key: api_key.into()
          , api_base: None
          , timeout_secs: None
          , verify_api_key: true
        }
    }

    /// Read `GROQ_API_KEY` (or `GROQ_TOKEN`), `GROQ_API_BASE`
    /// and `GROQ_TIMEOUT_SECS` from the environment
    pub fn from_env() -> Result<Self>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>
    {   let api_key = API_KEY_VARS
          .iter()
          .find_map(|name| lookup(*name).filter(|v| !v.is_empty()))
          .ok_or_else(|| {
            Error::InvalidConfiguration(format!(
              "none of {} is set",
              API_KEY_VARS.join(", ")
            ))
          })?;

        let timeout_secs = match lookup(TIMEOUT_VAR)
        {   Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
              Error::InvalidConfiguration(format!(
                "{TIMEOUT_VAR}={raw}: {e}"
              ))
            })?)
          , None => None
        };

        debug!("Loaded client config from environment");
        Ok(ClientConfig
        {   api_key
          , api_base: lookup(API_BASE_VAR)
          , timeout_secs
          , verify_api_key: true
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self
    {   self.api_base = Some(api_base.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self
    {   self.timeout_secs = Some(secs);
        self
    }

    pub fn with_verify_api_key(mut self, verify: bool) -> Self
    {   self.verify_api_key = verify;
        self
    }

    /// Base URL with any trailing slash removed
    pub fn resolved_api_base(&self) -> &str
    {   self.api_base
          .as_deref()
          .unwrap_or(DEFAULT_API_BASE)
          .trim_end_matches('/')
    }
}

/// Optional generation parameters for a chat completion.
///
/// Every unset field is left out of the request body. Passing no config
/// at all is not the same as passing `CompletionConfig::default()`: only
/// the former makes the request ask for a plain `text` response format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig
{   pub temperature: Option<f32>
  , pub top_p: Option<f32>
  , pub stream: Option<bool>
  , pub stop: Option<Vec<String>>
  , pub max_tokens: Option<u32>
  , pub presence_penalty: Option<f32>
  , pub frequency_penalty: Option<f32>
  , /// End-user identifier forwarded to the API
    pub user: Option<String>
  , pub seed: Option<i64>
  , pub response_format: Option<ResponseFormat>
}

impl CompletionConfig
{   pub fn temperature(mut self, temperature: f32) -> Self
    {   self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self
    {   self.top_p = Some(top_p);
        self
    }

    pub fn stream(mut self, stream: bool) -> Self
    {   self.stream = Some(stream);
        self
    }

    pub fn presence_penalty(mut self, penalty: f32) -> Self
    {   self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f32) -> Self
    {   self.frequency_penalty = Some(penalty);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self
    {   self.max_tokens = Some(max_tokens);
        self
    }

    pub fn stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>
      , S: Into<String>
    {   self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }

    pub fn seed(mut self, seed: i64) -> Self
    {   self.seed = Some(seed);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self
    {   self.user = Some(user.into());
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self
    {   self.response_format = Some(format);
        self
    }
}

/// Optional form fields for transcription and translation requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionConfig
{   /// ISO-639-1 language of the audio (transcription only)
    pub language: Option<String>
  , /// Text to guide the model's style
    pub prompt: Option<String>
  , /// `json`, `verbose_json` or `text`
    pub response_format: Option<String>
  , pub temperature: Option<f32>
}

impl TranscriptionConfig
{   /// The API answers with a raw text body instead of JSON
    pub fn wants_plain_text(&self) -> bool
    {   self.response_format.as_deref() == Some("text")
    }
}
