/// Error type for every groqcloud operation
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error
{   /// The API key was rejected by the construction probe
    #[error("Authentication failed: {0}")]
    Authentication(String)
  , /// API answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Request
    {   status: u16
      , message: String
    }
  , /// Connection or IO failure inside the HTTP client
    #[error("Transport error: {0}")]
    Transport(String)
  , /// Body could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String)
  , /// Well-formed response missing required content
    #[error("Malformed response: {0}")]
    MalformedResponse(String)
  , /// Empty or unknown model id
    #[error("Invalid model: {0}")]
    InvalidModel(String)
  , /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String)
  , /// Reading a local file failed
    #[error("IO error: {0}")]
    Io(String)
  , /// Session task is no longer running
    #[error("Disconnected: {0}")]
    Disconnected(String)
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   if e.is_decode()
        {   Error::Serialization(e.to_string())
        } else
        {   Error::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}
