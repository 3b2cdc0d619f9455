use std::fmt;
use std::path::Path;

use log::{debug, error, trace};

use crate::audio::{self, AudioTask, Transcription};
use crate::config::{ClientConfig, TranscriptionConfig};
use crate::error::{Error, Result};
use crate::models::{Model, ModelsResponse};
use crate::request::{ChatCompletionRequest, ChatCompletionResponse};
use crate::transport::{ApiRequest, HttpTransport, Transport};

const MODELS_ENDPOINT: &str = "models";
const CHAT_COMPLETIONS_ENDPOINT: &str = "chat/completions";
const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_NOT_FOUND: u16 = 404;

/// Client for the GroqCloud API
///
/// Owns the API key and the transport every request goes through.
pub struct GroqClient<T = HttpTransport>
{   api_key: String
  , transport: T
}

impl<T: fmt::Debug> fmt::Debug for GroqClient<T>
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("GroqClient")
          .field("api_key", &"<redacted>")
          .field("transport", &self.transport)
          .finish()
    }
}

impl GroqClient<HttpTransport>
{   /// Create a client against the default endpoint and verify the key
    pub async fn new(api_key: impl Into<String>) -> Result<Self>
    {   Self::from_config(ClientConfig::new(api_key)).await
    }

    pub async fn from_config(config: ClientConfig) -> Result<Self>
    {   let transport = HttpTransport::new(&config)?;
        if config.verify_api_key
        {   GroqClient::connect(config.api_key, transport).await
        } else
        {   GroqClient::with_transport(config.api_key, transport)
        }
    }
}

impl<T: Transport> GroqClient<T>
{   /// Wrap a transport without contacting the API
    pub fn with_transport(
      api_key: impl Into<String>
    , transport: T
    ) -> Result<Self>
    {   let api_key = api_key.into();
        if api_key.trim().is_empty()
        {   error!("Empty API key");
            return Err(Error::InvalidConfiguration(
              "API key must not be empty".to_string()
            ));
        }
        debug!("Creating GroqClient");
        Ok(GroqClient
        {   api_key
          , transport
        })
    }

    /// Wrap a transport and verify the key with a probe request
    pub async fn connect(
      api_key: impl Into<String>
    , transport: T
    ) -> Result<Self>
    {   let client = Self::with_transport(api_key, transport)?;
        client.verify_api_key().await?;
        Ok(client)
    }

    /// Probe `GET models`; only an unauthorized answer is fatal
    pub async fn verify_api_key(&self) -> Result<()>
    {   debug!("Verifying API key");
        let response = self.transport
          .send(ApiRequest::get(MODELS_ENDPOINT, &self.api_key))
          .await?;

        if response.status == STATUS_UNAUTHORIZED
        {   error!("API key rejected");
            return Err(Error::Authentication(
              "invalid API key".to_string()
            ));
        }
        trace!("API key probe status: {}", response.status);
        Ok(())
    }

    pub fn transport(&self) -> &T
    {   &self.transport
    }

    /// All models available on GroqCloud
    pub async fn get_models(&self) -> Result<Vec<Model>>
    {   debug!("Handling get_models");
        let response = self.transport
          .send(ApiRequest::get(MODELS_ENDPOINT, &self.api_key))
          .await?
          .error_for_status("model listing")?;

        let models: ModelsResponse = response.json().map_err(|e| {
          error!("Parse error: {}", e);
          e
        })?;

        debug!("Retrieved {} models", models.data.len());
        Ok(models.data)
    }

    /// Metadata for a single model
    ///
    /// The id is percent-encoded into a single path segment.
    pub async fn get_model(&self, model_id: &str) -> Result<Model>
    {   debug!("Handling get_model for: {}", model_id);
        if model_id.is_empty()
        {   return Err(Error::InvalidModel(
              "model id must not be empty".to_string()
            ));
        }

        let endpoint = format!(
          "{}/{}",
          MODELS_ENDPOINT,
          urlencoding::encode(model_id)
        );
        let response = self.transport
          .send(ApiRequest::get(endpoint, &self.api_key))
          .await?;

        if response.status == STATUS_NOT_FOUND
        {   error!("Unknown model: {}", model_id);
            return Err(Error::InvalidModel(model_id.to_string()));
        }

        response.error_for_status("model lookup")?.json()
    }

    /// Send one chat completion request and decode the answer
    pub async fn chat_completion(
      &self
    , request: &ChatCompletionRequest
    ) -> Result<ChatCompletionResponse>
    {   debug!("Handling chat_completion for: {}", request.model);
        if request.model.is_empty()
        {   error!("Chat completion without a model");
            return Err(Error::InvalidModel(
              "model must not be empty".to_string()
            ));
        }

        trace!("Chat request: {:?}", request);
        let api_request = ApiRequest::post_json(
          CHAT_COMPLETIONS_ENDPOINT,
          &self.api_key,
          request
        )?;

        let response = self.transport
          .send(api_request)
          .await?
          .error_for_status("chat completion")?;

        response.json().map_err(|e| {
          error!("Parse error: {}", e);
          e
        })
    }

    /// Transcribe an audio file in its spoken language
    pub async fn transcribe_audio(
      &self
    , path: impl AsRef<Path>
    , model: &str
    , config: Option<&TranscriptionConfig>
    ) -> Result<Transcription>
    {   let (file_name, data) = read_audio(path.as_ref()).await?;
        self.run_audio(AudioTask::Transcription, &file_name, data, model, config)
          .await
    }

    /// Transcribe audio already held in memory
    pub async fn transcribe_bytes(
      &self
    , file_name: &str
    , data: Vec<u8>
    , model: &str
    , config: Option<&TranscriptionConfig>
    ) -> Result<Transcription>
    {   self.run_audio(AudioTask::Transcription, file_name, data, model, config)
          .await
    }

    /// Translate an audio file into English text
    pub async fn translate_audio(
      &self
    , path: impl AsRef<Path>
    , model: &str
    , config: Option<&TranscriptionConfig>
    ) -> Result<Transcription>
    {   let (file_name, data) = read_audio(path.as_ref()).await?;
        self.run_audio(AudioTask::Translation, &file_name, data, model, config)
          .await
    }

    /// Translate audio already held in memory
    pub async fn translate_bytes(
      &self
    , file_name: &str
    , data: Vec<u8>
    , model: &str
    , config: Option<&TranscriptionConfig>
    ) -> Result<Transcription>
    {   self.run_audio(AudioTask::Translation, file_name, data, model, config)
          .await
    }

    async fn run_audio(
      &self
    , task: AudioTask
    , file_name: &str
    , data: Vec<u8>
    , model: &str
    , config: Option<&TranscriptionConfig>
    ) -> Result<Transcription>
    {   debug!("Handling {} for: {}", task.context(), model);
        if model.is_empty()
        {   return Err(Error::InvalidModel(
              "model must not be empty".to_string()
            ));
        }

        let form = audio::build_form(task, file_name, data, model, config);
        let response = self.transport
          .send(ApiRequest::post_multipart(
            task.endpoint(),
            &self.api_key,
            form
          ))
          .await?
          .error_for_status(task.context())?;

        audio::decode_response(&response, config)
    }
}

async fn read_audio(path: &Path) -> Result<(String, Vec<u8>)>
{   let data = tokio::fs::read(path).await.map_err(|e| {
      error!("Failed to read {}: {}", path.display(), e);
      Error::from(e)
    })?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "audio".to_string());
    Ok((file_name, data))
}
