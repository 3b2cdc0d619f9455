//! Transcription and translation of audio files

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::config::TranscriptionConfig;
use crate::error::Result;
use crate::transport::{ApiResponse, MultipartForm};

/// Which audio endpoint a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTask
{   /// Speech to text in the spoken language
    Transcription
  , /// Speech to English text
    Translation
}

impl AudioTask
{   pub fn endpoint(&self) -> &'static str
    {   match self
        {   AudioTask::Transcription => "audio/transcriptions"
          , AudioTask::Translation => "audio/translations"
        }
    }

    pub(crate) fn context(&self) -> &'static str
    {   match self
        {   AudioTask::Transcription => "audio transcription"
          , AudioTask::Translation => "audio translation"
        }
    }
}

/// Text produced from an audio file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription
{   pub text: String
  , /// Detected language (`verbose_json` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>
  , /// Audio duration in seconds (`verbose_json` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>
}

/// Multipart body for an audio request
pub(crate) fn build_form(
  task: AudioTask
, file_name: &str
, data: Vec<u8>
, model: &str
, config: Option<&TranscriptionConfig>
) -> MultipartForm
{   let mut form = MultipartForm::new()
      .file(file_name, data)
      .text("model", model);

    if let Some(config) = config
    {   if task == AudioTask::Transcription
        {   if let Some(language) = &config.language
            {   form = form.text("language", language.as_str());
            }
        } else if config.language.is_some()
        {   debug!("Ignoring language for audio translation");
        }
        if let Some(prompt) = &config.prompt
        {   form = form.text("prompt", prompt.as_str());
        }
        if let Some(format) = &config.response_format
        {   form = form.text("response_format", format.as_str());
        }
        if let Some(temperature) = config.temperature
        {   form = form.text("temperature", temperature.to_string());
        }
    }
    form
}

/// Read the body as raw text or JSON depending on the requested format
pub(crate) fn decode_response(
  response: &ApiResponse
, config: Option<&TranscriptionConfig>
) -> Result<Transcription>
{   if config.map_or(false, TranscriptionConfig::wants_plain_text)
    {   return Ok(Transcription
        {   text: response.text()
          , ..Default::default()
        });
    }
    response.json().map_err(|e| {
      error!("Parse error: {}", e);
      e
    })
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;

    fn full_config() -> TranscriptionConfig
    {   TranscriptionConfig
        {   language: Some("fr".to_string())
          , prompt: Some("names: Ana".to_string())
          , response_format: Some("json".to_string())
          , temperature: Some(0.2)
        }
    }

    #[test]
    fn transcription_form_carries_every_field()
    {   let form = build_form(
          AudioTask::Transcription,
          "clip.mp3",
          vec![0; 4],
          "whisper-large-v3",
          Some(&full_config())
        );
        assert_eq!(form.field("model"), Some("whisper-large-v3"));
        assert_eq!(form.field("language"), Some("fr"));
        assert_eq!(form.field("prompt"), Some("names: Ana"));
        assert_eq!(form.field("response_format"), Some("json"));
        assert_eq!(form.field("temperature"), Some("0.2"));
        assert_eq!(
          form.file.as_ref().map(|f| f.file_name.as_str()),
          Some("clip.mp3")
        );
    }

    #[test]
    fn translation_form_drops_language()
    {   let form = build_form(
          AudioTask::Translation,
          "clip.mp3",
          vec![0; 4],
          "whisper-large-v3",
          Some(&full_config())
        );
        assert_eq!(form.field("language"), None);
        assert_eq!(form.field("prompt"), Some("names: Ana"));
    }

    #[test]
    fn no_config_sends_only_file_and_model()
    {   let form = build_form(
          AudioTask::Transcription,
          "clip.mp3",
          vec![],
          "whisper-large-v3",
          None
        );
        assert_eq!(form.fields.len(), 1);
    }

    #[test]
    fn text_format_reads_raw_body()
    {   let config = TranscriptionConfig
        {   response_format: Some("text".to_string())
          , ..Default::default()
        };
        let response = ApiResponse::new(200, " The quick brown fox.");
        let transcription = decode_response(&response, Some(&config))
          .unwrap();
        assert_eq!(transcription.text, " The quick brown fox.");
    }

    #[test]
    fn json_body_must_decode()
    {   let response = ApiResponse::new(200, "plain words");
        assert!(matches!(
          decode_response(&response, None),
          Err(Error::Serialization(_))
        ));
    }
}
