//! HTTP transport shared by every endpoint

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method
{   Get
  , Post
}

impl fmt::Display for Method
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   Method::Get => f.write_str("GET")
          , Method::Post => f.write_str("POST")
        }
    }
}

/// Uploaded file inside a multipart form
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart
{   pub file_name: String
  , pub data: Vec<u8>
}

impl fmt::Debug for FilePart
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("FilePart")
          .field("file_name", &self.file_name)
          .field("len", &self.data.len())
          .finish()
    }
}

/// Multipart form with text fields and at most one `file` part
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm
{   pub fields: Vec<(String, String)>
  , pub file: Option<FilePart>
}

impl MultipartForm
{   pub fn new() -> Self
    {   Self::default()
    }

    pub fn text(
      mut self
    , name: impl Into<String>
    , value: impl Into<String>
    ) -> Self
    {   self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
      mut self
    , file_name: impl Into<String>
    , data: Vec<u8>
    ) -> Self
    {   self.file = Some(FilePart
        {   file_name: file_name.into()
          , data
        });
        self
    }

    /// Value of a text field
    pub fn field(&self, name: &str) -> Option<&str>
    {   self.fields
          .iter()
          .find(|(k, _)| k == name)
          .map(|(_, v)| v.as_str())
    }

    fn into_reqwest(self) -> reqwest::multipart::Form
    {   let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields
        {   form = form.text(name, value);
        }
        if let Some(file) = self.file
        {   let part = reqwest::multipart::Part::bytes(file.data)
              .file_name(file.file_name);
            form = form.part("file", part);
        }
        form
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody
{   Empty
  , Json(Vec<u8>)
  , Multipart(MultipartForm)
}

/// Authenticated call against an endpoint relative to the API base
#[derive(Clone, PartialEq)]
pub struct ApiRequest
{   pub method: Method
  , pub endpoint: String
  , pub api_key: String
  , pub body: RequestBody
}

impl fmt::Debug for ApiRequest
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("ApiRequest")
          .field("method", &self.method)
          .field("endpoint", &self.endpoint)
          .field("api_key", &"<redacted>")
          .field("body", &self.body)
          .finish()
    }
}

impl ApiRequest
{   pub fn get(endpoint: impl Into<String>, api_key: &str) -> Self
    {   ApiRequest
        {   method: Method::Get
          , endpoint: endpoint.into()
          , api_key: api_key.to_string()
          , body: RequestBody::Empty
        }
    }

    pub fn post_json<T: Serialize + ?Sized>(
      endpoint: impl Into<String>
    , api_key: &str
    , body: &T
    ) -> Result<Self>
    {   Ok(ApiRequest
        {   method: Method::Post
          , endpoint: endpoint.into()
          , api_key: api_key.to_string()
          , body: RequestBody::Json(serde_json::to_vec(body)?)
        })
    }

    pub fn post_multipart(
      endpoint: impl Into<String>
    , api_key: &str
    , form: MultipartForm
    ) -> Self
    {   ApiRequest
        {   method: Method::Post
          , endpoint: endpoint.into()
          , api_key: api_key.to_string()
          , body: RequestBody::Multipart(form)
        }
    }

    /// Decoded JSON body, if this request carries one
    pub fn json_body(&self) -> Option<serde_json::Value>
    {   match &self.body
        {   RequestBody::Json(bytes) => serde_json::from_slice(bytes).ok()
          , _ => None
        }
    }
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse
{   pub status: u16
  , pub body: Vec<u8>
}

impl ApiResponse
{   pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self
    {   ApiResponse
        {   status
          , body: body.into()
        }
    }

    pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String
    {   String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T>
    {   Ok(serde_json::from_slice(&self.body)?)
    }

    /// Turn a non-success status into [`Error::Request`]
    pub fn error_for_status(self, context: &str) -> Result<Self>
    {   if self.is_success()
        {   return Ok(self);
        }
        let message = format!("{} failed: {}", context, self.text());
        error!("{} returned status {}", context, self.status);
        Err(Error::Request
        {   status: self.status
          , message
        })
    }
}

/// Executes authenticated requests against the API
#[async_trait]
pub trait Transport: Send + Sync
{   async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T>
{   async fn send(&self, request: ApiRequest) -> Result<ApiResponse>
    {   (**self).send(request).await
    }
}

/// [`Transport`] backed by a single `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport
{   http_client: reqwest::Client
  , api_base: String
}

impl HttpTransport
{   pub fn new(config: &ClientConfig) -> Result<Self>
    {   let api_base = config.resolved_api_base();
        if !(api_base.starts_with("http://")
          || api_base.starts_with("https://"))
        {   return Err(Error::InvalidConfiguration(format!(
              "API base must be an http(s) URL: {}",
              api_base
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          Error::InvalidConfiguration(e.to_string())
        })?;

        debug!("Creating HttpTransport for {}", api_base);
        Ok(HttpTransport
        {   http_client
          , api_base: api_base.to_string()
        })
    }

    pub fn api_base(&self) -> &str
    {   &self.api_base
    }

    pub fn url_for(&self, endpoint: &str) -> String
    {   format!(
          "{}/{}",
          self.api_base,
          endpoint.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport
{   async fn send(&self, request: ApiRequest) -> Result<ApiResponse>
    {   let url = self.url_for(&request.endpoint);
        debug!("{} {}", request.method, url);

        let builder = match request.method
        {   Method::Get => self.http_client.get(&url)
          , Method::Post => self.http_client.post(&url)
        };
        let builder = builder.bearer_auth(&request.api_key);
        let builder = match request.body
        {   RequestBody::Empty => builder
          , RequestBody::Json(bytes) => builder
              .header(reqwest::header::CONTENT_TYPE, "application/json")
              .body(bytes)
          , RequestBody::Multipart(form) => builder
              .multipart(form.into_reqwest())
        };

        let response = builder.send().await.map_err(|e| {
          error!("HTTP error: {}", e);
          Error::from(e)
        })?;

        let status = response.status().as_u16();
        trace!("{} response status: {}", url, status);

        let body = response.bytes().await.map_err(|e| {
          error!("Failed to read body: {}", e);
          Error::Transport(e.to_string())
        })?;

        Ok(ApiResponse
        {   status
          , body: body.to_vec()
        })
    }
}
