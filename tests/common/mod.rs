#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use groqcloud::{ApiRequest, ApiResponse, Error, GroqClient, Result, Transport};
use serde_json::{json, Value};

pub const TEST_KEY: &str = "gsk_test";

/// In-memory transport answering from a queue and recording every request
#[derive(Default)]
pub struct StubTransport
{   responses: Mutex<VecDeque<Result<ApiResponse>>>
  , requests: Mutex<Vec<ApiRequest>>
}

impl StubTransport
{   pub fn new() -> Self
    {   Self::default()
    }

    pub fn push(&self, response: Result<ApiResponse>)
    {   self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_json(&self, status: u16, body: Value)
    {   self.push(Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest>
    {   self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport
{   async fn send(&self, request: ApiRequest) -> Result<ApiResponse>
    {   self.requests.lock().unwrap().push(request);
        self.responses
          .lock()
          .unwrap()
          .pop_front()
          .unwrap_or_else(|| {
            Err(Error::Transport("no stubbed response left".to_string()))
          })
    }
}

pub fn stub_client() -> GroqClient<StubTransport>
{   GroqClient::with_transport(TEST_KEY, StubTransport::new()).unwrap()
}

/// Chat completion body whose choices carry `contents` in order
pub fn chat_body(contents: &[&str]) -> Value
{   let choices: Vec<Value> = contents
      .iter()
      .enumerate()
      .map(|(index, content)| json!({
        "index": index,
        "message": {"role": "assistant", "content": content},
        "finish_reason": "stop"
      }))
      .collect();
    json!({
      "id": "chatcmpl-test",
      "object": "chat.completion",
      "created": 1714000000,
      "model": "model-x",
      "choices": choices,
      "usage": {
        "prompt_tokens": 10,
        "completion_tokens": 1,
        "total_tokens": 11,
        "queue_time": 0.01,
        "prompt_time": 0.002,
        "completion_time": 0.001,
        "total_time": 0.003
      },
      "system_fingerprint": "fp_test"
    })
}

pub fn init_logging()
{   let _ = env_logger::builder().is_test(true).try_init();
}
