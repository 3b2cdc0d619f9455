//! Model metadata returned by the `models` endpoints

use serde::{Deserialize, Serialize};

/// Metadata for a model hosted on GroqCloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model
{   pub id: String
  , #[serde(default)]
    pub object: String
  , /// Unix timestamp when the model was created
    #[serde(default)]
    pub created: i64
  , #[serde(default)]
    pub owned_by: String
  , /// Whether the model is currently served
    #[serde(default)]
    pub active: bool
  , /// Context window size in tokens
    #[serde(default)]
    pub context_window: u64
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelsResponse
{   pub data: Vec<Model>
}
