//! Live tests against GroqCloud. Run with `--ignored` and `GROQ_API_KEY` set.

use groqcloud::{ClientConfig, Conversation, Error, GroqClient, Message};

const CHAT_MODEL: &str = "llama3-8b-8192";

/// Client from the environment, or None when no key is configured
async fn live_client() -> Option<GroqClient>
{   let config = match ClientConfig::from_env()
    {   Ok(c) => c
      , Err(e) => {
          println!("Skipping: {}", e);
          return None;
        }
    };
    match GroqClient::from_config(config).await
    {   Ok(client) => Some(client)
      , Err(e) => panic!("API key should be valid: {}", e)
    }
}

#[tokio::test]
#[ignore]
async fn test_invalid_key_is_rejected()
{   let result = GroqClient::new("notAnApiKey").await;
    assert!(matches!(result, Err(Error::Authentication(_))));
}

#[tokio::test]
#[ignore]
async fn test_get_models()
{   let Some(client) = live_client().await else { return };

    let models = client.get_models().await
      .expect("model listing should succeed");
    println!("Available models:");
    for model in &models
    {   println!("  - {}", model.id);
    }
    assert!(!models.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_get_model()
{   let Some(client) = live_client().await else { return };

    let model = client.get_model(CHAT_MODEL).await
      .expect("model lookup should succeed");
    assert_eq!(model.id, CHAT_MODEL);
    assert_eq!(model.owned_by, "Meta");
}

#[tokio::test]
#[ignore]
async fn test_chat_completion()
{   let Some(client) = live_client().await else { return };

    let mut conversation = Conversation::new("");
    conversation.add_messages([Message::user(
      "say the word banana in lowercase with no punctuation"
    )]);

    let response = conversation.complete(&client, CHAT_MODEL, None).await
      .expect("completion should succeed");
    assert_eq!(response.first_content(), Some("banana"));
    assert_eq!(conversation.len(), 3);
}
