//! Conversation owned by a background task
//!
//! Every command is handled to completion before the next one is read, so
//! concurrent `complete` calls on one session never interleave their
//! read-send-append steps.

use std::sync::Arc;

use log::{debug, error, info};
use tokio::sync::{mpsc, oneshot};

use crate::client::GroqClient;
use crate::config::CompletionConfig;
use crate::conversation::Conversation;
use crate::error::{Error, Result};
use crate::request::{ChatCompletionResponse, Message};
use crate::transport::Transport;

/// Commands for the session task
enum SessionCommand
{   AddMessages
    {   messages: Vec<Message>
      , reply: oneshot::Sender<()>
    }
  , ClearHistory
    {   reply: oneshot::Sender<()>
    }
  , History
    {   reply: oneshot::Sender<Vec<Message>>
    }
  , Complete
    {   model: String
      , config: Option<CompletionConfig>
      , reply: oneshot::Sender<Result<ChatCompletionResponse>>
    }
  , Shutdown
    {   reply: oneshot::Sender<Conversation>
    }
}

/// Cloneable handle to a conversation running in its own task
#[derive(Clone)]
pub struct ConversationSession
{   tx: mpsc::UnboundedSender<SessionCommand>
}

impl ConversationSession
{   /// Move `conversation` into a new task driven through this handle
    pub fn spawn<T>(
      conversation: Conversation
    , client: Arc<GroqClient<T>>
    ) -> Self
    where
        T: Transport + 'static
    {   debug!("Spawning conversation session");
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
          run_session_loop(cmd_rx, conversation, client).await;
        });

        ConversationSession { tx: cmd_tx }
    }

    pub async fn add_messages(&self, messages: Vec<Message>) -> Result<()>
    {   debug!("add_messages queued: {}", messages.len());
        self.call(|reply| SessionCommand::AddMessages { messages, reply })
          .await
    }

    pub async fn clear_history(&self) -> Result<()>
    {   debug!("clear_history queued");
        self.call(|reply| SessionCommand::ClearHistory { reply })
          .await
    }

    /// Snapshot of the current history
    pub async fn history(&self) -> Result<Vec<Message>>
    {   self.call(|reply| SessionCommand::History { reply })
          .await
    }

    /// Same contract as [`Conversation::complete`]
    pub async fn complete(
      &self
    , model: impl Into<String>
    , config: Option<CompletionConfig>
    ) -> Result<ChatCompletionResponse>
    {   let model = model.into();
        debug!("complete queued for model: {}", model);
        self.call(|reply| SessionCommand::Complete { model, config, reply })
          .await?
    }

    /// Stop the task and hand back the conversation
    pub async fn shutdown(&self) -> Result<Conversation>
    {   debug!("Shutting down conversation session");
        self.call(|reply| SessionCommand::Shutdown { reply })
          .await
    }

    async fn call<R, F>(&self, command: F) -> Result<R>
    where
        F: FnOnce(oneshot::Sender<R>) -> SessionCommand
    {   let (reply_tx, reply_rx) = oneshot::channel();
        self.tx.send(command(reply_tx)).map_err(|_| {
          error!("Session channel closed");
          Error::Disconnected("conversation session stopped".to_string())
        })?;
        reply_rx.await.map_err(|_| {
          error!("Session dropped reply");
          Error::Disconnected("conversation session stopped".to_string())
        })
    }
}

/// Main session loop
async fn run_session_loop<T: Transport>(
  mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>
, mut conversation: Conversation
, client: Arc<GroqClient<T>>
)
{   debug!("Starting conversation session loop");
    loop
    { match cmd_rx.recv().await
      {   Some(SessionCommand::AddMessages { messages, reply }) => {
            conversation.add_messages(messages);
            let _ = reply.send(());
          }
        , Some(SessionCommand::ClearHistory { reply }) => {
            conversation.clear_history();
            let _ = reply.send(());
          }
        , Some(SessionCommand::History { reply }) => {
            let _ = reply.send(conversation.history().to_vec());
          }
        , Some(SessionCommand::Complete { model, config, reply }) => {
            debug!("Processing Complete for: {}", model);
            let result = conversation
              .complete(&client, &model, config.as_ref())
              .await;
            let _ = reply.send(result);
          }
        , Some(SessionCommand::Shutdown { reply }) => {
            info!("Conversation session shutting down");
            let _ = reply.send(conversation);
            break;
          }
        , None => {
            debug!("Command channel closed");
            break;
          }
      }
    }
}
