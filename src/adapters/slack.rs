use crate::core::service::{BotService, FAILURE_MESSAGE};
use crate::domain::ports::{ReplySink, RosterQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Slash-command payload as posted by the chat platform. Only the command
/// text matters to the bot; the rest is context for logging.
#[derive(Debug, Default, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub channel_name: String,
}

#[derive(Debug, Serialize)]
pub struct SlackResponse {
    pub response_type: &'static str,
    pub text: String,
}

impl SlackResponse {
    pub fn in_channel(text: String) -> Self {
        Self {
            response_type: "in_channel",
            text,
        }
    }
}

/// Reply sink that buffers the single outgoing message so the webhook
/// handler can return it as the command response body.
#[derive(Default)]
pub struct BufferedReply {
    text: Mutex<Option<String>>,
}

impl BufferedReply {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn take(&self) -> Option<String> {
        self.text.lock().await.take()
    }
}

#[async_trait]
impl ReplySink for BufferedReply {
    async fn reply(&self, text: &str) -> Result<()> {
        *self.text.lock().await = Some(text.to_string());
        Ok(())
    }
}

pub fn router<Q: RosterQuery + 'static>(service: Arc<BotService<Q>>) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/messages", post(slash_command::<Q>))
        .with_state(service)
}

async fn slash_command<Q: RosterQuery + 'static>(
    State(service): State<Arc<BotService<Q>>>,
    Form(command): Form<SlashCommand>,
) -> Json<SlackResponse> {
    tracing::info!(
        user = %command.user_name,
        channel = %command.channel_name,
        text = %command.text,
        "slash command received"
    );

    let sink = BufferedReply::new();
    let text = match service.handle(&command.text, &sink).await {
        Ok(()) => sink
            .take()
            .await
            .unwrap_or_else(|| FAILURE_MESSAGE.to_string()),
        Err(e) => {
            tracing::error!("failed to deliver reply: {}", e);
            FAILURE_MESSAGE.to_string()
        }
    };

    Json(SlackResponse::in_channel(text))
}
