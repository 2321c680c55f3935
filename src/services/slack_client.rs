use color_eyre::eyre::{eyre, Result, WrapErr};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{channel_name, ChannelNotifier};

/// Slack Web API client for project channels.
pub struct SlackClient {
    http_client: Client,
    base_url: String,
    bot_token: Secret<String>,
}

impl SlackClient {
    pub fn new(
        base_url: String,
        bot_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            bot_token,
        }
    }

    /// Calls a Web API method. Slack reports failures as `ok: false` with
    /// a 200 status, so both are checked.
    async fn call<Body: Serialize>(
        &self,
        method: &str,
        body: &Body,
    ) -> Result<SlackResponse> {
        let base = Url::parse(&format!("{}/", self.base_url.trim_end_matches('/')))
            .wrap_err("failed to parse Slack base URL")?;
        let url = base
            .join(method)
            .wrap_err("failed to build Slack method URL")?;

        let response: SlackResponse = self
            .http_client
            .post(url)
            .bearer_auth(self.bot_token.expose_secret())
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .wrap_err("failed to parse Slack response")?;

        if !response.ok {
            return Err(eyre!(
                "Slack {} failed: {}",
                method,
                response.error.as_deref().unwrap_or("unknown error")
            ));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl ChannelNotifier for SlackClient {
    #[tracing::instrument(name = "Creating Slack channel", skip_all)]
    async fn create_channel(&self, name: &str) -> Result<Option<String>> {
        let body = CreateChannelRequest {
            name: channel_name(name),
            is_private: false,
        };
        let response = self.call("conversations.create", &body).await?;
        let channel = response
            .channel
            .ok_or_else(|| eyre!("Slack response is missing the channel"))?;

        tracing::info!("Slack channel created: {}", channel.id);
        Ok(Some(channel.id))
    }

    #[tracing::instrument(name = "Renaming Slack channel", skip_all)]
    async fn rename_channel(&self, channel_id: &str, name: &str) -> Result<()> {
        let body = RenameChannelRequest {
            channel: channel_id,
            name: channel_name(name),
        };
        self.call("conversations.rename", &body).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Archiving Slack channel", skip_all)]
    async fn archive_channel(&self, channel_id: &str) -> Result<()> {
        let body = ChannelRequest {
            channel: channel_id,
        };
        self.call("conversations.archive", &body).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Sending Slack channel message", skip_all)]
    async fn send_channel_message(
        &self,
        channel_id: &str,
        message: &str,
    ) -> Result<()> {
        let body = PostMessageRequest {
            channel: channel_id,
            text: message,
        };
        self.call("chat.postMessage", &body).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CreateChannelRequest {
    name: String,
    is_private: bool,
}

#[derive(Serialize)]
struct RenameChannelRequest<'a> {
    channel: &'a str,
    name: String,
}

#[derive(Serialize)]
struct ChannelRequest<'a> {
    channel: &'a str,
}

#[derive(Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
    channel: Option<SlackChannel>,
}

#[derive(Debug, Deserialize)]
struct SlackChannel {
    id: String,
}
