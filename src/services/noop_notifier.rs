use color_eyre::eyre::Result;

use crate::domain::ChannelNotifier;

/// Used when no Slack bot token is configured.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait::async_trait]
impl ChannelNotifier for NoopNotifier {
    async fn create_channel(&self, name: &str) -> Result<Option<String>> {
        tracing::debug!("Channels disabled, not creating one for {name}");
        Ok(None)
    }

    async fn rename_channel(&self, _channel_id: &str, _name: &str) -> Result<()> {
        Ok(())
    }

    async fn archive_channel(&self, _channel_id: &str) -> Result<()> {
        Ok(())
    }

    async fn send_channel_message(
        &self,
        _channel_id: &str,
        _message: &str,
    ) -> Result<()> {
        Ok(())
    }
}
