use color_eyre::eyre::Result;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("whitespace regex is valid");
}

/// Chat channels mirroring the lifecycle of projects.
#[async_trait::async_trait]
pub trait ChannelNotifier {
    /// Creates a public channel and returns its id, or `None` when channels
    /// are not being kept.
    async fn create_channel(&self, name: &str) -> Result<Option<String>>;
    async fn rename_channel(&self, channel_id: &str, name: &str) -> Result<()>;
    async fn archive_channel(&self, channel_id: &str) -> Result<()>;
    async fn send_channel_message(
        &self,
        channel_id: &str,
        message: &str,
    ) -> Result<()>;
}

/// Channel-safe form of a project name: lowercase, whitespace runs as `-`.
pub fn channel_name(project_name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&project_name.to_lowercase(), "-")
        .into_owned()
}
