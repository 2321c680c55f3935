pub mod data_stores;
pub mod noop_notifier;
pub mod slack_client;
