use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
    pub static ref REDIS_HOST_NAME: String = set_redis_host();
    pub static ref SLACK_BOT_TOKEN: Option<Secret<String>> =
        set_slack_bot_token();
    pub static ref SLACK_API_BASE_URL: String =
        load_or_default(env::SLACK_API_BASE_URL_ENV_VAR, DEFAULT_SLACK_API_BASE_URL);
    pub static ref CLIENT_ORIGIN: String =
        load_or_default(env::CLIENT_ORIGIN_ENV_VAR, DEFAULT_CLIENT_ORIGIN);
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

// Slack is optional; a missing or empty token disables channel updates.
fn set_slack_bot_token() -> Option<Secret<String>> {
    load_env();
    std_env::var(env::SLACK_BOT_TOKEN_ENV_VAR)
        .ok()
        .filter(|token| !token.is_empty())
        .map(Secret::new)
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) if !value.is_empty() => value,
        _ => String::from(default_value),
    }
}

fn set_redis_host() -> String {
    load_or_default(env::REDIS_HOST_NAME_ENV_VAR, DEFAULT_REDIS_HOSTNAME)
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REDIS_HOST_NAME";
    pub const SLACK_BOT_TOKEN_ENV_VAR: &str = "SLACK_BOT_TOKEN";
    pub const SLACK_API_BASE_URL_ENV_VAR: &str = "SLACK_API_BASE_URL";
    pub const CLIENT_ORIGIN_ENV_VAR: &str = "CLIENT_ORIGIN";
}

pub const SESSION_COOKIE_NAME: &str = "sid";
pub const DEFAULT_REDIS_HOSTNAME: &str = "127.0.0.1";
pub const DEFAULT_SLACK_API_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod slack_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod slack_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
