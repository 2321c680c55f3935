use color_eyre::eyre::{Result, WrapErr};
use move_forward::{
    app_state::{AppState, NotifierType},
    domain::Sprint,
    get_postgres_pool, get_redis_client,
    services::{
        data_stores::{
            PostgresMemberStore, PostgresProjectStore, PostgresRecordStore,
            PostgresTaskStore, RedisSessionStore,
        },
        noop_notifier::NoopNotifier,
        slack_client::SlackClient,
    },
    utils::{
        constants::{
            prod, DATABASE_URL, REDIS_HOST_NAME, SLACK_API_BASE_URL,
            SLACK_BOT_TOKEN,
        },
        tracing::init_tracing,
    },
    Application,
};
use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = configure_postgresql().await?;
    let redis_connection = Arc::new(RwLock::new(configure_redis()?));

    let member_store =
        Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool.clone())));
    let project_store =
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool.clone())));
    let task_store =
        Arc::new(RwLock::new(PostgresTaskStore::new(pg_pool.clone())));
    let sprint_store =
        Arc::new(RwLock::new(PostgresRecordStore::<Sprint>::new(pg_pool)));
    let session_store =
        Arc::new(RwLock::new(RedisSessionStore::new(redis_connection)));

    let app_state = AppState::new(
        member_store,
        project_store,
        task_store,
        session_store,
        sprint_store,
        configure_notifier()?,
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to build app: {e}"))?;

    app.run().await.wrap_err("Failed to run app")
}

async fn configure_postgresql() -> Result<PgPool> {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

fn configure_redis() -> Result<redis::Connection> {
    get_redis_client(REDIS_HOST_NAME.to_owned())
        .wrap_err("Failed to get Redis client")?
        .get_connection()
        .wrap_err("Failed to get Redis connection")
}

fn configure_notifier() -> Result<NotifierType> {
    let Some(bot_token) = SLACK_BOT_TOKEN.clone() else {
        tracing::info!("SLACK_BOT_TOKEN not set, project channels disabled");
        return Ok(Arc::new(NoopNotifier));
    };

    let http_client = Client::builder()
        .timeout(prod::slack_client::TIMEOUT)
        .build()
        .wrap_err("Failed to build HTTP client")?;

    Ok(Arc::new(SlackClient::new(
        SLACK_API_BASE_URL.to_owned(),
        bot_token,
        http_client,
    )))
}
