use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    serve::Serve,
    Json, Router,
};

use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{APIError, Sprint};
pub mod routes;
use crate::utils::{constants::CLIENT_ORIGIN, tracing::*};
use routes::{
    members::{
        curr_user, delete_member, get_member, get_members, log_in, log_out,
        sign_up, update_member,
    },
    projects::{
        delete_project, get_project, get_projects, new_project,
        update_project,
    },
    records::{
        create_record, delete_record, get_record, list_records,
        update_record,
    },
    tasks::{delete_task, get_task, get_tasks, new_task, update_task},
};
pub mod app_state;
pub mod client;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

/// Failure body. Masked responses (403 and bare 404) serialize as `{}`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Json<Self> {
        Json(Self { data })
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            APIError::Forbidden => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, vec![])
            }
            APIError::IncorrectCredentials(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, vec![message.to_owned()])
            }
            APIError::NotFound(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, message.iter().cloned().collect())
            }
            APIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["Unexpected error".to_owned()],
                )
            }
            APIError::ValidationError(errors) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, errors.messages().to_vec())
            }
        };
        let body = Json(ErrorResponse { errors });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origin: HeaderValue = CLIENT_ORIGIN.parse()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_credentials(true)
            .allow_origin(allowed_origin);

        let router = Router::new()
            .route("/members/sign-up", post(sign_up))
            .route("/members/log-in", post(log_in))
            .route("/members/log-out", post(log_out))
            .route("/members/curr-user", get(curr_user))
            .route("/members", get(get_members))
            .route(
                "/members/:member_id",
                get(get_member).put(update_member).delete(delete_member),
            )
            .route("/projects", get(get_projects).post(new_project))
            .route(
                "/projects/:project_id",
                get(get_project).put(update_project).delete(delete_project),
            )
            .route("/tasks", get(get_tasks).post(new_task))
            .route(
                "/tasks/:task_id",
                get(get_task).put(update_task).delete(delete_task),
            )
            .route(
                "/sprints",
                get(list_records::<Sprint>).post(create_record::<Sprint>),
            )
            .route(
                "/sprints/:sprint_id",
                get(get_record::<Sprint>)
                    .put(update_record::<Sprint>)
                    .delete(delete_record::<Sprint>),
            )
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

pub fn get_redis_client(redis_hostname: String) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
