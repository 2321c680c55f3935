use reqwest::{header::COOKIE, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{
    domain::ProjectId,
    routes::{
        members::MemberRecord,
        projects::{ProjectRecord, ProjectRequest},
    },
    utils::constants::SESSION_COOKIE_NAME,
    DataResponse, ErrorResponse,
};

const UNEXPECTED_FAILURE_MESSAGE: &str =
    "Something went wrong: please try again later";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: please try again later")]
    Network(#[from] reqwest::Error),
    #[error("Request failed with status {status}")]
    Api { status: u16, errors: Vec<String> },
}

impl ClientError {
    /// Messages fit for showing to the user.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ClientError::Network(_) => vec![self.to_string()],
            ClientError::Api { errors, .. } => errors.clone(),
        }
    }

    /// One line for page-level error banners.
    pub fn summary(&self) -> String {
        self.messages().join(" ")
    }

    /// True for rejections the user can fix by changing their input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if (400..500).contains(status))
    }
}

/// The session a client acts under. Passed explicitly to every call.
#[derive(Debug, Clone)]
pub struct Credentials {
    session: Secret<String>,
}

impl Credentials {
    pub fn new(session: Secret<String>) -> Self {
        Self { session }
    }

    fn cookie(&self) -> String {
        format!("{}={}", SESSION_COOKIE_NAME, self.session.expose_secret())
    }
}

#[derive(Serialize)]
struct LogInBody<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[tracing::instrument(name = "Client log in", skip_all)]
    pub async fn log_in(
        &self,
        username: &str,
        password: &Secret<String>,
    ) -> Result<(Credentials, MemberRecord), ClientError> {
        let response = self
            .http_client
            .post(self.url("/members/log-in"))
            .json(&LogInBody {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let session = response
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE_NAME)
            .map(|c| Secret::new(c.value().to_owned()));

        let member: MemberRecord = read_data(response).await?;
        let session = session.ok_or_else(|| ClientError::Api {
            status: 500,
            errors: vec!["Log-in response carried no session".to_owned()],
        })?;

        Ok((Credentials::new(session), member))
    }

    pub async fn get_members(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<MemberRecord>, ClientError> {
        self.send(self.http_client.get(self.url("/members")), credentials)
            .await
    }

    pub async fn get_projects(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<ProjectRecord>, ClientError> {
        self.send(self.http_client.get(self.url("/projects")), credentials)
            .await
    }

    pub async fn get_project(
        &self,
        credentials: &Credentials,
        id: &ProjectId,
    ) -> Result<ProjectRecord, ClientError> {
        let url = self.url(&format!("/projects/{id}"));
        self.send(self.http_client.get(url), credentials).await
    }

    pub async fn update_project(
        &self,
        credentials: &Credentials,
        id: &ProjectId,
        request: &ProjectRequest,
    ) -> Result<ProjectRecord, ClientError> {
        let url = self.url(&format!("/projects/{id}"));
        self.send(self.http_client.put(url).json(request), credentials)
            .await
    }

    pub async fn delete_project(
        &self,
        credentials: &Credentials,
        id: &ProjectId,
    ) -> Result<ProjectRecord, ClientError> {
        let url = self.url(&format!("/projects/{id}"));
        self.send(self.http_client.delete(url), credentials).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credentials: &Credentials,
    ) -> Result<T, ClientError> {
        let response = request
            .header(COOKIE, credentials.cookie())
            .send()
            .await?;
        read_data(response).await
    }
}

async fn read_data<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let body: DataResponse<T> = response.json().await?;
        return Ok(body.data);
    }

    // Bodies outside the error envelope, or with no errors in it, still
    // need something to show.
    let errors = match response.json::<ErrorResponse>().await {
        Ok(body) if !body.errors.is_empty() => body.errors,
        _ => vec![UNEXPECTED_FAILURE_MESSAGE.to_owned()],
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        errors,
    })
}
