use crate::codeforces::{
    extract::{extract, SolvedSet},
    model::UserStatusResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;

type Result<T> = std::result::Result<T, FetchError>;

pub const DEFAULT_API_URL: &str = "https://codeforces.com/api/";
const SUBMISSION_FROM: &str = "1";
const SUBMISSION_COUNT: &str = "10000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Codeforces rejected the request: {0}")]
    RemoteRejected(String),
    #[error("failed to retrieve submissions: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::Transport(format!("invalid Codeforces API url: {}", e))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Transport(format!("failed to deserialize JSON data: {}", e))
    }
}

/// Anything that can answer the submission history of a handle.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn user_status(&self, handle: &str) -> Result<UserStatusResponse>;

    /// Retrieve the submission history of `handle` and reduce it to the solved problems.
    async fn solved_problems(&self, handle: &str) -> Result<SolvedSet> {
        let handle = handle.trim();
        let payload = self.user_status(handle).await?;
        extract(handle, payload)
    }
}

pub struct CodeforcesClient {
    user_status_url: Url,
    client: Client,
}

impl CodeforcesClient {
    pub fn new(api_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(api_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let user_status_url = base_url.join("user.status")?;

        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(CodeforcesClient {
            user_status_url,
            client,
        })
    }
}

#[async_trait]
impl SubmissionSource for CodeforcesClient {
    async fn user_status(&self, handle: &str) -> Result<UserStatusResponse> {
        tracing::info!("Fetch submissions of {}", handle);
        let res = self
            .client
            .get(self.user_status_url.clone())
            .query(&[
                ("handle", handle),
                ("from", SUBMISSION_FROM),
                ("count", SUBMISSION_COUNT),
            ])
            .send()
            .await?;

        match res.error_for_status_ref() {
            Ok(_) => {
                let body: UserStatusResponse = res.json().await?;
                Ok(body)
            }
            Err(e) => {
                // Codeforces reports unknown handles with status 400 and a FAILED body.
                let status = e.to_string();
                match res.json::<UserStatusResponse>().await {
                    Ok(body) if !body.is_ok() => Ok(body),
                    _ => Err(FetchError::Transport(format!(
                        "unexpected error [{}]",
                        status
                    ))),
                }
            }
        }
    }
}
