use super::{check_length, PublishError, Publisher};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Who can see a posted status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Direct,
}

/// Form body for `POST /api/v1/statuses`
#[derive(Debug, Serialize)]
pub struct StatusRequest<'a> {
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Posts statuses to a Mastodon instance
pub struct MastodonClient {
    http: Client,
    base_url: String,
    access_token: String,
    max_length: usize,
    visibility: Option<Visibility>,
}

impl MastodonClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, PublishError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            max_length,
            visibility: None,
        })
    }

    pub fn visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }
}

#[async_trait]
impl Publisher for MastodonClient {
    fn max_length(&self) -> usize {
        self.max_length
    }

    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        check_length(text, self.max_length)?;

        let req = StatusRequest {
            status: text,
            visibility: self.visibility,
        };

        let response = self
            .http
            .post(format!("{}/api/v1/statuses", self.base_url))
            .bearer_auth(&self.access_token)
            .form(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PublishError::Server {
                status: status.as_u16(),
                body,
            });
        }

        debug!(chars = text.chars().count(), "Status posted");
        Ok(())
    }
}
