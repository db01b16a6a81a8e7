//! reqwest-backed implementation of [`SpotlistApi`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::SpotlistApi;
use crate::error::{ApiError, ApiResult};
use crate::requests::{
    CommunityPostPayload, ListCreateRequest, ListPostPayload, ReviewPostRequest,
    SpotListMembership,
};
use crate::responses::{
    CommunityPostResponse, ListPostResponse, ListRecord, ReviewPostResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.spotlist.app";

/// HTTP client for the Spotlist API.
#[derive(Debug, Clone)]
pub struct HttpSpotlistApi {
    http_client: Client,
    api_token: String,
    base_url: String,
}

impl HttpSpotlistApi {
    /// Create a new client with the given API token.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `SPOTLIST_API_TOKEN` environment variable.
    ///
    /// `SPOTLIST_API_BASE_URL`, when set, overrides the default endpoint.
    pub fn from_env() -> ApiResult<Self> {
        let api_token = std::env::var("SPOTLIST_API_TOKEN")
            .map_err(|_| ApiError::Config("SPOTLIST_API_TOKEN not set".into()))?;
        let mut api = Self::new(api_token);
        if let Ok(url) = std::env::var("SPOTLIST_API_BASE_URL") {
            api = api.with_base_url(url);
        }
        Ok(api)
    }

    /// Set a custom base URL (staging, local server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body, check the status, decode the JSON response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST a JSON body and discard the response payload.
    async fn post_unit<B>(&self, path: &str, body: &B) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SpotlistApi for HttpSpotlistApi {
    async fn create_list(&self, req: &ListCreateRequest) -> ApiResult<ListRecord> {
        self.post_json("/v1/lists", req).await
    }

    async fn add_spot_to_list(
        &self,
        list_id: i64,
        membership: &SpotListMembership,
    ) -> ApiResult<()> {
        let path = format!("/v1/lists/{list_id}/spots");
        self.post_unit(&path, membership).await
    }

    async fn create_community_post(
        &self,
        payload: &CommunityPostPayload,
    ) -> ApiResult<CommunityPostResponse> {
        self.post_json("/v1/posts/community", payload).await
    }

    async fn create_review_post(
        &self,
        req: &ReviewPostRequest,
    ) -> ApiResult<ReviewPostResponse> {
        self.post_json("/v1/posts/review", req).await
    }

    async fn create_list_post(
        &self,
        payload: &ListPostPayload,
    ) -> ApiResult<ListPostResponse> {
        // The shared posts endpoint dispatches on the payload's "type" tag.
        self.post_json("/v1/posts", payload).await
    }
}
