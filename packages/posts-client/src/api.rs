//! The transport collaborator contract.
//!
//! The flow depends on this trait, never on a concrete HTTP client.
//! Production wires in [`HttpSpotlistApi`](crate::http::HttpSpotlistApi);
//! tests script the collaborator. The collaborator owns connection
//! pooling, timeouts, and cancellation; every call here is one blocking
//! unit of work with two outcomes.

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::requests::{
    CommunityPostPayload, ListCreateRequest, ListPostPayload, ReviewPostRequest,
    SpotListMembership,
};
use crate::responses::{
    CommunityPostResponse, ListPostResponse, ListRecord, ReviewPostResponse,
};

#[async_trait]
pub trait SpotlistApi: Send + Sync {
    /// Create a list. The community-post flow only ever creates hidden
    /// ones.
    async fn create_list(&self, req: &ListCreateRequest) -> ApiResult<ListRecord>;

    /// Add a single spot to an existing list.
    async fn add_spot_to_list(
        &self,
        list_id: i64,
        membership: &SpotListMembership,
    ) -> ApiResult<()>;

    /// Create a community post referencing an already-populated list.
    async fn create_community_post(
        &self,
        payload: &CommunityPostPayload,
    ) -> ApiResult<CommunityPostResponse>;

    /// Create a review post for a single spot.
    async fn create_review_post(
        &self,
        req: &ReviewPostRequest,
    ) -> ApiResult<ReviewPostResponse>;

    /// Create a post referencing a pre-existing public list. The payload
    /// carries the `"type"` tag the server dispatches on.
    async fn create_list_post(&self, payload: &ListPostPayload)
        -> ApiResult<ListPostResponse>;
}
