//! Client-side post creation for the Spotlist spot-discovery app.
//!
//! Three kinds of social posts exist: community posts, review posts, and
//! list posts. A community post is not a single server object - it is
//! composed client-side by creating a hidden list over the chosen spots
//! and then creating a post that references it. This crate owns the
//! request/response contracts, the validation rules that must hold
//! before any network call, and the multi-stage flow with its
//! partial-failure semantics. Transport is a collaborator behind the
//! [`SpotlistApi`] trait; [`HttpSpotlistApi`] is the reqwest-backed
//! implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use posts_client::{CommunityPostRequest, HttpSpotlistApi, PostFlow};
//!
//! let api = HttpSpotlistApi::from_env()?;
//! let flow = PostFlow::new(api);
//!
//! let request = CommunityPostRequest {
//!     title: "Best Beaches".into(),
//!     description: None,
//!     user_id: 42,
//!     spot_ids: vec![10, 11, 12],
//! };
//!
//! let outcome = flow.create_community_post(&request).await;
//! if outcome.is_partial() {
//!     // The hidden list exists server-side with nothing referencing it.
//! }
//! let response = outcome.into_response();
//! ```

pub mod api;
pub mod error;
pub mod flow;
pub mod http;
pub mod requests;
pub mod responses;
pub mod validation;

pub use api::SpotlistApi;
pub use error::{ApiError, ApiResult, ReviewFormError};
pub use flow::{CommunityPostOutcome, FlowStage, PostFlow};
pub use http::HttpSpotlistApi;
pub use requests::{
    CommunityPostPayload, CommunityPostRequest, ListCreateRequest, ListPostPayload,
    ListPostRequest, ReviewPostRequest, SpotListMembership,
};
pub use responses::{
    CommunityPostData, CommunityPostResponse, ListPostData, ListPostResponse, ListRecord,
    ReviewPostData, ReviewPostResponse,
};
pub use validation::Validate;
