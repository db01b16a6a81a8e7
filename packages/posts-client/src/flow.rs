//! Post-creation flows.
//!
//! Creating a community post is a three-stage protocol against the
//! collaborator: create a hidden list, attach each spot in request order,
//! then create the post referencing the list. The protocol is best-effort
//! and non-atomic: a mid-way failure leaves an orphaned hidden list on
//! the server, and no compensating delete is attempted. The server stays
//! the source of truth on whether orphaned private lists are ever
//! garbage-collected. [`CommunityPostOutcome`] reports exactly which
//! stage was reached so callers and ops tooling can decide what to do
//! with the leftovers.
//!
//! Review and list posts create exactly one server-side resource, so
//! they are single-call: validate, one collaborator call, decode.
//!
//! Retrying a partially-completed community-post sequence risks duplicate
//! lists and spots; retries belong to the caller, behind idempotency keys,
//! not here.

use std::fmt;

use tracing::{info, warn};

use crate::api::SpotlistApi;
use crate::requests::{
    CommunityPostPayload, CommunityPostRequest, ListCreateRequest, ListPostRequest,
    ReviewPostRequest, SpotListMembership,
};
use crate::responses::{CommunityPostResponse, ListPostResponse, ReviewPostResponse};
use crate::validation::Validate;

/// Stage of the community-post protocol a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    /// Creating the hidden list.
    List,
    /// Attaching spots to the created list.
    Spots,
    /// Creating the post that references the list.
    Post,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::List => write!(f, "list"),
            FlowStage::Spots => write!(f, "spots"),
            FlowStage::Post => write!(f, "post"),
        }
    }
}

/// Outcome of one community-post invocation.
///
/// The flow does not pretend the protocol is atomic; it reports what
/// actually happened.
#[derive(Debug)]
pub enum CommunityPostOutcome {
    /// Validation failed; no collaborator call was made.
    Rejected {
        /// Rule violations, in rule order.
        errors: Vec<String>,
    },
    /// A stage failed and the protocol stopped there.
    Failed {
        stage: FlowStage,
        /// True when the hidden list already exists server-side with zero
        /// or more spots attached and nothing referencing it.
        partial: bool,
        /// The hidden list created before the failure, if any.
        list_id: Option<i64>,
        /// The collaborator's error text, unmodified.
        error: String,
    },
    /// All three stages succeeded.
    Posted(CommunityPostResponse),
}

impl CommunityPostOutcome {
    /// True when the post was created.
    pub fn is_posted(&self) -> bool {
        matches!(self, CommunityPostOutcome::Posted(_))
    }

    /// True when the failure left an orphaned hidden list behind.
    pub fn is_partial(&self) -> bool {
        matches!(self, CommunityPostOutcome::Failed { partial: true, .. })
    }

    /// Collapse the outcome into the typed response envelope.
    ///
    /// Failures keep the collaborator's raw error text; a rejected request
    /// carries its validation messages joined with `"; "`. Callers that
    /// need the stage bookkeeping should match on the outcome instead.
    pub fn into_response(self) -> CommunityPostResponse {
        match self {
            CommunityPostOutcome::Rejected { errors } => {
                CommunityPostResponse::failure(errors.join("; "))
            }
            CommunityPostOutcome::Failed { list_id, error, .. } => {
                let mut response = CommunityPostResponse::failure(error);
                response.list_id = list_id;
                response
            }
            CommunityPostOutcome::Posted(response) => response,
        }
    }
}

impl fmt::Display for CommunityPostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunityPostOutcome::Rejected { errors } => {
                write!(f, "rejected: {}", errors.join("; "))
            }
            CommunityPostOutcome::Failed {
                stage,
                partial,
                error,
                ..
            } => {
                if *partial {
                    write!(f, "failed at stage {stage} (orphaned list left behind): {error}")
                } else {
                    write!(f, "failed at stage {stage}: {error}")
                }
            }
            CommunityPostOutcome::Posted(response) => {
                match response.data.as_ref() {
                    Some(data) => write!(f, "posted as {}", data.post_id),
                    None => write!(f, "posted"),
                }
            }
        }
    }
}

/// Sequences collaborator calls for the three post kinds.
///
/// One invocation is strictly ordered and owns its request and response
/// values exclusively; nothing is shared between invocations.
pub struct PostFlow<A: SpotlistApi> {
    api: A,
}

impl<A: SpotlistApi> PostFlow<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// The collaborator this flow drives.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the community-post protocol.
    ///
    /// Stages: validate, create hidden list, attach spots in request
    /// order, create the post. The first failure terminates the protocol;
    /// see [`CommunityPostOutcome`] for what each terminal state means.
    pub async fn create_community_post(
        &self,
        request: &CommunityPostRequest,
    ) -> CommunityPostOutcome {
        let errors = request.validate();
        if !errors.is_empty() {
            info!(request = %request.summary(), ?errors, "community post rejected by validation");
            return CommunityPostOutcome::Rejected { errors };
        }

        info!(request = %request.summary(), "creating community post");

        let list_req = ListCreateRequest::hidden(request.title.trim());
        let list = match self.api.create_list(&list_req).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "hidden list creation failed");
                return CommunityPostOutcome::Failed {
                    stage: FlowStage::List,
                    partial: false,
                    list_id: None,
                    error: e.to_string(),
                };
            }
        };
        info!(list_id = list.list_id, "hidden list created");

        for &spot_id in &request.spot_ids {
            let membership = SpotListMembership {
                spot_id,
                list_thumbnail_id: None,
            };
            if let Err(e) = self.api.add_spot_to_list(list.list_id, &membership).await {
                warn!(list_id = list.list_id, spot_id, error = %e, "attaching spot failed");
                return CommunityPostOutcome::Failed {
                    stage: FlowStage::Spots,
                    partial: true,
                    list_id: Some(list.list_id),
                    error: e.to_string(),
                };
            }
        }

        let payload = CommunityPostPayload {
            title: request.title.clone(),
            description: request.description.clone(),
            user_id: request.user_id,
            list_id: list.list_id,
        };
        match self.api.create_community_post(&payload).await {
            Ok(mut response) => {
                if !response.success {
                    let error = response
                        .error
                        .unwrap_or_else(|| "post creation reported failure".to_string());
                    warn!(list_id = list.list_id, error = %error, "post creation reported failure");
                    return CommunityPostOutcome::Failed {
                        stage: FlowStage::Post,
                        partial: true,
                        list_id: Some(list.list_id),
                        error,
                    };
                }
                response.list_id = Some(list.list_id);
                info!(
                    list_id = list.list_id,
                    post_id = response.data.as_ref().map(|d| d.post_id),
                    "community post created"
                );
                CommunityPostOutcome::Posted(response)
            }
            Err(e) => {
                warn!(list_id = list.list_id, error = %e, "post creation failed");
                CommunityPostOutcome::Failed {
                    stage: FlowStage::Post,
                    partial: true,
                    list_id: Some(list.list_id),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Create a review post: validate, one collaborator call, decode.
    ///
    /// Never returns an error; every failure is a `success = false`
    /// envelope.
    pub async fn create_review_post(&self, request: &ReviewPostRequest) -> ReviewPostResponse {
        let errors = request.validate();
        if !errors.is_empty() {
            info!(request = %request.summary(), ?errors, "review post rejected by validation");
            return ReviewPostResponse::failure(errors.join("; "));
        }

        info!(request = %request.summary(), "creating review post");
        match self.api.create_review_post(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "review post creation failed");
                ReviewPostResponse::failure(e.to_string())
            }
        }
    }

    /// Create a list post: validate, one collaborator call, decode.
    ///
    /// Never returns an error; every failure is a `success = false`
    /// envelope.
    pub async fn create_list_post(&self, request: &ListPostRequest) -> ListPostResponse {
        let errors = request.validate();
        if !errors.is_empty() {
            info!(request = %request.summary(), ?errors, "list post rejected by validation");
            return ListPostResponse::failure(errors.join("; "));
        }

        info!(request = %request.summary(), "creating list post");
        let payload = request.to_payload();
        match self.api.create_list_post(&payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "list post creation failed");
                ListPostResponse::failure(e.to_string())
            }
        }
    }
}
