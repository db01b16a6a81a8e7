//! Flow-level tests against a scripted collaborator.
//!
//! The collaborator records every call it receives so the tests can
//! verify not just the final outcome but which network calls were (and
//! were not) issued.

use std::sync::Mutex;

use async_trait::async_trait;
use posts_client::{
    ApiError, ApiResult, CommunityPostData, CommunityPostOutcome, CommunityPostPayload,
    CommunityPostRequest, CommunityPostResponse, FlowStage, ListCreateRequest, ListPostData,
    ListPostPayload, ListPostRequest, ListPostResponse, ListRecord, PostFlow, ReviewPostData,
    ReviewPostRequest, ReviewPostResponse, SpotListMembership, SpotlistApi,
};

#[derive(Debug, Default)]
struct Calls {
    create_list: Vec<(String, bool)>,
    attach: Vec<(i64, i64)>,
    create_community_post: usize,
    create_review_post: usize,
    list_post_kinds: Vec<String>,
}

/// Scripted collaborator: happy by default, individual operations can be
/// told to fail with a given message.
struct RecordingApi {
    calls: Mutex<Calls>,
    list_id: i64,
    fail_create_list: Option<String>,
    /// Zero-based index of the attach call that should fail.
    fail_attach_at: Option<(usize, String)>,
    fail_create_post: Option<String>,
    fail_create_review: Option<String>,
    fail_create_list_post: Option<String>,
    post_envelope: CommunityPostResponse,
}

impl RecordingApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Calls::default()),
            list_id: 900,
            fail_create_list: None,
            fail_attach_at: None,
            fail_create_post: None,
            fail_create_review: None,
            fail_create_list_post: None,
            post_envelope: CommunityPostResponse {
                success: true,
                message: Some("created".into()),
                error: None,
                list_id: None,
                data: Some(CommunityPostData {
                    post_id: 5001,
                    post_type: "community".into(),
                    created_date: "2024-06-01T12:00:00Z".parse().unwrap(),
                    spots_count: 3,
                }),
            },
        }
    }
}

fn server_error(message: &str) -> ApiError {
    ApiError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl SpotlistApi for RecordingApi {
    async fn create_list(&self, req: &ListCreateRequest) -> ApiResult<ListRecord> {
        self.calls
            .lock()
            .unwrap()
            .create_list
            .push((req.list_name.clone(), req.is_public));
        if let Some(message) = &self.fail_create_list {
            return Err(server_error(message));
        }
        Ok(ListRecord {
            list_id: self.list_id,
            list_name: req.list_name.clone(),
            is_public: req.is_public,
        })
    }

    async fn add_spot_to_list(
        &self,
        list_id: i64,
        membership: &SpotListMembership,
    ) -> ApiResult<()> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.attach.len();
        calls.attach.push((list_id, membership.spot_id));
        if let Some((fail_at, message)) = &self.fail_attach_at {
            if index == *fail_at {
                return Err(server_error(message));
            }
        }
        Ok(())
    }

    async fn create_community_post(
        &self,
        _payload: &CommunityPostPayload,
    ) -> ApiResult<CommunityPostResponse> {
        self.calls.lock().unwrap().create_community_post += 1;
        if let Some(message) = &self.fail_create_post {
            return Err(server_error(message));
        }
        Ok(self.post_envelope.clone())
    }

    async fn create_review_post(
        &self,
        req: &ReviewPostRequest,
    ) -> ApiResult<ReviewPostResponse> {
        self.calls.lock().unwrap().create_review_post += 1;
        if let Some(message) = &self.fail_create_review {
            return Err(server_error(message));
        }
        Ok(ReviewPostResponse {
            success: true,
            message: None,
            error: None,
            data: Some(ReviewPostData {
                post_id: 7001,
                post_type: "review".into(),
                created_date: "2024-06-02T09:00:00Z".parse().unwrap(),
                rating: req.rating,
            }),
        })
    }

    async fn create_list_post(&self, payload: &ListPostPayload) -> ApiResult<ListPostResponse> {
        self.calls
            .lock()
            .unwrap()
            .list_post_kinds
            .push(payload.kind.to_string());
        if let Some(message) = &self.fail_create_list_post {
            return Err(server_error(message));
        }
        Ok(ListPostResponse {
            success: true,
            message: None,
            error: None,
            data: Some(ListPostData {
                post_id: 8001,
                post_type: "list".into(),
                created_date: "2024-06-03T10:00:00Z".parse().unwrap(),
                spots_count: 5,
            }),
        })
    }
}

fn beaches_request() -> CommunityPostRequest {
    CommunityPostRequest {
        title: "Best Beaches".into(),
        description: None,
        user_id: 42,
        spot_ids: vec![10, 11, 12],
    }
}

#[tokio::test]
async fn community_post_happy_path_threads_ids_through() {
    let flow = PostFlow::new(RecordingApi::new());

    let outcome = flow.create_community_post(&beaches_request()).await;
    assert!(outcome.is_posted());
    assert!(!outcome.is_partial());

    let response = outcome.into_response();
    assert!(response.success);
    assert_eq!(response.list_id, Some(900));
    assert_eq!(response.data.unwrap().post_id, 5001);

    let calls = flow.api().calls.lock().unwrap();
    assert_eq!(calls.create_list, vec![("Best Beaches".to_string(), false)]);
    assert_eq!(calls.attach, vec![(900, 10), (900, 11), (900, 12)]);
    assert_eq!(calls.create_community_post, 1);
}

#[tokio::test]
async fn attach_failure_stops_the_protocol_before_post_creation() {
    let mut api = RecordingApi::new();
    api.fail_attach_at = Some((1, "network timeout".into()));
    let flow = PostFlow::new(api);

    let outcome = flow.create_community_post(&beaches_request()).await;
    match &outcome {
        CommunityPostOutcome::Failed {
            stage,
            partial,
            list_id,
            error,
        } => {
            assert_eq!(*stage, FlowStage::Spots);
            assert!(*partial);
            assert_eq!(*list_id, Some(900));
            assert!(error.contains("network timeout"));
        }
        other => panic!("expected a spots-stage failure, got {other:?}"),
    }

    {
        let calls = flow.api().calls.lock().unwrap();
        assert_eq!(calls.attach, vec![(900, 10), (900, 11)]);
        assert_eq!(calls.create_community_post, 0);
    }

    let response = outcome.into_response();
    assert!(!response.success);
    assert_eq!(response.list_id, Some(900));
    assert!(response.error.unwrap().contains("network timeout"));
}

#[tokio::test]
async fn list_creation_failure_leaves_nothing_behind() {
    let mut api = RecordingApi::new();
    api.fail_create_list = Some("lists are down".into());
    let flow = PostFlow::new(api);

    let outcome = flow.create_community_post(&beaches_request()).await;
    match &outcome {
        CommunityPostOutcome::Failed {
            stage,
            partial,
            list_id,
            error,
        } => {
            assert_eq!(*stage, FlowStage::List);
            assert!(!*partial);
            assert_eq!(*list_id, None);
            assert!(error.contains("lists are down"));
        }
        other => panic!("expected a list-stage failure, got {other:?}"),
    }

    let calls = flow.api().calls.lock().unwrap();
    assert!(calls.attach.is_empty());
    assert_eq!(calls.create_community_post, 0);
}

#[tokio::test]
async fn post_creation_failure_reports_the_orphaned_list() {
    let mut api = RecordingApi::new();
    api.fail_create_post = Some("service unavailable".into());
    let flow = PostFlow::new(api);

    let outcome = flow.create_community_post(&beaches_request()).await;
    match &outcome {
        CommunityPostOutcome::Failed {
            stage,
            partial,
            list_id,
            error,
        } => {
            assert_eq!(*stage, FlowStage::Post);
            assert!(*partial);
            assert_eq!(*list_id, Some(900));
            assert!(error.contains("service unavailable"));
        }
        other => panic!("expected a post-stage failure, got {other:?}"),
    }

    let calls = flow.api().calls.lock().unwrap();
    assert_eq!(calls.attach.len(), 3);
    assert_eq!(calls.create_community_post, 1);
}

#[tokio::test]
async fn unsuccessful_post_envelope_is_a_post_stage_failure() {
    let mut api = RecordingApi::new();
    api.post_envelope = CommunityPostResponse::failure("quota exceeded");
    let flow = PostFlow::new(api);

    let outcome = flow.create_community_post(&beaches_request()).await;
    match &outcome {
        CommunityPostOutcome::Failed {
            stage,
            partial,
            list_id,
            error,
        } => {
            assert_eq!(*stage, FlowStage::Post);
            assert!(*partial);
            assert_eq!(*list_id, Some(900));
            assert_eq!(error, "quota exceeded");
        }
        other => panic!("expected a post-stage failure, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_request_makes_no_network_calls() {
    let flow = PostFlow::new(RecordingApi::new());

    let request = CommunityPostRequest {
        title: "   ".into(),
        description: None,
        user_id: 42,
        spot_ids: vec![5, 5, 7],
    };
    let outcome = flow.create_community_post(&request).await;
    match &outcome {
        CommunityPostOutcome::Rejected { errors } => {
            assert!(errors.contains(&"title must not be empty".to_string()));
            assert!(errors.contains(&"spot ids must be unique".to_string()));
        }
        other => panic!("expected a rejection, got {other:?}"),
    }

    let calls = flow.api().calls.lock().unwrap();
    assert!(calls.create_list.is_empty());
    assert!(calls.attach.is_empty());
    assert_eq!(calls.create_community_post, 0);
}

#[tokio::test]
async fn review_post_happy_path() {
    let flow = PostFlow::new(RecordingApi::new());

    let request = ReviewPostRequest::from_form("Great sunset spot", 42, 10, 4.5).unwrap();
    let response = flow.create_review_post(&request).await;
    assert!(response.success);

    let data = response.data.unwrap();
    assert_eq!(data.post_id, 7001);
    assert_eq!(data.rating_stars(), 5);
    assert_eq!(data.sentiment(), "Positiva");

    assert_eq!(flow.api().calls.lock().unwrap().create_review_post, 1);
}

#[tokio::test]
async fn invalid_review_makes_no_network_call() {
    let flow = PostFlow::new(RecordingApi::new());

    // Constructed directly, bypassing the fail-fast form path.
    let request = ReviewPostRequest {
        description: "d".repeat(501),
        user_id: 0,
        spot_id: 10,
        rating: 6.0,
    };
    let response = flow.create_review_post(&request).await;
    assert!(!response.success);

    let error = response.error.unwrap();
    assert!(error.contains("description must be 500 characters or fewer"));
    assert!(error.contains("user id must be a positive id"));
    assert!(error.contains("rating must be between 1.0 and 5.0"));

    assert_eq!(flow.api().calls.lock().unwrap().create_review_post, 0);
}

#[tokio::test]
async fn review_transport_failure_becomes_an_envelope() {
    let mut api = RecordingApi::new();
    api.fail_create_review = Some("connection reset".into());
    let flow = PostFlow::new(api);

    let request = ReviewPostRequest::from_form("fine", 1, 2, 3.0).unwrap();
    let response = flow.create_review_post(&request).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("connection reset"));
    assert!(response.data.is_none());
}

#[tokio::test]
async fn list_post_sends_the_type_discriminator() {
    let flow = PostFlow::new(RecordingApi::new());

    let request = ListPostRequest {
        title: "Coffee crawl".into(),
        description: Some("Five stops downtown".into()),
        user_id: 42,
        list_id: 31,
    };
    let response = flow.create_list_post(&request).await;
    assert!(response.success);
    assert_eq!(response.data.unwrap().post_id, 8001);

    let calls = flow.api().calls.lock().unwrap();
    assert_eq!(calls.list_post_kinds, vec!["list".to_string()]);
}

#[tokio::test]
async fn invalid_list_post_makes_no_network_call() {
    let flow = PostFlow::new(RecordingApi::new());

    let request = ListPostRequest {
        title: "Coffee crawl".into(),
        description: None,
        user_id: 42,
        list_id: 0,
    };
    let response = flow.create_list_post(&request).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("list id must be a positive id"));
    assert!(flow.api().calls.lock().unwrap().list_post_kinds.is_empty());
}

#[tokio::test]
async fn list_post_transport_failure_becomes_an_envelope() {
    let mut api = RecordingApi::new();
    api.fail_create_list_post = Some("gateway timeout".into());
    let flow = PostFlow::new(api);

    let request = ListPostRequest {
        title: "Coffee crawl".into(),
        description: None,
        user_id: 42,
        list_id: 31,
    };
    let response = flow.create_list_post(&request).await;
    assert!(!response.success);
    assert!(response.error.unwrap().contains("gateway timeout"));
}
