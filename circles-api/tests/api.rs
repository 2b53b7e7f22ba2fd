use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use circles_api::{router, USER_HEADER};
use circles_app::domain::{NewPost, Post};
use circles_app::infrastructure::StoreBackend;
use circles_app::AppContext;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    ctx: AppContext,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let ctx = AppContext::new_in_memory();
        let router = router(ctx.clone());
        Self { ctx, router }
    }

    fn seed_post(&self, circle: &str, votes: i32) -> Uuid {
        let StoreBackend::Memory(store) = self.ctx.store() else {
            panic!("test app must use the memory store");
        };
        let mut post = Post::new(
            NewPost {
                circle: circle.to_string(),
                title: format!("{circle} post with {votes} votes"),
                content: None,
                link: Some("https://example.com".to_string()),
            },
            None,
        );
        post.number_of_votes = votes;
        let id = post.id;
        store.insert_post(post);
        id
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user {
            builder = builder.header(USER_HEADER, user_id.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn click(&self, post_id: Uuid, user: Uuid, arrow: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            &format!("/api/posts/{post_id}/click"),
            Some(user),
            Some(json!({ "arrow": arrow })),
        )
        .await
    }

    /// Two upvotes and a downvote from three different users.
    async fn seed_voted_post(&self) -> Uuid {
        let post_id = self.seed_post("rust", 0);
        self.click(post_id, Uuid::new_v4(), "up").await;
        self.click(post_id, Uuid::new_v4(), "up").await;
        self.click(post_id, Uuid::new_v4(), "down").await;
        post_id
    }

    async fn count(&self, post_id: Uuid) -> i64 {
        let (_, post) = self
            .send(Method::GET, &format!("/api/posts/{post_id}"), None, None)
            .await;
        post["number_of_votes"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn upvote_then_toggle_off() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 10);
    let user = Uuid::new_v4();

    let (status, body) = app.click(post_id, user, "up").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "confirmed_count": 11, "confirmed_state": "up" }));

    let (_, body) = app.click(post_id, user, "up").await;
    assert_eq!(body, json!({ "confirmed_count": 10, "confirmed_state": "neutral" }));
    assert_eq!(app.count(post_id).await, 10);
}

#[tokio::test]
async fn cast_switches_down_to_up() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 6);
    let user = Uuid::new_v4();
    app.click(post_id, user, "down").await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/posts/{post_id}/vote"),
            Some(user),
            Some(json!({ "previous": "down", "requested": "up" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confirmed_count"], 7);

    let (_, vote) = app
        .send(Method::GET, &format!("/api/posts/{post_id}/vote"), Some(user), None)
        .await;
    assert_eq!(vote, json!({ "vote_state": "up" }));
}

#[tokio::test]
async fn cast_with_wrong_previous_is_conflict() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 0);
    let user = Uuid::new_v4();

    for _ in 0..3 {
        let (status, body) = app
            .send(
                Method::POST,
                &format!("/api/posts/{post_id}/vote"),
                Some(user),
                Some(json!({ "previous": "down", "requested": "up" })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().starts_with("Stale vote"));
    }

    assert_eq!(app.count(post_id).await, 0);
    let (_, audit) = app
        .send(Method::GET, &format!("/api/posts/{post_id}/audit"), None, None)
        .await;
    assert_eq!(audit, json!({ "item_id": post_id, "stored_count": 0, "recorded_sum": 0 }));
}

#[tokio::test]
async fn neutral_cast_leaves_no_record() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 2);
    let user = Uuid::new_v4();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/posts/{post_id}/vote"),
            Some(user),
            Some(json!({ "previous": "neutral", "requested": "neutral" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "confirmed_count": 2, "confirmed_state": "neutral" }));
    let StoreBackend::Memory(store) = app.ctx.store() else {
        panic!("test app must use the memory store");
    };
    assert!(store.record(user, post_id).is_none());
}

#[tokio::test]
async fn anonymous_vote_is_rejected() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 3);

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/posts/{post_id}/click"),
            None,
            Some(json!({ "arrow": "up" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].as_str().unwrap().contains("signed in"));
    assert_eq!(app.count(post_id).await, 3);
}

#[tokio::test]
async fn anonymous_vote_status_is_neutral() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 3);

    let (status, body) = app
        .send(Method::GET, &format!("/api/posts/{post_id}/vote"), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "vote_state": "neutral" }));
}

#[tokio::test]
async fn malformed_user_header_is_bad_request() {
    let app = TestApp::new();
    let post_id = app.seed_post("rust", 0);
    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/posts/{post_id}/vote"))
        .header(USER_HEADER, "not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voting_on_missing_post_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.click(Uuid::new_v4(), Uuid::new_v4(), "down").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_post_starts_at_zero() {
    let app = TestApp::new();
    let payload = json!({ "circle": "rust", "title": "Show us your lifetimes" });

    let (status, _) = app
        .send(Method::POST, "/api/posts", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, post) = app
        .send(Method::POST, "/api/posts", Some(Uuid::new_v4()), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["number_of_votes"], 0);
    assert_eq!(post["circle"], "rust");
}

#[tokio::test]
async fn listing_sorts_and_filters() {
    let app = TestApp::new();
    app.seed_post("rust", 1);
    app.seed_post("rust", 9);
    app.seed_post("cooking", 50);

    let (status, posts) = app
        .send(Method::GET, "/api/posts?sort=top&circle=rust", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let counts: Vec<i64> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["number_of_votes"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![9, 1]);

    let (status, _) = app.send(Method::GET, "/api/posts?sort=best", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn audit_reports_consistent_aggregate() {
    let app = TestApp::new();
    let post_id = app.seed_voted_post().await;

    let (status, audit) = app
        .send(Method::GET, &format!("/api/posts/{post_id}/audit"), None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(audit["stored_count"], 1);
    assert_eq!(audit["recorded_sum"], 1);
}
