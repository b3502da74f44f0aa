use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::json;

use super::*;

const TOKEN_BODY: &str = r#"{"access_token":"t","token_type":"bearer"}"#;

/// Records every request and replays canned responses in order.
#[derive(Default)]
struct FakeTransport {
    requests: RefCell<Vec<HttpRequest>>,
    responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
}

impl FakeTransport {
    fn replying(status: u16, body: &str) -> Self {
        let fake = Self::default();
        let response = HttpResponse {
            status,
            body: body.to_owned(),
        };
        fake.responses.borrow_mut().push_back(Ok(response));
        fake
    }

    fn failing(err: ApiError) -> Self {
        let fake = Self::default();
        fake.responses.borrow_mut().push_back(Err(err));
        fake
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_owned())))
    }
}

fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
    let config = ClientConfig::with_base_url("http://backend.test");
    ApiClient::new(config, transport)
}

fn task_json(id: i64, description: &str, completed: bool) -> String {
    json!({
        "id": id,
        "description": description,
        "completed": completed,
        "user_id": 1
    })
    .to_string()
}

fn credentials_json() -> Option<Value> {
    Some(json!({"email": "a@b.com", "password": "pw"}))
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn task_endpoint_formats_expected_path() {
    assert_eq!(task_endpoint(42), "/tasks/42");
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_posts_credentials_once() {
    let api = client(FakeTransport::replying(200, TOKEN_BODY));

    api.login("a@b.com", "pw").await.unwrap();

    let requests = api.transport.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "http://backend.test/login");
    assert_eq!(requests[0].body, credentials_json());
    assert_eq!(requests[0].bearer, None);
}

#[tokio::test]
async fn login_returns_success_body_verbatim() {
    let api = client(FakeTransport::replying(200, TOKEN_BODY));
    let body = api.login("a@b.com", "pw").await.unwrap();
    assert_eq!(body, json!({"access_token": "t", "token_type": "bearer"}));
}

#[tokio::test]
async fn login_returns_error_body_without_inspecting_status() {
    let api = client(FakeTransport::replying(401, r#"{"detail":"Invalid credentials"}"#));
    let body = api.login("a@b.com", "wrong").await.unwrap();
    assert_eq!(body, json!({"detail": "Invalid credentials"}));
}

#[tokio::test]
async fn login_non_json_body_is_decode_error() {
    let api = client(FakeTransport::replying(502, "<html>Bad Gateway</html>"));
    let err = api.login("a@b.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn login_network_failure_propagates() {
    let refused = ApiError::Network("connection refused".to_owned());
    let api = client(FakeTransport::failing(refused.clone()));
    let err = api.login("a@b.com", "pw").await.unwrap_err();
    assert_eq!(err, refused);
    assert_eq!(api.transport.requests.borrow().len(), 1);
}

// =============================================================
// signup
// =============================================================

#[tokio::test]
async fn signup_posts_credentials_and_returns_body() {
    let api = client(FakeTransport::replying(400, r#"{"detail":"Email already registered"}"#));

    let body = api.signup("a@b.com", "pw").await.unwrap();

    assert_eq!(body, json!({"detail": "Email already registered"}));
    let requests = api.transport.requests.borrow();
    assert_eq!(requests[0].url, "http://backend.test/signup");
    assert_eq!(requests[0].body, credentials_json());
}

// =============================================================
// tasks
// =============================================================

#[tokio::test]
async fn list_tasks_sends_bearer_and_decodes() {
    let body = format!("[{}]", task_json(1, "first", false));
    let api = client(FakeTransport::replying(200, &body));

    let tasks = api.list_tasks("tok").await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "first");
    let requests = api.transport.requests.borrow();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, "http://backend.test/tasks");
    assert_eq!(requests[0].bearer.as_deref(), Some("tok"));
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn list_tasks_unauthorized_is_status_error() {
    let api = client(FakeTransport::replying(401, r#"{"detail":"Token verification failed"}"#));
    let err = api.list_tasks("bad").await.unwrap_err();
    let expected = ApiError::Status {
        status: 401,
        detail: Some("Token verification failed".to_owned()),
    };
    assert_eq!(err, expected);
}

#[tokio::test]
async fn create_task_posts_body() {
    let api = client(FakeTransport::replying(200, &task_json(5, "new", false)));

    let task = api.create_task("tok", &NewTask::new("new")).await.unwrap();

    assert_eq!(task.id, 5);
    let requests = api.transport.requests.borrow();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "http://backend.test/tasks");
    let expected = json!({"description": "new", "completed": false});
    assert_eq!(requests[0].body, Some(expected));
}

#[tokio::test]
async fn update_task_puts_to_task_path() {
    let api = client(FakeTransport::replying(200, &task_json(5, "done", true)));
    let update = NewTask {
        description: "done".to_owned(),
        completed: true,
    };

    let task = api.update_task("tok", 5, &update).await.unwrap();

    assert!(task.completed);
    let requests = api.transport.requests.borrow();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].url, "http://backend.test/tasks/5");
}

#[tokio::test]
async fn delete_task_not_found_carries_detail() {
    let api = client(FakeTransport::replying(404, r#"{"detail":"Task not found"}"#));
    let err = api.delete_task("tok", 9).await.unwrap_err();
    let expected = ApiError::Status {
        status: 404,
        detail: Some("Task not found".to_owned()),
    };
    assert_eq!(err, expected);
    assert_eq!(api.transport.requests.borrow()[0].method, Method::Delete);
}

#[tokio::test]
async fn delete_task_success_ignores_body() {
    let api = client(FakeTransport::replying(200, r#"{"message":"Task deleted"}"#));
    assert_eq!(api.delete_task("tok", 9).await, Ok(()));
}

#[tokio::test]
async fn status_error_without_json_body_has_no_detail() {
    let api = client(FakeTransport::replying(500, "Internal Server Error"));
    let err = api.list_tasks("tok").await.unwrap_err();
    let expected = ApiError::Status {
        status: 500,
        detail: None,
    };
    assert_eq!(err, expected);
}

#[tokio::test]
async fn task_success_with_wrong_shape_is_decode_error() {
    let api = client(FakeTransport::replying(200, r#"{"unexpected":true}"#));
    let err = api.list_tasks("tok").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}
