use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use http::{Response as HttpResponse, StatusCode};
use smart_support::config::PageConfig;
use smart_support::form::{Submission, VerificationForm};
use smart_support::notify::{Navigator, Notifier, Toast, ToastVariant};
use smart_support::page::{DEFAULT_WELCOME, VerificationPage};
use smart_support::{Field, VerificationInput, VerifyError};
use smart_support_common::http_client::HttpClient;
use tokio::sync::{Mutex, Notify};

#[derive(Clone, Default)]
struct MockClient {
    // Queue of HTTP responses to pop for each send_http call
    queue: Arc<Mutex<VecDeque<HttpResponse<Vec<u8>>>>>,
    // Capture requests for assertions
    log: Arc<Mutex<Vec<http::Request<Vec<u8>>>>>,
    // When set, each call waits here before answering
    gate: Option<Arc<Notify>>,
}

impl MockClient {
    async fn push(&self, resp: HttpResponse<Vec<u8>>) {
        self.queue.lock().await.push_back(resp);
    }
    async fn take_log(&self) -> Vec<http::Request<Vec<u8>>> {
        let mut log = self.log.lock().await;
        std::mem::take(&mut *log)
    }
}

impl HttpClient for MockClient {
    type Error = std::convert::Infallible;

    fn send_http(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> impl core::future::Future<
        Output = core::result::Result<http::Response<Vec<u8>>, Self::Error>,
    > + Send {
        let log = self.log.clone();
        let queue = self.queue.clone();
        let gate = self.gate.clone();
        async move {
            log.lock().await.push(request);
            if let Some(gate) = gate {
                gate.notified().await;
            }
            Ok(queue.lock().await.pop_front().expect("no queued response"))
        }
    }
}

/// Transport that can never reach the backend
#[derive(Clone, Default)]
struct Unreachable;

impl HttpClient for Unreachable {
    type Error = std::io::Error;

    fn send_http(
        &self,
        _request: http::Request<Vec<u8>>,
    ) -> impl core::future::Future<
        Output = core::result::Result<http::Response<Vec<u8>>, Self::Error>,
    > + Send {
        async {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))
        }
    }
}

#[derive(Clone, Default)]
struct Recorder {
    toasts: Arc<std::sync::Mutex<Vec<Toast>>>,
    routes: Arc<std::sync::Mutex<Vec<String>>>,
}

impl Recorder {
    fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
    fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

impl Navigator for Recorder {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_owned());
    }
}

fn json(status: u16, body: serde_json::Value) -> HttpResponse<Vec<u8>> {
    HttpResponse::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(serde_json::to_vec(&body).unwrap())
        .unwrap()
}

fn page<C: HttpClient>(http: C, rec: &Recorder) -> VerificationPage<C, Recorder, Recorder> {
    let config = PageConfig::new()
        .base_url(url::Url::parse("http://backend.test/api/").unwrap())
        .build();
    VerificationPage::new(http, config, rec.clone(), rec.clone())
}

async fn fill(form: &VerificationForm, name: &str, contact: &str, email: &str) {
    form.set_value(Field::Name, name).await;
    form.set_value(Field::Contact, contact).await;
    form.set_value(Field::Email, email).await;
}

#[tokio::test(start_paused = true)]
async fn valid_input_posts_renamed_body_and_redirects() {
    let client = MockClient::default();
    client.push(json(200, serde_json::json!({}))).await;
    let rec = Recorder::default();
    let page = page(client.clone(), &rec);
    let form = page.form();
    fill(&form, "Jane Doe", "9876543210", "jane@example.com").await;

    let outcome = page.submit(&form).await.unwrap();
    let Submission::Accepted(redirect) = outcome else {
        panic!("expected acceptance, got {outcome:?}");
    };

    let log = client.take_log().await;
    assert_eq!(log.len(), 1);
    let req = &log[0];
    assert_eq!(req.method(), &http::Method::POST);
    assert_eq!(req.uri(), "http://backend.test/api/validate-users");
    assert_eq!(req.headers()[http::header::CONTENT_TYPE], "application/json");
    assert_eq!(
        std::str::from_utf8(req.body()).unwrap(),
        r#"{"name":"Jane Doe","email":"jane@example.com","phone_number":"9876543210"}"#
    );

    // no message from the backend: default welcome
    let toasts = rec.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Identity Verified");
    assert_eq!(toasts[0].description, DEFAULT_WELCOME);
    assert_eq!(toasts[0].variant, ToastVariant::Default);

    // fields cleared, flags down
    for field in Field::ALL {
        assert_eq!(form.value(field).await, "");
    }
    assert!(!page.is_submitting());
    assert!(!form.is_processing());

    // redirect waits the full 1.5s
    assert_eq!(redirect.route(), "/dashboard");
    assert_eq!(redirect.delay(), Duration::from_millis(1500));
    tokio::time::sleep(Duration::from_millis(1499)).await;
    assert!(rec.routes().is_empty());
    tokio::time::sleep(Duration::from_millis(2)).await;
    redirect.wait().await.unwrap();
    assert_eq!(rec.routes(), vec!["/dashboard".to_owned()]);
}

#[tokio::test(start_paused = true)]
async fn backend_message_replaces_default_welcome() {
    let client = MockClient::default();
    client
        .push(json(200, serde_json::json!({"message": "Welcome back, Jane"})))
        .await;
    let rec = Recorder::default();
    let page = page(client, &rec);
    let form = page.form();
    fill(&form, "Jane Doe", "+919876543210", "jane@example.com").await;

    let outcome = page.submit(&form).await.unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(rec.toasts()[0].description, "Welcome back, Jane");
}

#[tokio::test]
async fn detail_list_becomes_banner_and_values_survive() {
    let client = MockClient::default();
    client
        .push(json(422, serde_json::json!({"detail": ["name too short", "bad email"]})))
        .await;
    let rec = Recorder::default();
    let page = page(client, &rec);
    let form = page.form();
    fill(&form, "Jane Doe", "9876543210", "jane@example.com").await;

    let err = page.submit(&form).await.unwrap_err();
    assert!(matches!(
        err,
        VerifyError::Rejected { status, .. } if status == StatusCode::UNPROCESSABLE_ENTITY
    ));
    assert_eq!(err.to_string(), "name too short, bad email");
    assert_eq!(
        form.submit_error().await.as_deref(),
        Some("name too short, bad email")
    );
    assert_eq!(form.value(Field::Name).await, "Jane Doe");
    assert_eq!(form.value(Field::Contact).await, "9876543210");
    assert_eq!(form.value(Field::Email).await, "jane@example.com");

    let toasts = rec.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Verification Failed");
    assert_eq!(toasts[0].variant, ToastVariant::Destructive);
    assert!(rec.routes().is_empty());
    assert!(!page.is_submitting());
    assert!(!form.is_processing());
}

#[tokio::test]
async fn missing_detail_falls_back_to_generic_message() {
    let client = MockClient::default();
    client
        .push(
            HttpResponse::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(b"upstream exploded".to_vec())
                .unwrap(),
        )
        .await;
    let rec = Recorder::default();
    let page = page(client, &rec);
    let form = page.form();
    fill(&form, "Jane Doe", "9876543210", "jane@example.com").await;

    let err = page.submit(&form).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(
        form.submit_error().await.as_deref(),
        Some("Verification failed. Please try again.")
    );
}

#[tokio::test]
async fn unreachable_backend_is_reported_and_recoverable() {
    let rec = Recorder::default();
    let page = page(Unreachable, &rec);
    let form = page.form();
    fill(&form, "Jane Doe", "9876543210", "jane@example.com").await;

    let err = page.submit(&form).await.unwrap_err();
    assert!(matches!(err, VerifyError::Transport(_)));
    let banner = form.submit_error().await.unwrap();
    assert!(banner.contains("connection refused"), "{banner}");
    assert_eq!(form.value(Field::Email).await, "jane@example.com");
    assert!(!form.is_processing());
    assert!(form.set_value(Field::Email, "jane@example.org").await);
}

#[tokio::test]
async fn invalid_fields_never_hit_the_network() {
    let client = MockClient::default();
    let rec = Recorder::default();
    let page = page(client.clone(), &rec);
    let form = page.form();
    fill(&form, "Jane 2", "5876543210", "jane.example.com").await;

    let outcome = page.submit(&form).await.unwrap();
    let Submission::Invalid(errors) = outcome else {
        panic!("expected validation failure, got {outcome:?}");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(
        form.field_error(Field::Name).await.as_deref(),
        Some("Name can only contain letters and spaces")
    );
    assert_eq!(
        form.field_error(Field::Contact).await.as_deref(),
        Some("Please enter a valid Indian mobile number (10 digits or +91 prefixed)")
    );
    assert_eq!(
        form.field_error(Field::Email).await.as_deref(),
        Some("Please enter a valid email address")
    );
    assert!(client.take_log().await.is_empty());
    assert!(rec.toasts().is_empty());
    assert_eq!(form.submit_error().await, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn resubmitting_while_in_flight_does_nothing() {
    let gate = Arc::new(Notify::new());
    let client = MockClient {
        gate: Some(gate.clone()),
        ..Default::default()
    };
    client.push(json(200, serde_json::json!({}))).await;
    let rec = Recorder::default();
    let page = Arc::new(page(client.clone(), &rec));
    let form = page.form();
    // second skin, same page
    let other_form = page.form();
    fill(&form, "Jane Doe", "9876543210", "jane@example.com").await;
    fill(&other_form, "John Roe", "9123456789", "john@example.com").await;

    let first = {
        let page = page.clone();
        let form = form.clone();
        tokio::spawn(async move { page.submit(&form).await })
    };

    // wait until the request is actually outstanding
    while client.log.lock().await.is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(page.is_submitting());
    assert!(form.is_processing());
    assert!(other_form.is_processing());
    assert_eq!(form.submit_label(), "Verifying...");

    let again = page.submit(&form).await.unwrap();
    assert!(matches!(again, Submission::Ignored));
    let sibling = page.submit(&other_form).await.unwrap();
    assert!(matches!(sibling, Submission::Ignored));

    gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    let Submission::Accepted(redirect) = outcome else {
        panic!("expected acceptance");
    };
    redirect.cancel();

    assert_eq!(client.take_log().await.len(), 1);
    assert!(!page.is_submitting());
    assert!(!other_form.is_processing());
    assert_eq!(other_form.value(Field::Name).await, "John Roe");
}

#[tokio::test(start_paused = true)]
async fn callback_can_be_called_directly() {
    let client = MockClient::default();
    client.push(json(201, serde_json::json!({"message": "ok"}))).await;
    let rec = Recorder::default();
    let page = page(client, &rec);

    let input = VerificationInput::new("Jane Doe", "9876543210", "jane@example.com").unwrap();
    let redirect = page.handle_verify(input).await.unwrap();
    assert!(!page.is_submitting());
    redirect.wait().await.unwrap();
    assert_eq!(rec.routes(), vec!["/dashboard".to_owned()]);
}
