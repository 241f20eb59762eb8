use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tg_flickr::{FlickrError, Photo, PhotoSearch};
use tg_web::{AppState, Environment, Gallery, Slot, Topic, router};
use tower::ServiceExt;

/// Build `n` photos whose titles start with `prefix`.
pub fn photos(prefix: &str, n: usize) -> Vec<Photo> {
    (0..n)
        .map(|i| Photo {
            id: format!("{}-{i}", prefix.replace(' ', "-")),
            owner: "12345678@N00".to_string(),
            secret: format!("s{i}"),
            server: "65535".to_string(),
            farm: 66,
            title: format!("{prefix} {i}"),
        })
        .collect()
}

#[derive(Default)]
struct Script {
    results: HashMap<String, Vec<Photo>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
}

/// Photo source answering from a script and recording every query.
///
/// Unscripted queries return three photos titled `"{query} {i}"`.
#[derive(Default)]
pub struct MockPhotoSource {
    script: Mutex<Script>,
    calls: Mutex<Vec<String>>,
}

impl MockPhotoSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, query: &str, photos: Vec<Photo>) {
        let mut script = self.script.lock().unwrap();
        script.failing.remove(query);
        script.results.insert(query.to_string(), photos);
    }

    pub fn fail(&self, query: &str) {
        self.script.lock().unwrap().failing.insert(query.to_string());
    }

    pub fn delay(&self, query: &str, delay: Duration) {
        self.script
            .lock()
            .unwrap()
            .delays
            .insert(query.to_string(), delay);
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, query: &str) -> usize {
        self.calls().iter().filter(|q| *q == query).count()
    }
}

#[async_trait]
impl PhotoSearch for MockPhotoSource {
    async fn search(&self, text: &str) -> Result<Vec<Photo>, FlickrError> {
        self.calls.lock().unwrap().push(text.to_string());

        let (delay, failing, result) = {
            let script = self.script.lock().unwrap();
            (
                script.delays.get(text).copied(),
                script.failing.contains(text),
                script.results.get(text).cloned(),
            )
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if failing {
            return Err(FlickrError::Malformed(format!("scripted failure for {text}")));
        }

        Ok(result.unwrap_or_else(|| photos(text, 3)))
    }
}

/// Application state backed by `source`.
pub fn test_state(source: Arc<MockPhotoSource>) -> AppState {
    AppState::with_source(source, Environment::Development)
}

/// Poll a fixed topic's slot until it leaves `Loading`, panicking after two seconds.
pub async fn wait_until_settled(gallery: &Gallery, topic: Topic) -> Slot {
    for _ in 0..200 {
        let slot = gallery.slot(topic).await;
        if !slot.is_loading() {
            return slot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("slot {topic} still loading");
}

/// Poll the results for `text` until they leave `Loading`, panicking after two seconds.
pub async fn wait_for_search(gallery: &Gallery, text: &str) -> Slot {
    for _ in 0..200 {
        let slot = gallery.search_slot(text).await;
        if !slot.is_loading() {
            return slot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("search {text:?} still loading");
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Client over the full application router.
    pub fn for_state(state: AppState) -> Self {
        Self::new(router::router().with_state(state))
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: axum::http::HeaderMap,
}

impl TestResponse {
    /// Get response body as string
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|value| value.to_str().ok())
    }
}
