use crate::api::oauth::models::TokenResponse;
use crate::config::Settings;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Test fixture wrapping the full application router.
///
/// The fixture owns the [`AppState`] the router was built from, so tests can
/// reach into the token service directly (to revoke a token, or inspect the
/// registry) and then observe the effect over HTTP.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///     let token = fixture.issue_token("test_client", "test_secret").await;
///
///     let response = fixture.get_with_token("/query/health", &token).await;
///     response.assert_ok();
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// State shared with the router
    pub state: AppState,
}

impl TestFixture {
    /// Creates a fixture with the default test settings (three registered
    /// clients, a one hour TTL and a random signing secret).
    pub async fn new() -> Self {
        Self::with_settings(Settings::for_test()).await
    }

    pub async fn with_settings(settings: Settings) -> Self {
        Self::from_state(AppState::for_testing(&settings)).await
    }

    /// Creates a fixture around an existing state. The router is built from
    /// `state.settings`, so the registered client gate follows it.
    pub async fn from_state(state: AppState) -> Self {
        Self::setup_logger(LevelFilter::Debug);
        let app = create_app(state.clone()).await;
        Self { app, state }
    }

    /// Initializes the test logger with customized settings.
    ///
    /// Called by every constructor with `Debug`; only the first call in a test
    /// binary takes effect.
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    pub fn request_builder(&self, method: Method, uri: impl AsRef<str>) -> http::request::Builder {
        Request::builder().method(method).uri(uri.as_ref())
    }

    /// Sends a GET request without credentials.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        self.get_with_headers(uri, &[]).await
    }

    /// Sends a GET request with `Authorization: Bearer <token>`.
    pub async fn get_with_token(&self, uri: impl AsRef<str>, token: &str) -> TestResponse {
        let bearer = format!("Bearer {}", token);
        self.get_with_headers(uri, &[(AUTHORIZATION.as_str(), bearer.as_str())])
            .await
    }

    pub async fn get_with_headers(
        &self,
        uri: impl AsRef<str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = self.request_builder(Method::GET, uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a form-encoded POST request, the way OAuth clients call the
    /// token endpoints.
    pub async fn post_form(&self, uri: impl AsRef<str>, form: &[(&str, &str)]) -> TestResponse {
        self.post_form_with_headers(uri, form, &[]).await
    }

    pub async fn post_form_with_headers(
        &self,
        uri: impl AsRef<str>,
        form: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body = serde_urlencoded::to_string(form).expect("Failed to encode form body");
        let mut builder = self
            .request_builder(Method::POST, uri)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        // Add custom headers
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to empty object if parsing fails or empty body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse {
            status,
            headers,
            json,
        }
    }

    /// Runs the client credentials exchange and returns the access token.
    ///
    /// # Panics
    ///
    /// Panics if the exchange does not succeed.
    pub async fn issue_token(&self, client_id: &str, client_secret: &str) -> String {
        let response = self
            .post_form(
                "/oauth/token",
                &[
                    ("grant_type", "client_credentials"),
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                ],
            )
            .await;
        response.assert_ok();
        response.json_as::<TokenResponse>().access_token
    }

    /// Number of tokens the registry currently tracks
    pub fn tracked_tokens(&self) -> u64 {
        self.state.tokens.registry().tracked_count()
    }
}

/// Response from a test request that provides convenient access to status and JSON body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Converts the response body to the specified type.
    ///
    /// # Panics
    ///
    /// Panics if deserialization fails.
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
