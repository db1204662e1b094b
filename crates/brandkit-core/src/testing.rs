use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use crate::auth::SESSION_COOKIE;
use crate::config::Config;
use crate::synonyms::Thesaurus;

/// A test application for integration testing.
///
/// Spins up a brandkit server on a random port with an in-memory SQLite
/// database.
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_dashboard_requires_login() {
///     let app = TestApp::new().await;
///     let res = app.client.get(&app.url("/dashboard"), None).await;
///     assert_eq!(res.status, 401);
/// }
/// ```
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: TestClient,
    pub db: DatabaseConnection,
    pub config: Config,
}

impl TestApp {
    /// Create a test app with no synonym dictionary.
    pub async fn new() -> Self {
        Self::with_thesaurus(Thesaurus::empty()).await
    }

    /// Create a test app backed by the given dictionary.
    pub async fn with_thesaurus(thesaurus: Thesaurus) -> Self {
        Self::with_parts(Config::for_tests(), thesaurus).await
    }

    /// Create a test app with a custom config and dictionary.
    pub async fn with_parts(config: Config, thesaurus: Thesaurus) -> Self {
        let app = crate::App::with_synonyms(config, Arc::new(thesaurus))
            .await
            .expect("Failed to create test app");

        let router = app.router();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestApp {
            addr,
            client: TestClient::new(),
            db: app.db,
            config: app.config,
        }
    }

    /// Get the full URL for a path on the test server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Insert a user directly into the database.
    pub async fn create_user(&self, username: &str, password: &str) -> i32 {
        crate::auth::create_user(
            &self.db,
            username,
            password,
            self.config.security.min_password_length,
        )
        .await
        .expect("Failed to create user")
        .id
    }

    /// Log in through `/login` and return the session token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let res = self
            .client
            .post_form(
                &self.url("/login"),
                &[("username", username), ("password", password)],
                None,
            )
            .await;

        assert_eq!(res.status, 200, "Login failed: {}", res.body);
        res.session_token().expect("Login response set no session cookie")
    }

    /// Create a user and log them in, returning the session token.
    pub async fn logged_in(&self, username: &str) -> String {
        let password = "correct-horse-battery";
        self.create_user(username, password).await;
        self.login(username, password).await
    }
}

/// A small HTTP client that sends the session cookie explicitly.
#[derive(Clone)]
pub struct TestClient {
    inner: reqwest::Client,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// Create a client that does not follow redirects.
    pub fn new() -> Self {
        TestClient {
            inner: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to build reqwest client"),
        }
    }

    fn with_session(
        builder: reqwest::RequestBuilder,
        session: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match session {
            Some(token) => builder.header(COOKIE, format!("{SESSION_COOKIE}={token}")),
            None => builder,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, url: &str, session: Option<&str>) -> TestResponse {
        let res = Self::with_session(self.inner.get(url), session)
            .send()
            .await
            .expect("GET request failed");
        TestResponse::from_response(res).await
    }

    /// Send a POST request with a url-encoded form body.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        session: Option<&str>,
    ) -> TestResponse {
        let res = Self::with_session(self.inner.post(url).form(form), session)
            .send()
            .await
            .expect("POST request failed");
        TestResponse::from_response(res).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, url: &str, session: Option<&str>) -> TestResponse {
        let res = Self::with_session(self.inner.delete(url), session)
            .send()
            .await
            .expect("DELETE request failed");
        TestResponse::from_response(res).await
    }
}

/// A simplified HTTP response for test assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub body: String,
    pub headers: HeaderMap,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let body = res.text().await.unwrap_or_default();
        TestResponse {
            status,
            body,
            headers,
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Failed to parse response as JSON")
    }

    /// Check if the response indicates success.
    pub fn is_success(&self) -> bool {
        self.json()["success"].as_bool().unwrap_or(false)
    }

    /// Get the data field from the response.
    pub fn data(&self) -> serde_json::Value {
        self.json()["data"].clone()
    }

    /// Get the error field from the response.
    pub fn error(&self) -> serde_json::Value {
        self.json()["error"].clone()
    }

    /// The session cookie value set by this response, if any.
    pub fn session_token(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|cookie| cookie.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.to_string())
    }
}
