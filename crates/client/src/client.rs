//! Typed API client
//!
//! One method per backend operation, all funneled through a single generic
//! dispatch path: serialize the optional JSON body, attach default and
//! bearer headers, fire interceptors before dispatch and after receipt,
//! then branch on the status. 2xx decodes the declared success shape,
//! anything else decodes the backend's typed error body.
//!
//! # Architecture
//!
//! - Uses the transport [`HttpClient`] (no direct reqwest)
//! - Bearer token captured from the login operation
//! - No automatic retry or recovery; each request is one attempt
//! - Concurrent requests are independent: no ordering, batching, or
//!   cancellation is imposed across them

use std::sync::Arc;
use std::time::Instant;

use cartage_domain::constants::{BEARER_PREFIX, ROUTE_DOCS, ROUTE_LOGIN};
use cartage_domain::types::{
    CreateOrganizationRequest, CreateUldInventoryRequest, CreateUserRequest, LoginRequest,
    LoginResponse, Organization, UldInventory, UpdateOrganizationRequest, User,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::auth::{AccessTokenProvider, TokenStore};
use crate::config::ApiConfig;
use crate::errors::{ApiError, ErrorBody};
use crate::http::HttpClient;
use crate::interceptor::{Interceptor, RequestInfo};

/// Successful API response: the server's HTTP status plus the decoded data.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T> {
    pub status: StatusCode,
    pub data: T,
}

/// Whether an operation attaches the bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credential {
    Anonymous,
    Bearer,
}

/// API client for the Cartage backend.
///
/// Explicitly constructed and explicitly passed; safe to share one instance
/// across all call sites for the process lifetime. No network call occurs
/// until an operation is invoked.
pub struct ApiClient {
    http: HttpClient,
    config: ApiConfig,
    interceptors: Vec<Arc<dyn Interceptor>>,
    tokens: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying transport cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Self::with_parts(config, None, Vec::new(), Arc::new(TokenStore::new()))
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    fn with_parts(
        config: ApiConfig,
        default_headers: Option<reqwest::header::HeaderMap>,
        interceptors: Vec<Arc<dyn Interceptor>>,
        tokens: Arc<TokenStore>,
    ) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder().timeout(config.timeout);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(headers) = default_headers {
            builder = builder.default_headers(headers);
        }
        let http = builder.build()?;

        Ok(Self { http, config, interceptors, tokens })
    }

    /// Active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Handle to the token store shared with this client.
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    // -- Auth ---------------------------------------------------------------

    /// Authenticate with email and password.
    ///
    /// On success the returned token is stored so subsequent authenticated
    /// operations carry it automatically.
    #[instrument(skip(self, request))]
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiSuccess<LoginResponse>, ApiError> {
        let response =
            self.post::<_, LoginResponse>(ROUTE_LOGIN, request, Credential::Anonymous).await?;
        self.tokens.set(response.data.token.clone()).await;
        info!("login succeeded");
        Ok(response)
    }

    /// Drop the held token. Local only; the backend keeps no session state.
    pub async fn logout(&self) {
        self.tokens.clear().await;
    }

    // -- Users --------------------------------------------------------------

    /// Register a new user account.
    #[instrument(skip(self, request))]
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<ApiSuccess<User>, ApiError> {
        self.post("/user", request, Credential::Anonymous).await
    }

    /// Fetch the user owning the held token.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<ApiSuccess<User>, ApiError> {
        self.get("/user/me", Credential::Bearer).await
    }

    /// Fetch a user by id.
    #[instrument(skip(self))]
    pub async fn user(&self, id: Uuid) -> Result<ApiSuccess<User>, ApiError> {
        self.get(&format!("/user/{id}"), Credential::Bearer).await
    }

    // -- Organizations ------------------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn create_organization(
        &self,
        request: &CreateOrganizationRequest,
    ) -> Result<ApiSuccess<Organization>, ApiError> {
        self.post("/organization", request, Credential::Anonymous).await
    }

    #[instrument(skip(self))]
    pub async fn organization(&self, id: Uuid) -> Result<ApiSuccess<Organization>, ApiError> {
        self.get(&format!("/organization/{id}"), Credential::Bearer).await
    }

    /// Partially update an organization; `None` fields are left untouched.
    #[instrument(skip(self, request))]
    pub async fn update_organization(
        &self,
        id: Uuid,
        request: &UpdateOrganizationRequest,
    ) -> Result<ApiSuccess<Organization>, ApiError> {
        self.patch(&format!("/organization/{id}"), request, Credential::Bearer).await
    }

    // -- ULD inventory ------------------------------------------------------

    #[instrument(skip(self, request))]
    pub async fn create_uld_inventory(
        &self,
        request: &CreateUldInventoryRequest,
    ) -> Result<ApiSuccess<UldInventory>, ApiError> {
        self.post("/uld_inventory", request, Credential::Bearer).await
    }

    #[instrument(skip(self))]
    pub async fn uld_inventory(&self, id: Uuid) -> Result<ApiSuccess<UldInventory>, ApiError> {
        self.get(&format!("/uld_inventory/{id}"), Credential::Bearer).await
    }

    // -- Health -------------------------------------------------------------

    /// Reachability probe against the backend's always-mounted docs route.
    ///
    /// Returns `true` if the backend answered with a success status, `false`
    /// for a well-formed non-success answer; transport failure is an error.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}{}", self.config.base_url, ROUTE_DOCS);
        debug!(url = %url, "health check");

        let request = self.http.request(Method::GET, &url);
        let response = self.http.send(request).await.map_err(ApiError::from)?;

        Ok(response.status().is_success())
    }

    // -- Dispatch -----------------------------------------------------------

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Credential,
    ) -> Result<ApiSuccess<T>, ApiError> {
        self.execute::<(), T>(Method::GET, path, None, credential).await
    }

    async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        credential: Credential,
    ) -> Result<ApiSuccess<T>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(body), credential).await
    }

    async fn patch<B, T>(
        &self,
        path: &str,
        body: &B,
        credential: Credential,
    ) -> Result<ApiSuccess<T>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PATCH, path, Some(body), credential).await
    }

    /// Shared dispatch path for every typed operation.
    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        credential: Credential,
    ) -> Result<ApiSuccess<T>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if credential == Credential::Bearer {
            let token = self.tokens.access_token().await?;
            request = request.header(AUTHORIZATION, format!("{BEARER_PREFIX}{token}"));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let info = RequestInfo::new(method, path);
        let started = Instant::now();
        for interceptor in &self.interceptors {
            interceptor.on_request(&info);
        }

        let response = self.http.send(request).await.map_err(ApiError::from)?;

        let status = response.status();
        let elapsed = started.elapsed();
        for interceptor in &self.interceptors {
            interceptor.on_response(&info, status, elapsed);
        }

        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        // 204/205 carry no body by spec; decode the type from JSON null
        let data: T = if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "no-content response ({}) but the response type expects a body",
                    status.as_u16()
                ))
            })?
        } else {
            response
                .json()
                .await
                .map_err(|err| ApiError::Decode(format!("failed to parse response: {err}")))?
        };

        Ok(ApiSuccess { status, data })
    }
}

/// Decode a non-success response into the application-level error arm,
/// falling back to the raw body text when it is not the backend error shape.
async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
    let text = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => format!("status {status}"),
        Err(_) => text,
    };

    ApiError::Api { status: status.as_u16(), message }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiConfig>,
    default_headers: Option<reqwest::header::HeaderMap>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    tokens: Option<Arc<TokenStore>>,
}

impl ApiClientBuilder {
    /// Set the client configuration
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Extra headers attached to every request, merged with the JSON
    /// content type the transport always carries.
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Append an interceptor; interceptors run in registration order.
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Share a pre-existing token store with this client.
    pub fn token_store(mut self, tokens: Arc<TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the transport cannot be created.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let tokens = self.tokens.unwrap_or_default();
        ApiClient::with_parts(config, self.default_headers, self.interceptors, tokens)
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::Utc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(server.uri()).unwrap();
        ApiClient::new(config).unwrap()
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_name: "kevin".to_string(),
            email: "kevin@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn login_success_reports_server_status_and_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "email": "kevin@example.com",
                "password": "hunter2",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "token": "signed.jwt.token" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = LoginRequest {
            email: "kevin@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let response = client.login(&request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data.token, "signed.jwt.token");
        assert_eq!(client.tokens().get().await.as_deref(), Some("signed.jwt.token"));
    }

    #[tokio::test]
    async fn login_failure_surfaces_typed_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": 401,
                "error": "invalid user or password",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request =
            LoginRequest { email: "kevin@example.com".to_string(), password: "wrong".to_string() };

        let err = client.login(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid user or password");
            }
            other => panic!("expected api error, got {other:?}"),
        }
        // A failed login must not leave a token behind
        assert!(client.tokens().get().await.is_none());
    }

    #[tokio::test]
    async fn authenticated_operation_attaches_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/me"))
            .and(header("Authorization", "Bearer held-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set("held-token").await;

        let response = client.current_user().await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data.user_name, "kevin");
    }

    #[tokio::test]
    async fn authenticated_operation_without_token_fails_before_dispatch() {
        let server = MockServer::start().await;
        // No mock mounted: a dispatched request would 404 and fail differently

        let client = client_for(&server);
        let err = client.current_user().await.unwrap_err();

        assert!(matches!(err, ApiError::Auth(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatched_success_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/me"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "unexpected": true })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.tokens().set("held-token").await;

        let err = client.current_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request =
            LoginRequest { email: "a@b.c".to_string(), password: "pw".to_string() };

        let err = client.login(&request).await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend exploded");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_carries_no_status() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so the request fails with ECONNREFUSED

        let config = ApiConfig::new(format!("http://{addr}")).unwrap();
        let client = ApiClient::new(config).unwrap();
        let request =
            LoginRequest { email: "a@b.c".to_string(), password: "pw".to_string() };

        let err = client.login(&request).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn health_check_reports_reachable_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_reports_unhealthy_backend_without_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(!client.health_check().await.unwrap());
    }

    #[derive(Default)]
    struct RecordingInterceptor {
        events: Mutex<Vec<(Uuid, &'static str)>>,
    }

    impl Interceptor for RecordingInterceptor {
        fn on_request(&self, request: &RequestInfo) {
            self.events.lock().unwrap().push((request.id(), "request"));
        }

        fn on_response(&self, request: &RequestInfo, _status: StatusCode, _elapsed: Duration) {
            self.events.lock().unwrap().push((request.id(), "response"));
        }
    }

    #[tokio::test]
    async fn interceptor_sees_request_before_response_with_matching_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "token": "t" })),
            )
            .mount(&server)
            .await;

        let recorder = Arc::new(RecordingInterceptor::default());
        let client = ApiClient::builder()
            .config(ApiConfig::new(server.uri()).unwrap())
            .interceptor(recorder.clone())
            .build()
            .unwrap();

        let request = LoginRequest { email: "a@b.c".to_string(), password: "pw".to_string() };
        client.login(&request).await.unwrap();

        let events = recorder.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].1, "request");
        assert_eq!(events[1].1, "response");
        assert_eq!(events[0].0, events[1].0);
    }

    #[tokio::test]
    async fn builder_without_config_uses_defaults() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.config().base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn logout_clears_the_held_token() {
        let client = ApiClient::builder().build().unwrap();
        client.tokens().set("held-token").await;

        client.logout().await;
        assert!(client.tokens().get().await.is_none());
    }
}
