//! HTTP client for the RehabFit backend.
//!
//! Wraps every endpoint the app uses. The bearer token, when set, is attached
//! to each request automatically.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Response, StatusCode};
use rehabfit_core::{
    ChatReply, Credentials, DashboardData, ProfileUpdate, ProgressEntry, RegisterRequest,
    UserProfile,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = ClientBuilder::new().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a session token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Replace the session token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a token is attached.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.public_request(method, path);
        match self.token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Request without credentials, for the login and registration endpoints.
    fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn require_token(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(ApiError::NotLoggedIn);
        }
        Ok(())
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let request = req.build()?;
        let sent_token = request.headers().contains_key(AUTHORIZATION);
        let resp = self.http.execute(request).await.map_err(|e| ApiError::Connection {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        check_status(resp, sent_token).await
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.send(req).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        debug!(email = %request.email, "registering account");
        let req = self.public_request(Method::POST, "/auth/register").json(request);
        self.send(req).await?;
        Ok(())
    }

    /// POST /auth/login; returns the session token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let req = self.public_request(Method::POST, "/auth/login").json(credentials);
        let body: TokenResponse = self.send_json(req).await?;
        extract_token(body)
    }

    /// POST /auth/google with a token from Google sign-in; returns the
    /// session token.
    pub async fn login_with_google(&self, google_token: &str) -> Result<String> {
        let req = self
            .public_request(Method::POST, "/auth/google")
            .json(&json!({ "token": google_token }));
        let body: TokenResponse = self.send_json(req).await?;
        extract_token(body)
    }

    /// GET /auth/me
    pub async fn me(&self) -> Result<UserProfile> {
        self.require_token()?;
        let req = self.request(Method::GET, "/auth/me");
        self.send_json(req).await
    }

    /// PUT /auth/profile; returns the updated profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        self.require_token()?;
        let req = self.request(Method::PUT, "/auth/profile").json(update);
        let body: ProfileResponse = self.send_json(req).await?;
        body.user
            .ok_or_else(|| ApiError::Decode("profile response without user".to_string()))
    }

    /// GET /api/rag/dashboard
    pub async fn dashboard(&self) -> Result<DashboardData> {
        self.require_token()?;
        let req = self.request(Method::GET, "/api/rag/dashboard");
        self.send_json(req).await
    }

    /// POST /api/progress
    pub async fn log_progress(&self, entry: &ProgressEntry) -> Result<()> {
        self.require_token()?;
        debug!(date = %entry.date, "logging progress entry");
        let req = self.request(Method::POST, "/api/progress").json(entry);
        self.send(req).await?;
        Ok(())
    }

    /// POST /api/rag/upsert-chat: index a user message for later context.
    pub async fn upsert_chat(&self, message: &str) -> Result<()> {
        let req = self
            .request(Method::POST, "/api/rag/upsert-chat")
            .json(&json!({ "message": message }));
        self.send(req).await?;
        Ok(())
    }

    /// POST /api/rag/chat
    pub async fn chat(&self, question: &str) -> Result<ChatReply> {
        let req = self
            .request(Method::POST, "/api/rag/chat")
            .json(&json!({ "question": question }));
        self.send_json(req).await
    }
}

fn extract_token(body: TokenResponse) -> Result<String> {
    body.token
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MissingToken)
}

/// Map a non-success response to an error.
///
/// 401/403 only means an expired session when a token was sent; otherwise
/// (e.g. a wrong password at login) the server's message is kept.
async fn check_status(resp: Response, sent_token: bool) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let auth_failure = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
    if auth_failure && sent_token {
        return Err(ApiError::Unauthorized);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(text);
    warn!(status = status.as_u16(), %message, "backend request failed");

    if message.to_lowercase().contains("duplicate") {
        return Err(ApiError::DuplicateAccount);
    }
    Err(ApiError::Status { status: status.as_u16(), message })
}
