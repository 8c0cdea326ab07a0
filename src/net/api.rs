//! REST gateway for the patent backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning errors since the backend is only reachable from the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every response passes through one interception point: a 401 clears the
//! session and redirects to `/login` (unless the caller is the login view or
//! an auth endpoint, which handle it inline); any other failure surfaces a
//! single toast carrying the server's message or a generic fallback. Probe
//! requests opt out of the toast because absence is an expected outcome.
//! There is no retry, backoff, or queuing — a failed request is terminal.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use leptos::prelude::RwSignal;
#[cfg(feature = "hydrate")]
use leptos::prelude::{GetUntracked, Update};

use crate::net::types::{
    CreatedUser, DashboardSummary, Patent, RegisterRequest, TokenResponse, UserProfile,
};
use crate::state::session::SessionState;
use crate::state::stage::Stage;
use crate::state::toast::ToastState;

#[cfg(feature = "hydrate")]
const LOGIN_ENDPOINT: &str = "/auth/login";
#[cfg(feature = "hydrate")]
const REGISTER_ENDPOINT: &str = "/auth/register";
#[cfg(feature = "hydrate")]
const ME_ENDPOINT: &str = "/auth/me";
#[cfg(feature = "hydrate")]
const PATENTS_ENDPOINT: &str = "/patents";
#[cfg(feature = "hydrate")]
const CREATE_PATENT_ENDPOINT: &str = "/patents/minhas-patentes";
#[cfg(feature = "hydrate")]
const DASHBOARD_ENDPOINT: &str = "/dashboard/summary";

/// Fixed number of similar records the backend associates per search.
#[cfg(any(test, feature = "hydrate"))]
const SEARCH_RESULT_COUNT: u8 = 3;

#[cfg(feature = "hydrate")]
const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Sign in again.";

/// A terminal request failure. `status` is `None` for transport errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    #[cfg(not(feature = "hydrate"))]
    fn unavailable() -> Self {
        Self { status: None, message: "not available on server".to_owned() }
    }

    #[cfg(feature = "hydrate")]
    fn request(err: gloo_net::Error) -> Self {
        Self { status: None, message: err.to_string() }
    }

    #[cfg(feature = "hydrate")]
    fn decode(err: gloo_net::Error) -> Self {
        Self { status: None, message: format!("invalid response body: {err}") }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The API gateway: session for the bearer token and forced sign-out, toasts
/// for the single global failure notification. `Copy` so pages can move it
/// into async tasks freely.
#[derive(Clone, Copy)]
pub struct Api {
    pub session: RwSignal<SessionState>,
    pub toasts: RwSignal<ToastState>,
}

// =============================================================
// Pure helpers (unit-tested without a browser)
// =============================================================

/// Login and registration 401s are credential errors handled by the caller,
/// not session expiry.
#[cfg(any(test, feature = "hydrate"))]
fn is_auth_endpoint(url: &str) -> bool {
    url.contains("/auth/login") || url.contains("/auth/register")
}

/// Whether a 401 on `url` should clear the session and force a redirect.
/// Never while already on the login view, and never for auth endpoints.
#[cfg(any(test, feature = "hydrate"))]
fn should_force_logout(url: &str, current_path: &str) -> bool {
    current_path != "/login" && !is_auth_endpoint(url)
}

/// Best-effort extraction of a server-supplied message from an error body.
/// The backend uses `detail`; `message` is accepted as a fallback shape.
#[cfg(any(test, feature = "hydrate"))]
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(ToOwned::to_owned)
}

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(url: &str, status: u16, body: &str) -> String {
    extract_server_message(body)
        .unwrap_or_else(|| format!("Request to {url} failed (status {status})."))
}

#[cfg(any(test, feature = "hydrate"))]
fn network_failure_message(url: &str) -> String {
    format!("Could not reach the server at {url}.")
}

/// OAuth2 password-grant body for `POST /auth/login`.
#[cfg(any(test, feature = "hydrate"))]
fn login_form_body(username: &str, password: &str) -> String {
    format!(
        "grant_type=password&username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}

#[cfg(any(test, feature = "hydrate"))]
fn patent_detail_endpoint(id: i64) -> String {
    format!("/patents/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn patent_stage_endpoint(id: i64) -> String {
    format!("/patents/{id}/etapas")
}

#[cfg(any(test, feature = "hydrate"))]
fn stage_form_endpoint(id: i64) -> String {
    format!("/patents/stages/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn attachment_url_endpoint(id: i64, at: Stage) -> String {
    format!("/patents/stages/{id}/{}/url", at.index())
}

#[cfg(any(test, feature = "hydrate"))]
fn search_endpoint(term: &str, patent_id: i64) -> String {
    format!(
        "/patents/search?termo={}&quantidade={SEARCH_RESULT_COUNT}&user_patent_id={patent_id}",
        urlencoding::encode(term)
    )
}

// =============================================================
// Gateway internals (browser only)
// =============================================================

#[cfg(feature = "hydrate")]
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

#[cfg(feature = "hydrate")]
impl Api {
    fn apply_auth(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.session.get_untracked().token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn notify_error(&self, message: &str) {
        let message = message.to_owned();
        self.toasts.update(|t| {
            t.error(message);
        });
    }

    /// Clear the session and send the user back to the login view. A hard
    /// navigation (rather than router state) guarantees every in-flight view
    /// is torn down.
    fn force_logout(&self) {
        self.session.update(SessionState::clear);
        self.notify_error(SESSION_EXPIRED_MESSAGE);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }

    /// Single response interception point; see module docs.
    async fn intercept(
        &self,
        url: &str,
        notify: bool,
        sent: Result<gloo_net::http::Response, gloo_net::Error>,
    ) -> Result<gloo_net::http::Response, ApiError> {
        let resp = match sent {
            Ok(resp) => resp,
            Err(err) => {
                leptos::logging::warn!("request to {url} failed: {err}");
                let message = network_failure_message(url);
                if notify {
                    self.notify_error(&message);
                }
                return Err(ApiError { status: None, message });
            }
        };

        if resp.status() == 401 {
            if should_force_logout(url, &current_path()) {
                self.force_logout();
            }
            return Err(ApiError { status: Some(401), message: "unauthorized".to_owned() });
        }

        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = failure_message(url, status, &body);
            if notify {
                self.notify_error(&message);
            }
            return Err(ApiError { status: Some(status), message });
        }

        Ok(resp)
    }
}

// =============================================================
// Endpoints
// =============================================================

impl Api {
    /// Exchange credentials for a bearer token via `POST /auth/login`
    /// (form-encoded password grant). Failures are returned to the caller
    /// for inline display, never toasted.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = gloo_net::http::Request::post(LOGIN_ENDPOINT)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(login_form_body(username, password))
                .map_err(ApiError::request)?;
            let resp = self.intercept(LOGIN_ENDPOINT, false, req.send().await).await?;
            resp.json::<TokenResponse>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(ApiError::unavailable())
        }
    }

    /// Provision an account via `POST /auth/register` (admin-driven). The
    /// response is a created-user record; the caller's own session is not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn register(&self, request: &RegisterRequest) -> Result<CreatedUser, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = self
                .apply_auth(gloo_net::http::Request::post(REGISTER_ENDPOINT))
                .json(request)
                .map_err(ApiError::request)?;
            let resp = self.intercept(REGISTER_ENDPOINT, false, req.send().await).await?;
            resp.json::<CreatedUser>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::unavailable())
        }
    }

    /// Fetch the authenticated profile from `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = self.apply_auth(gloo_net::http::Request::get(ME_ENDPOINT));
            let resp = self.intercept(ME_ENDPOINT, true, req.send().await).await?;
            resp.json::<UserProfile>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::unavailable())
        }
    }

    /// List the caller's patents from `GET /patents`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn fetch_patents(&self) -> Result<Vec<Patent>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = self.apply_auth(gloo_net::http::Request::get(PATENTS_ENDPOINT));
            let resp = self.intercept(PATENTS_ENDPOINT, true, req.send().await).await?;
            resp.json::<Vec<Patent>>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::unavailable())
        }
    }

    /// Register a new patent via `POST /patents/minhas-patentes`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn create_patent(&self, title: &str, description: &str) -> Result<Patent, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "titulo": title, "descricao": description });
            let req = self
                .apply_auth(gloo_net::http::Request::post(CREATE_PATENT_ENDPOINT))
                .json(&payload)
                .map_err(ApiError::request)?;
            let resp = self
                .intercept(CREATE_PATENT_ENDPOINT, true, req.send().await)
                .await?;
            resp.json::<Patent>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (title, description);
            Err(ApiError::unavailable())
        }
    }

    /// Fetch one patent with its related-record associations from
    /// `GET /patents/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn fetch_patent(&self, id: i64) -> Result<Patent, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = patent_detail_endpoint(id);
            let req = self.apply_auth(gloo_net::http::Request::get(&url));
            let resp = self.intercept(&url, true, req.send().await).await?;
            resp.json::<Patent>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::unavailable())
        }
    }

    /// Persist a stage advance via `PUT /patents/{id}/etapas` and return the
    /// updated record, the new source of truth.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn update_patent_stage(&self, id: i64, stage: Stage) -> Result<Patent, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = patent_stage_endpoint(id);
            let payload = serde_json::json!({ "status": stage.index() });
            let req = self
                .apply_auth(gloo_net::http::Request::put(&url))
                .json(&payload)
                .map_err(ApiError::request)?;
            let resp = self.intercept(&url, true, req.send().await).await?;
            resp.json::<Patent>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, stage);
            Err(ApiError::unavailable())
        }
    }

    /// Ask the backend to find and associate similar records via
    /// `GET /patents/search`. The caller refetches the patent afterwards to
    /// refresh the association list.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn run_similarity_search(&self, term: &str, patent_id: i64) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let url = search_endpoint(term, patent_id);
            let req = self.apply_auth(gloo_net::http::Request::get(&url));
            self.intercept(&url, true, req.send().await).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (term, patent_id);
            Err(ApiError::unavailable())
        }
    }

    /// Save a stage's notes and optional attachment via
    /// `POST /patents/stages/{id}` (multipart), independently of stage
    /// advancement.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    #[cfg(feature = "hydrate")]
    pub async fn save_stage_form(
        &self,
        patent_id: i64,
        at: Stage,
        notes: &str,
        file: Option<web_sys::File>,
    ) -> Result<(), ApiError> {
        let url = stage_form_endpoint(patent_id);
        let form = web_sys::FormData::new()
            .map_err(|_| ApiError { status: None, message: "form assembly failed".to_owned() })?;
        let _ = form.append_with_str("status", &at.index().to_string());
        let _ = form.append_with_str("descricao", notes);
        if let Some(file) = file {
            let _ = form.append_with_blob_and_filename("file", &file, &file.name());
        }
        let req = self
            .apply_auth(gloo_net::http::Request::post(&url))
            .body(form)
            .map_err(ApiError::request)?;
        self.intercept(&url, true, req.send().await).await?;
        Ok(())
    }

    /// Probe `GET /patents/stages/{id}/{stage}/url` for an existing
    /// attachment. Absence is the expected outcome for most stages, so no
    /// notification is raised; any failure simply yields `None`. A 401 still
    /// goes through the forced sign-out path.
    pub async fn fetch_stage_attachment_url(&self, patent_id: i64, at: Stage) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let url = attachment_url_endpoint(patent_id, at);
            let req = self.apply_auth(gloo_net::http::Request::get(&url));
            match self.intercept(&url, false, req.send().await).await {
                Ok(resp) => resp
                    .json::<crate::net::types::AttachmentUrl>()
                    .await
                    .ok()
                    .map(|a| a.url),
                Err(err) => {
                    if err.status != Some(404) {
                        leptos::logging::warn!("attachment probe for {url} failed: {err}");
                    }
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (patent_id, at);
            None
        }
    }

    /// Fetch aggregate counts from `GET /dashboard/summary`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or a non-2xx response.
    pub async fn fetch_dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let req = self.apply_auth(gloo_net::http::Request::get(DASHBOARD_ENDPOINT));
            let resp = self.intercept(DASHBOARD_ENDPOINT, true, req.send().await).await?;
            resp.json::<DashboardSummary>().await.map_err(ApiError::decode)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::unavailable())
        }
    }
}
