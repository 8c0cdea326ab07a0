//! Wire DTOs for the patent backend's REST surface.
//!
//! DESIGN
//! ======
//! Field names follow the backend's Portuguese wire schema via serde renames
//! so Rust code reads idiomatically while round-trips stay lossless. Optional
//! and defaulted fields are deliberately lenient: the backend omits fields on
//! older records and the client must tolerate that rather than fail a whole
//! list fetch.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bearer token issued by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token attached to every subsequent request.
    pub access_token: String,
    /// Token scheme, e.g. `"bearer"`. Informational only.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Authenticated user profile as returned by `GET /auth/me`.
///
/// Every field is optional: the profile is a cache used for menu gating and
/// role checks, and a sparse profile must not break an authenticated session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Role identifier (`"admin"`, `"user"`, `"viewer"`, ...), compared
    /// case-insensitively.
    #[serde(default)]
    pub role: Option<String>,
}

/// Payload for `POST /auth/register` (admin-driven account provisioning).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}

/// Created-account record returned by `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// One of the caller's patents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patent {
    /// Backend identifier.
    pub id: i64,
    /// Patent title; required at creation.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Optional free-text description.
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    /// Workflow stage index, 0..=5. Defaults to 0 when the backend omits it.
    #[serde(rename = "status", default)]
    pub stage: i64,
    /// Related records associated via similarity search. Only populated on
    /// detail fetches; list fetches omit it.
    #[serde(rename = "patents", default)]
    pub related: Vec<RelatedPatent>,
}

/// Externally sourced record associated with a patent by the similarity
/// search. Read-only from the client's perspective.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPatent {
    /// Backend identifier of the association.
    pub id: i64,
    /// Title of the external record.
    #[serde(rename = "titulo", default)]
    pub title: String,
    /// Application number at the patent office.
    #[serde(rename = "numero_pedido", default)]
    pub application_number: String,
    /// Filing party, when known.
    #[serde(rename = "depositante", default)]
    pub filer: Option<String>,
    /// Inventor list, when known.
    #[serde(rename = "inventores", default)]
    pub inventors: Option<String>,
    /// Link to the record's page at the patent office.
    #[serde(rename = "url_detalhe", default)]
    pub detail_url: Option<String>,
}

/// Signed URL for an existing stage attachment,
/// from `GET /patents/stages/{id}/{stage}/url`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AttachmentUrl {
    pub url: String,
}

/// Aggregate counts from `GET /dashboard/summary`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DashboardSummary {
    /// Total patents owned by the caller.
    #[serde(default)]
    pub total_user_patents: i64,
    /// Total related records across the caller's patents.
    #[serde(default)]
    pub total_related_patents: i64,
    /// Sparse stage histogram: JSON object keys are stage indices as strings.
    #[serde(default)]
    pub steps_counts: HashMap<String, i64>,
    /// Caller's patents ranked by the backend (by related-record count).
    #[serde(default)]
    pub top_user_patents: Vec<TopPatent>,
}

/// One row of the dashboard's top-patents ranking.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TopPatent {
    pub id: i64,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "status", default)]
    pub stage: i64,
    #[serde(default)]
    pub related_count: i64,
}
