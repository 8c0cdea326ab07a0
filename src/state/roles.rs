//! Typed roles and the route authorization decision.
//!
//! DESIGN
//! ======
//! Role strings arrive from the backend profile and are compared
//! case-insensitively. All route gating funnels through a single pure
//! `authorize` function so the policy (login redirect vs. forbidden page)
//! lives in one place instead of scattered view branches.

#[cfg(test)]
#[path = "roles_test.rs"]
mod roles_test;

/// Known account roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Full access plus account provisioning.
    Admin,
    /// Regular applicant: owns and mutates patents.
    User,
    /// Read-only access to patents and stages.
    Viewer,
}

impl Role {
    /// Parse a backend role string, case-insensitively. The backend has
    /// shipped several aliases for the read-only role.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            "viewer" | "read_only" | "leitor" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Wire value sent when provisioning an account.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Viewer => "viewer",
        }
    }

    /// A view-only role may never mutate patents or stages.
    pub fn is_view_only(self) -> bool {
        matches!(self, Self::Viewer)
    }
}

/// Outcome of an authorization check for a guarded view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToForbidden,
}

/// Decide access for a guarded view.
///
/// Unauthenticated callers go to login regardless of role; authenticated
/// callers with a missing, unknown, or non-permitted role see the forbidden
/// page.
pub fn authorize(authenticated: bool, role: Option<Role>, allowed: &[Role]) -> AccessDecision {
    if !authenticated {
        return AccessDecision::RedirectToLogin;
    }
    match role {
        Some(role) if allowed.contains(&role) => AccessDecision::Allow,
        _ => AccessDecision::RedirectToForbidden,
    }
}
