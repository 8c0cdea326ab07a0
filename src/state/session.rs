//! Session store: bearer token plus cached profile.
//!
//! DESIGN
//! ======
//! The session lives in an `RwSignal<SessionState>` provided via context, so
//! role-dependent UI (menus, guards) subscribes through the signal. The token
//! and serialized profile persist in `localStorage` under `hydrate`; presence
//! of the token is the sole authentication signal consulted on view entry.
//! Malformed cached profiles are discarded rather than allowed to wedge the
//! app.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::UserProfile;
use crate::state::roles::Role;

#[cfg(feature = "hydrate")]
const TOKEN_KEY: &str = "token";
#[cfg(feature = "hydrate")]
const USER_KEY: &str = "user";

/// Local authentication state: the bearer token owns "authenticated" status;
/// the profile is a cache refreshed from `/auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Typed role from the cached profile, if any.
    pub fn role(&self) -> Option<Role> {
        self.user
            .as_ref()
            .and_then(|u| u.role.as_deref())
            .and_then(Role::parse)
    }

    pub fn is_view_only(&self) -> bool {
        self.role().is_some_and(Role::is_view_only)
    }

    /// Set or clear the token. Clearing also drops the cached profile so a
    /// signed-out session never leaks the previous user's role.
    pub fn set_token(&mut self, token: Option<String>) {
        if token.is_none() {
            self.user = None;
        }
        self.token = token;
        persist_token(self.token.as_deref());
        if self.user.is_none() {
            persist_user(None);
        }
    }

    /// Cache a freshly fetched profile.
    pub fn set_user(&mut self, user: UserProfile) {
        persist_user(Some(&user));
        self.user = Some(user);
    }

    /// Clear everything; used on logout and forced 401 sign-out.
    pub fn clear(&mut self) {
        self.set_token(None);
    }
}

/// Parse a serialized profile, tolerating garbage.
pub fn parse_user(raw: &str) -> Option<UserProfile> {
    serde_json::from_str(raw).ok()
}

/// Load the persisted session at startup. Absent or malformed values degrade
/// to an unauthenticated session; a malformed profile is removed from storage
/// so it cannot break the next load either.
pub fn load() -> SessionState {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return SessionState::default();
        };
        let token = storage.get_item(TOKEN_KEY).ok().flatten();
        let user = match storage.get_item(USER_KEY).ok().flatten() {
            Some(raw) => {
                let parsed = parse_user(&raw);
                if parsed.is_none() {
                    let _ = storage.remove_item(USER_KEY);
                }
                parsed
            }
            None => None,
        };
        SessionState { token, user }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        SessionState::default()
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn persist_token(token: Option<&str>) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            match token {
                Some(t) => {
                    let _ = storage.set_item(TOKEN_KEY, t);
                }
                None => {
                    let _ = storage.remove_item(TOKEN_KEY);
                }
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

fn persist_user(user: Option<&UserProfile>) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            match user.and_then(|u| serde_json::to_string(u).ok()) {
                Some(json) => {
                    let _ = storage.set_item(USER_KEY, &json);
                }
                None => {
                    let _ = storage.remove_item(USER_KEY);
                }
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user;
    }
}
