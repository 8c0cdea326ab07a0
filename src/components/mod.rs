//! Shared UI components.

pub mod layout;
pub mod require_roles;
pub mod timeline;
pub mod toast_host;
