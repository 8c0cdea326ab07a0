//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so individual components depend on small focused
//! models. Everything here is pure and unit-testable; signals wrap these
//! types at the `app` level, and browser persistence is cfg-gated inside
//! `session`.

pub mod roles;
pub mod session;
pub mod stage;
pub mod toast;
pub mod tracker;
