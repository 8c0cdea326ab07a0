//! Routed pages.

pub mod dashboard;
pub mod forbidden;
pub mod login;
pub mod patents;
pub mod register;
