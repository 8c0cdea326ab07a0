//! # sgpi-client
//!
//! Leptos + WASM frontend for the patent workflow tracker. Tracks each
//! patent application through a six-stage pipeline (registration, similarity
//! search, payment voucher, formal examination, merit examination, grant)
//! against a REST backend.
//!
//! The crate contains pages, components, application state (session, roles,
//! the stage state machine, per-patent tracker), and the API gateway that
//! attaches bearer tokens and intercepts authentication failures.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entrypoint: hydrate the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(crate::app::App);
}
