//! Backend wire layer: DTOs and the REST gateway.

pub mod api;
pub mod types;
