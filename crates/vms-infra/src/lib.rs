//! Infrastructure adapters for View My Startup.
//!
//! The backend is an opaque HTTP service; [`http::HttpBackend`] implements
//! every port of `vms_core::ports` on top of `reqwest`.

pub mod http;

pub use http::{HttpBackend, HttpBackendError};
