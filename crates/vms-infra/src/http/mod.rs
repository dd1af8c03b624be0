//! HTTP backend adapter.

mod client;
mod dto;
mod ports;

pub use client::{HttpBackend, HttpBackendError};
