//! HTTP plumbing between the runner and the meal max service

pub mod client;
pub mod request;

pub use client::{HttpTransport, Transport};
pub use request::{ApiRequest, ApiResponse};
