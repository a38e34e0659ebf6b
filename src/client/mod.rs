//! The request pipeline: every backend call goes through [`ApiClient`].

pub mod api;
pub mod endpoint;
pub mod error;
pub mod pipeline;

pub use endpoint::Endpoint;
pub use error::ApiError;
pub use pipeline::{ApiClient, RequestBody};
