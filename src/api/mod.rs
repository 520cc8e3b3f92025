//! REST backend access: endpoints, the `{status, data}` envelope, and the
//! `Transport` seam the reconciler sends through.

mod client;
mod endpoint;
mod error;
mod response;

pub use client::{RestClient, Transport};
pub use endpoint::{ApiRequest, Endpoint, HttpMethod};
pub use error::ApiError;
pub use response::ApiResponse;
