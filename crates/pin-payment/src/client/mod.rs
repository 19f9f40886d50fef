#[allow(clippy::module_inception)]
mod client;
pub mod decode;
pub mod marshal;

pub use client::ApiClient;
pub use decode::{Envelope, Pagination, RawResponse};
pub use marshal::{marshal, Attribute, Attributes, ParamValue, Params, Payload};

use reqwest::Method;

use crate::error::ApiError;

/// A single API call: where it goes, what it sends, and how to read the
/// success body.
pub trait ApiRequest {
    type Response;

    fn method(&self) -> Method;

    /// Absolute path, joined onto the client's base URL.
    fn path(&self) -> String;

    fn payload(&self) -> Option<&Payload> {
        None
    }

    /// Interpret a success response.
    fn parse(&self, raw: RawResponse) -> Result<Self::Response, ApiError>;
}
