//! Generic requests shared by every resource.

use std::marker::PhantomData;

use reqwest::Method;

use super::{Page, Resource};
use crate::client::decode::{self, RawResponse};
use crate::client::marshal::Payload;
use crate::client::ApiRequest;
use crate::error::ApiError;

/// GET a single resource.
#[derive(Debug, Clone)]
pub struct Fetch<R> {
    path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Fetch<R> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ApiRequest for Fetch<R> {
    type Response = R;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn parse(&self, raw: RawResponse) -> Result<R, ApiError> {
        R::from_attributes(decode::decode_body(&raw.body)?.into_object()?)
    }
}

/// GET a collection. Returns the first page only.
#[derive(Debug, Clone)]
pub struct FetchAll<R> {
    path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> FetchAll<R> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ApiRequest for FetchAll<R> {
    type Response = Page<R>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn parse(&self, raw: RawResponse) -> Result<Page<R>, ApiError> {
        let page = Page::from_envelope(decode::decode_body(&raw.body)?)?;
        if page.is_truncated() {
            tracing::warn!(
                "{} returned {} items but the server reports more pages; only the first page is loaded",
                self.path,
                page.len()
            );
        }
        Ok(page)
    }
}

/// POST or PUT a payload and read back the resulting resource.
#[derive(Debug, Clone)]
pub struct Submit<R> {
    method: Method,
    path: String,
    payload: Payload,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Submit<R> {
    pub fn post(path: impl Into<String>, payload: Payload) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            payload,
            _resource: PhantomData,
        }
    }

    pub fn put(path: impl Into<String>, payload: Payload) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            payload,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ApiRequest for Submit<R> {
    type Response = R;

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn payload(&self) -> Option<&Payload> {
        Some(&self.payload)
    }

    fn parse(&self, raw: RawResponse) -> Result<R, ApiError> {
        R::from_attributes(decode::decode_body(&raw.body)?.into_object()?)
    }
}

/// DELETE a resource.
///
/// Error statuses are mapped like any other call. A success body carries
/// nothing the caller needs and is not parsed.
#[derive(Debug, Clone)]
pub struct Remove {
    path: String,
}

impl Remove {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl ApiRequest for Remove {
    type Response = ();

    fn method(&self) -> Method {
        Method::DELETE
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn parse(&self, _raw: RawResponse) -> Result<(), ApiError> {
        Ok(())
    }
}
