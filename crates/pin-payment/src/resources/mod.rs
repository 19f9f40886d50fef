/**
 * Card tokenisation and the card snapshot
 *  embedded in customers and charges.
 */
pub mod card;
/**
 * Charges against a card or a stored customer.
 */
pub mod charge;
/**
 * Customers and their stored cards.
 */
pub mod customer;
/**
 * Refunds of previous charges.
 */
pub mod refund;
mod request;

pub use request::{Fetch, FetchAll, Remove, Submit};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::decode::{self, Envelope, Pagination};
use crate::client::marshal::{Attribute, Attributes};
use crate::error::{ApiError, Result};

/// Shared shape of every API resource.
///
/// A resource is identified by a server-assigned token. Everything else the
/// server reports is deserialised into `Fields` and combined with the token
/// by `assemble`.
pub trait Resource: Sized {
    /// Attributes this resource recognises, in wire order.
    const ATTRIBUTES: &'static [Attribute];

    /// Path of the top-level collection, e.g. `/1/customers`.
    const COLLECTION_PATH: &'static str;

    type Fields: DeserializeOwned;

    fn assemble(token: String, fields: Self::Fields) -> Self;

    fn token(&self) -> &str;

    fn member_path(token: &str) -> Result<String> {
        Ok(format!("{}/{}", Self::COLLECTION_PATH, token_segment(token)?))
    }

    /// Build an instance from a decoded object, splitting off the token.
    fn from_attributes(mut attributes: Attributes) -> Result<Self> {
        let token = decode::take_token(&mut attributes)?;
        let fields = serde_json::from_value(Value::Object(attributes))?;
        Ok(Self::assemble(token, fields))
    }
}

/// Check that `token` can be placed in a request path as one segment.
///
/// Tokens are ASCII letters, digits, `_` and `-`. Anything else could
/// escape the segment once the path is joined onto the base URL.
pub(crate) fn token_segment(token: &str) -> Result<&str> {
    let valid = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(token)
    } else {
        Err(ApiError::InvalidToken(token.to_string()))
    }
}

/// One page of a list response.
///
/// Only the page the server returned is held. When the server reports
/// further pages, [`Page::is_truncated`] is true.
#[derive(Debug, Clone)]
pub struct Page<R> {
    items: Vec<R>,
    pagination: Option<Pagination>,
}

impl<R: Resource> Page<R> {
    pub(crate) fn from_envelope(envelope: Envelope) -> Result<Self> {
        let pagination = envelope.pagination.clone();
        let items = envelope
            .into_objects()?
            .into_iter()
            .map(R::from_attributes)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items, pagination })
    }
}

impl<R> Page<R> {
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn is_truncated(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_more)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.items.iter()
    }
}

impl<R> IntoIterator for Page<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Page<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
