//! Async client for the Pin Payments REST API
//!
//! Wraps the customer, card, charge and refund endpoints in typed Rust
//! values. Each operation issues a single request, maps error responses onto
//! [`ApiError`] and decodes the body into the matching resource.
//!
//! # Example
//!
//! ```rust,no_run
//! use pin_payment::prelude::*;
//!
//! # async fn example() -> Result<(), ApiError> {
//! let client = ApiClient::new(&Config::test("your-secret-key"))?;
//!
//! let customer = Customer::create(&client, "roland@pin.net.au", Some(CardInput::token("card_abc"))).await?;
//! let cards = Customer::find_cards(&client, customer.token()).await?;
//! for card in &cards {
//!     println!("{} {:?}", card.token(), card.display_number());
//! }
//! # Ok(())
//! # }
//! ```

/**
 * HTTP transport, request payload marshalling
 *  and response decoding shared by every resource.
 */
pub mod client;
pub mod config;
mod error;
/**
 * Typed API resources: customers, cards,
 *  charges and refunds.
 */
pub mod resources;

pub use error::{ApiError, FieldMessage, Result};

pub mod prelude {
    pub use crate::client::{ApiClient, ApiRequest};
    pub use crate::config::Config;
    pub use crate::error::{ApiError, FieldMessage};
    pub use crate::resources::card::{Card, CardDetails, CardInput};
    pub use crate::resources::charge::{Charge, ChargeSource, NewCharge};
    pub use crate::resources::customer::Customer;
    pub use crate::resources::refund::Refund;
    pub use crate::resources::{Page, Resource};
}
