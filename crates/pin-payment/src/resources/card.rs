use serde::{Deserialize, Serialize};

use super::{Resource, Submit};
use crate::client::marshal::{marshal, Attribute, Attributes, ParamValue, Params};
use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Card snapshot as reported by the server.
///
/// Cards are never edited by the client. The same snapshot appears when a
/// card is tokenised, listed under a customer, or embedded in a charge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Attributes")]
pub struct Card {
    token: String,
    fields: CardFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CardFields {
    #[serde(default)]
    display_number: Option<String>,
    #[serde(default)]
    scheme: Option<String>,
    #[serde(default)]
    expiry_month: Option<u32>,
    #[serde(default)]
    expiry_year: Option<u32>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address_line1: Option<String>,
    #[serde(default)]
    address_line2: Option<String>,
    #[serde(default)]
    address_city: Option<String>,
    #[serde(default)]
    address_postcode: Option<String>,
    #[serde(default)]
    address_state: Option<String>,
    #[serde(default)]
    address_country: Option<String>,
    #[serde(default)]
    customer_token: Option<String>,
    #[serde(default)]
    primary: Option<bool>,
}

impl TryFrom<Attributes> for Card {
    type Error = ApiError;

    fn try_from(attributes: Attributes) -> Result<Self> {
        Card::from_attributes(attributes)
    }
}

impl Resource for Card {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::server("token"),
        Attribute::writable("number"),
        Attribute::writable("expiry_month"),
        Attribute::writable("expiry_year"),
        Attribute::writable("cvc"),
        Attribute::writable("name"),
        Attribute::writable("address_line1"),
        Attribute::writable("address_line2"),
        Attribute::writable("address_city"),
        Attribute::writable("address_postcode"),
        Attribute::writable("address_state"),
        Attribute::writable("address_country"),
        Attribute::server("display_number"),
        Attribute::server("scheme"),
        Attribute::server("customer_token"),
        Attribute::server("primary"),
    ];
    const COLLECTION_PATH: &'static str = "/1/cards";

    type Fields = CardFields;

    fn assemble(token: String, fields: CardFields) -> Self {
        Self { token, fields }
    }

    fn token(&self) -> &str {
        &self.token
    }
}

impl Card {
    /// Tokenise card details.
    ///
    /// The returned card token can be used once, to charge the card or to
    /// store it against a customer.
    pub async fn create(client: &ApiClient, details: &CardDetails) -> Result<Card> {
        let payload = marshal(Self::ATTRIBUTES, &details.to_params());
        client
            .call(Submit::<Card>::post(Self::COLLECTION_PATH, payload))
            .await
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Masked card number, e.g. `XXXX-XXXX-XXXX-0000`.
    pub fn display_number(&self) -> Option<&str> {
        self.fields.display_number.as_deref()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.fields.scheme.as_deref()
    }

    pub fn expiry_month(&self) -> Option<u32> {
        self.fields.expiry_month
    }

    pub fn expiry_year(&self) -> Option<u32> {
        self.fields.expiry_year
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.name.as_deref()
    }

    pub fn address_line1(&self) -> Option<&str> {
        self.fields.address_line1.as_deref()
    }

    pub fn address_line2(&self) -> Option<&str> {
        self.fields.address_line2.as_deref()
    }

    pub fn address_city(&self) -> Option<&str> {
        self.fields.address_city.as_deref()
    }

    pub fn address_postcode(&self) -> Option<&str> {
        self.fields.address_postcode.as_deref()
    }

    pub fn address_state(&self) -> Option<&str> {
        self.fields.address_state.as_deref()
    }

    pub fn address_country(&self) -> Option<&str> {
        self.fields.address_country.as_deref()
    }

    /// Token of the customer the card is stored against, if any.
    pub fn customer_token(&self) -> Option<&str> {
        self.fields.customer_token.as_deref()
    }

    pub fn is_primary(&self) -> bool {
        self.fields.primary.unwrap_or(false)
    }
}

/// Full card details, as entered by the card holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub cvc: String,
    pub name: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub address_city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,
    pub address_country: String,
}

impl CardDetails {
    pub fn to_params(&self) -> Params {
        Params::new()
            .set("number", self.number.as_str())
            .set("expiry_month", self.expiry_month)
            .set("expiry_year", self.expiry_year)
            .set("cvc", self.cvc.as_str())
            .set("name", self.name.as_str())
            .set("address_line1", self.address_line1.as_str())
            .maybe("address_line2", self.address_line2.clone())
            .set("address_city", self.address_city.as_str())
            .maybe("address_postcode", self.address_postcode.clone())
            .maybe("address_state", self.address_state.clone())
            .set("address_country", self.address_country.as_str())
    }
}

/// A card supplied to an operation: either full details or the token of a
/// card the server already knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardInput {
    Details(CardDetails),
    Token(String),
}

impl CardInput {
    pub fn token(token: impl Into<String>) -> Self {
        CardInput::Token(token.into())
    }
}

impl From<CardDetails> for CardInput {
    fn from(details: CardDetails) -> Self {
        CardInput::Details(details)
    }
}

impl From<&Card> for CardInput {
    fn from(card: &Card) -> Self {
        CardInput::Token(card.token.clone())
    }
}

impl From<&str> for CardInput {
    fn from(token: &str) -> Self {
        CardInput::Token(token.to_string())
    }
}

impl From<String> for CardInput {
    fn from(token: String) -> Self {
        CardInput::Token(token)
    }
}

impl From<CardInput> for ParamValue {
    fn from(input: CardInput) -> Self {
        match input {
            CardInput::Details(details) => {
                ParamValue::Nested(marshal(Card::ATTRIBUTES, &details.to_params()))
            }
            CardInput::Token(token) => ParamValue::Reference(token),
        }
    }
}

impl From<&Card> for ParamValue {
    fn from(card: &Card) -> Self {
        ParamValue::Reference(card.token.clone())
    }
}
