use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::card::{Card, CardInput};
use super::refund::Refund;
use super::{Fetch, FetchAll, Page, Resource, Submit};
use crate::client::marshal::{marshal, Attribute, ParamValue, Params, Payload};
use crate::client::ApiClient;
use crate::error::Result;

/// What a charge is taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeSource {
    /// Card details or a one-off card token.
    Card(CardInput),
    /// The primary card of a stored customer, by customer token.
    Customer(String),
}

impl From<CardInput> for ChargeSource {
    fn from(card: CardInput) -> Self {
        ChargeSource::Card(card)
    }
}

/// Parameters for a new charge. Amounts are in the currency's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharge {
    pub email: String,
    pub description: String,
    pub amount: u64,
    /// Defaults to AUD on the server when not set
    pub currency: Option<String>,
    pub ip_address: String,
    pub source: ChargeSource,
    /// Set to `false` to authorise now and capture later
    pub capture: Option<bool>,
}

impl NewCharge {
    pub fn to_params(&self) -> Params {
        let params = Params::new()
            .set("email", self.email.as_str())
            .set("description", self.description.as_str())
            .set("amount", self.amount)
            .maybe("currency", self.currency.clone())
            .set("ip_address", self.ip_address.as_str())
            .maybe("capture", self.capture);

        match &self.source {
            ChargeSource::Card(card) => params.set("card", card.clone()),
            ChargeSource::Customer(token) => {
                params.set("customer", ParamValue::Reference(token.clone()))
            }
        }
    }

    fn to_payload(&self) -> Payload {
        marshal(Charge::ATTRIBUTES, &self.to_params())
    }
}

/// A charge and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Charge {
    token: String,
    fields: ChargeFields,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChargeFields {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    amount: Option<u64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    ip_address: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    card: Option<Card>,
    #[serde(default)]
    captured: Option<bool>,
    #[serde(default)]
    amount_refunded: Option<u64>,
    #[serde(default)]
    refund_pending: Option<bool>,
}

impl Resource for Charge {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::server("token"),
        Attribute::writable("email"),
        Attribute::writable("description"),
        Attribute::writable("amount"),
        Attribute::writable("currency"),
        Attribute::writable("ip_address"),
        Attribute::writable("card"),
        Attribute::writable("customer"),
        Attribute::writable("capture"),
        Attribute::server("success"),
        Attribute::server("created_at"),
        Attribute::server("status_message"),
        Attribute::server("error_message"),
        Attribute::server("captured"),
        Attribute::server("amount_refunded"),
        Attribute::server("refund_pending"),
    ];
    const COLLECTION_PATH: &'static str = "/1/charges";

    type Fields = ChargeFields;

    fn assemble(token: String, fields: ChargeFields) -> Self {
        Self { token, fields }
    }

    fn token(&self) -> &str {
        &self.token
    }
}

impl Charge {
    pub async fn create(client: &ApiClient, charge: &NewCharge) -> Result<Self> {
        client
            .call(Submit::<Charge>::post(
                Self::COLLECTION_PATH,
                charge.to_payload(),
            ))
            .await
    }

    pub async fn find(client: &ApiClient, token: &str) -> Result<Self> {
        client.call(Fetch::<Charge>::new(Self::member_path(token)?)).await
    }

    /// First page of charges.
    pub async fn all(client: &ApiClient) -> Result<Page<Self>> {
        client
            .call(FetchAll::<Charge>::new(Self::COLLECTION_PATH))
            .await
    }

    /// Capture a charge that was created with `capture: Some(false)`.
    pub async fn capture(client: &ApiClient, token: &str) -> Result<Self> {
        let path = format!("{}/capture", Self::member_path(token)?);
        client.call(Submit::<Charge>::put(path, Payload::new())).await
    }

    /// Refund this charge, in full when `amount` is `None`.
    pub async fn refund(&self, client: &ApiClient, amount: Option<u64>) -> Result<Refund> {
        Refund::create(client, &self.token, amount).await
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_success(&self) -> bool {
        self.fields.success.unwrap_or(false)
    }

    pub fn amount(&self) -> Option<u64> {
        self.fields.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.fields.currency.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.description.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.fields.email.as_deref()
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.fields.ip_address.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.fields.created_at
    }

    pub fn status_message(&self) -> Option<&str> {
        self.fields.status_message.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.fields.error_message.as_deref()
    }

    pub fn card(&self) -> Option<&Card> {
        self.fields.card.as_ref()
    }

    pub fn is_captured(&self) -> bool {
        self.fields.captured.unwrap_or(false)
    }

    pub fn amount_refunded(&self) -> u64 {
        self.fields.amount_refunded.unwrap_or(0)
    }

    pub fn is_refund_pending(&self) -> bool {
        self.fields.refund_pending.unwrap_or(false)
    }
}
