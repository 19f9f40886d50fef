use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::charge::Charge;
use super::{Fetch, FetchAll, Page, Resource, Submit};
use crate::client::marshal::{marshal, Attribute, Params};
use crate::client::ApiClient;
use crate::error::Result;

/// A refund against a previous charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Refund {
    token: String,
    fields: RefundFields,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RefundFields {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    amount: Option<u64>,
    #[serde(default)]
    currency: Option<String>,
    /// Token of the refunded charge
    #[serde(default)]
    charge: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    status_message: Option<String>,
}

impl Resource for Refund {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::server("token"),
        Attribute::writable("amount"),
        Attribute::server("success"),
        Attribute::server("currency"),
        Attribute::server("charge"),
        Attribute::server("created_at"),
        Attribute::server("error_message"),
        Attribute::server("status_message"),
    ];
    const COLLECTION_PATH: &'static str = "/1/refunds";

    type Fields = RefundFields;

    fn assemble(token: String, fields: RefundFields) -> Self {
        Self { token, fields }
    }

    fn token(&self) -> &str {
        &self.token
    }
}

fn charge_refunds_path(charge_token: &str) -> Result<String> {
    Ok(format!("{}/refunds", Charge::member_path(charge_token)?))
}

impl Refund {
    /// Refund a charge, in full when `amount` is `None`.
    pub async fn create(client: &ApiClient, charge_token: &str, amount: Option<u64>) -> Result<Self> {
        let path = charge_refunds_path(charge_token)?;
        let payload = marshal(Self::ATTRIBUTES, &Params::new().maybe("amount", amount));
        client
            .call(Submit::<Refund>::post(path, payload))
            .await
    }

    pub async fn find(client: &ApiClient, token: &str) -> Result<Self> {
        client.call(Fetch::<Refund>::new(Self::member_path(token)?)).await
    }

    /// First page of all refunds.
    pub async fn all(client: &ApiClient) -> Result<Page<Self>> {
        client
            .call(FetchAll::<Refund>::new(Self::COLLECTION_PATH))
            .await
    }

    /// Refunds issued against one charge.
    pub async fn for_charge(client: &ApiClient, charge_token: &str) -> Result<Page<Self>> {
        client
            .call(FetchAll::<Refund>::new(charge_refunds_path(charge_token)?))
            .await
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `None` while the refund is still pending.
    pub fn success(&self) -> Option<bool> {
        self.fields.success
    }

    pub fn amount(&self) -> Option<u64> {
        self.fields.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.fields.currency.as_deref()
    }

    pub fn charge_token(&self) -> Option<&str> {
        self.fields.charge.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.fields.created_at
    }

    pub fn error_message(&self) -> Option<&str> {
        self.fields.error_message.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.fields.status_message.as_deref()
    }
}
