use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::card::{Card, CardInput};
use super::{token_segment, Fetch, FetchAll, Page, Remove, Resource, Submit};
use crate::client::marshal::{marshal, Attribute, ParamValue, Params, Payload};
use crate::client::ApiClient;
use crate::error::Result;

/// A customer stored with the API, along with their primary card.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    token: String,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    card: Option<Card>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerFields {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    card: Option<Card>,
}

impl Resource for Customer {
    const ATTRIBUTES: &'static [Attribute] = &[
        Attribute::server("token"),
        Attribute::writable("email"),
        Attribute::server("created_at"),
        Attribute::writable("card"),
    ];
    const COLLECTION_PATH: &'static str = "/1/customers";

    type Fields = CustomerFields;

    fn assemble(token: String, fields: CustomerFields) -> Self {
        Self {
            token,
            email: fields.email,
            created_at: fields.created_at,
            card: fields.card,
        }
    }

    fn token(&self) -> &str {
        &self.token
    }
}

fn cards_path(customer_token: &str) -> Result<String> {
    Ok(format!("{}/cards", Customer::member_path(customer_token)?))
}

fn write_payload(email: &str, card: Option<CardInput>) -> Payload {
    let params = Params::new().set("email", email).maybe("card", card);
    marshal(Customer::ATTRIBUTES, &params)
}

impl Customer {
    /// Create a customer, optionally storing a card against them.
    pub async fn create(client: &ApiClient, email: &str, card: Option<CardInput>) -> Result<Self> {
        let payload = write_payload(email, card);
        client
            .call(Submit::<Customer>::post(Self::COLLECTION_PATH, payload))
            .await
    }

    pub async fn find(client: &ApiClient, token: &str) -> Result<Self> {
        client.call(Fetch::<Customer>::new(Self::member_path(token)?)).await
    }

    /// First page of customers.
    pub async fn all(client: &ApiClient) -> Result<Page<Self>> {
        client
            .call(FetchAll::<Customer>::new(Self::COLLECTION_PATH))
            .await
    }

    /// Update the customer identified by `token` without fetching it first.
    ///
    /// Only the token, email and card are known afterwards.
    pub async fn update_by_token(
        client: &ApiClient,
        token: &str,
        email: &str,
        card: Option<CardInput>,
    ) -> Result<Self> {
        let mut customer = Self::with_token(token);
        customer.update(client, email, card).await?;
        Ok(customer)
    }

    /// Update this customer's email and card.
    ///
    /// On success the email and card are replaced with what the server
    /// reports. The token and creation time are left alone.
    pub async fn update(
        &mut self,
        client: &ApiClient,
        email: &str,
        card: Option<CardInput>,
    ) -> Result<&mut Self> {
        let path = Self::member_path(&self.token)?;
        let payload = write_payload(email, card);
        let updated = client
            .call(Submit::<Customer>::put(path, payload))
            .await?;

        self.email = updated.email;
        self.card = updated.card;
        Ok(self)
    }

    pub async fn delete(client: &ApiClient, token: &str) -> Result<()> {
        client.call(Remove::new(Self::member_path(token)?)).await
    }

    /// Cards stored against the customer.
    pub async fn find_cards(client: &ApiClient, token: &str) -> Result<Page<Card>> {
        client.call(FetchAll::<Card>::new(cards_path(token)?)).await
    }

    /// Store an additional card against the customer.
    pub async fn add_card(
        client: &ApiClient,
        customer_token: &str,
        card: impl Into<CardInput>,
    ) -> Result<Card> {
        let path = cards_path(customer_token)?;
        let params = Params::new().set("card", card.into());
        let payload = marshal(&[Attribute::writable("card")], &params);
        client
            .call(Submit::<Card>::post(path, payload))
            .await
    }

    pub async fn remove_card(client: &ApiClient, customer_token: &str, card_token: &str) -> Result<()> {
        let path = format!("{}/{}", cards_path(customer_token)?, token_segment(card_token)?);
        client.call(Remove::new(path)).await
    }

    fn with_token(token: &str) -> Self {
        Self {
            token: token.to_string(),
            email: None,
            created_at: None,
            card: None,
        }
    }

    /// Every attribute this instance holds, as marshaller input.
    pub fn to_params(&self) -> Params {
        Params::new()
            .set("token", self.token.as_str())
            .maybe("email", self.email.clone())
            .maybe("created_at", self.created_at.map(|t| t.to_rfc3339()))
            .maybe("card", self.card.as_ref().map(ParamValue::from))
    }

    /// The payload an update of this customer would send.
    pub fn update_payload(&self) -> Payload {
        marshal(Self::ATTRIBUTES, &self.to_params())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded() -> Customer {
        let object = json!({
            "token": "cus_XZg1ULpWaROQCOT5PdwLkQ",
            "email": "roland@pin.net.au",
            "created_at": "2012-06-22T06:27:33Z",
            "card": {
                "token": "card_nytGw7koRg23EEp9NTmz9w",
                "display_number": "XXXX-XXXX-XXXX-0000",
                "scheme": "master"
            }
        })
        .as_object()
        .cloned()
        .unwrap();
        Customer::from_attributes(object).unwrap()
    }

    #[test]
    fn test_decoding_separates_token() {
        let customer = decoded();
        assert_eq!(customer.token(), "cus_XZg1ULpWaROQCOT5PdwLkQ");
        assert_eq!(customer.email(), Some("roland@pin.net.au"));
        assert_eq!(
            customer.created_at().unwrap().to_rfc3339(),
            "2012-06-22T06:27:33+00:00"
        );
        assert_eq!(customer.card().unwrap().token(), "card_nytGw7koRg23EEp9NTmz9w");
    }

    #[test]
    fn test_remarshalling_drops_server_assigned_fields() {
        let customer = decoded();
        let params = customer.to_params();
        assert!(params.get("token").is_some());
        assert!(params.get("created_at").is_some());

        let payload = customer.update_payload();
        assert!(!payload.contains_key("token"));
        assert!(!payload.contains_key("created_at"));
        assert_eq!(
            payload,
            json!({
                "email": "roland@pin.net.au",
                "card_token": "card_nytGw7koRg23EEp9NTmz9w"
            })
            .as_object()
            .cloned()
            .unwrap()
        );
    }

    #[test]
    fn test_write_payload_with_token_or_details() {
        let payload = write_payload("a@b.c", Some(CardInput::token("card_1")));
        assert_eq!(payload["card_token"], json!("card_1"));
        assert!(!payload.contains_key("card"));

        let payload = write_payload("a@b.c", None);
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Customer::member_path("cus_1").unwrap(), "/1/customers/cus_1");
        assert_eq!(cards_path("cus_1").unwrap(), "/1/customers/cus_1/cards");
        assert!(cards_path("cus_1/cards/card_1").is_err());
    }
}
