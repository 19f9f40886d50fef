//! Shared helpers for client integration tests
#![allow(dead_code)]

use pin_payment::prelude::*;
use tracing_subscriber::EnvFilter;
use url::Url;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SECRET_KEY: &str = "sk_test_5jLuoBOhRmtqNuhTqxB3TQ";
pub const CUSTOMER_TOKEN: &str = "cus_XZg1ULpWaROQCOT5PdwLkQ";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a mock API and a client pointed at it
pub async fn setup() -> (MockServer, ApiClient) {
    init_tracing();
    let server = MockServer::start().await;
    let config = Config::new(Url::parse(&server.uri()).unwrap(), SECRET_KEY);
    let client = ApiClient::new(&config).unwrap();
    (server, client)
}

pub fn respond(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

/// Mount a response for `verb path`, requiring the client's credentials
pub async fn mock(server: &MockServer, verb: &str, route: &str, status: u16, body: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .and(basic_auth(SECRET_KEY, ""))
        .respond_with(respond(status, body))
        .expect(1)
        .mount(server)
        .await;
}

pub fn card_details() -> CardDetails {
    CardDetails {
        number: "5520000000000000".to_string(),
        expiry_month: 5,
        expiry_year: 2030,
        cvc: "123".to_string(),
        name: "Roland Robot".to_string(),
        address_line1: "42 Sevenoaks St".to_string(),
        address_line2: None,
        address_city: "Lathlain".to_string(),
        address_postcode: Some("6454".to_string()),
        address_state: Some("WA".to_string()),
        address_country: "Australia".to_string(),
    }
}

/// A customer as returned by a successful create
pub async fn created_customer(server: &MockServer, client: &ApiClient) -> Customer {
    Mock::given(method("POST"))
        .and(path("/1/customers"))
        .respond_with(respond(201, include_str!("../fixtures/customer_created.json")))
        .up_to_n_times(1)
        .mount(server)
        .await;

    Customer::create(client, "roland@pin.net.au", Some(CardInput::from(card_details())))
        .await
        .unwrap()
}
