//! Outgoing request payloads.
//!
//! Each resource declares a fixed list of [`Attribute`]s. Operations collect
//! the values they want to send into [`Params`] and [`marshal`] turns those
//! into the JSON body, keeping only declared attributes the client is
//! allowed to write.

use serde_json::{Map, Value};

/// JSON object sent as a request body.
pub type Payload = Map<String, Value>;

/// Decoded JSON object describing a resource.
pub type Attributes = Map<String, Value>;

/// Static descriptor for one attribute of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    /// Assigned by the server (tokens, timestamps, outcomes) and never sent.
    pub server_assigned: bool,
}

impl Attribute {
    pub const fn writable(name: &'static str) -> Self {
        Self {
            name,
            server_assigned: false,
        }
    }

    pub const fn server(name: &'static str) -> Self {
        Self {
            name,
            server_assigned: true,
        }
    }
}

/// A candidate value for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Sent as-is under the attribute name.
    Value(Value),
    /// An embedded object, sent as-is under the attribute name.
    Nested(Attributes),
    /// The token of another resource, sent under `<name>_token`.
    Reference(String),
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Value(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

/// Ordered bag of candidate values keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Vec<(&'static str, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any earlier value for the same name.
    pub fn set(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    /// Set a value only when one is present.
    pub fn maybe<V: Into<ParamValue>>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build a request payload from `params`.
///
/// Only declared, client-writable attributes are emitted, in declaration
/// order. Undeclared names, server-assigned attributes and explicit nulls
/// are dropped.
pub fn marshal(attributes: &[Attribute], params: &Params) -> Payload {
    let mut payload = Payload::new();

    for attribute in attributes.iter().filter(|a| !a.server_assigned) {
        let Some(value) = params.get(attribute.name) else {
            continue;
        };

        match value {
            ParamValue::Value(Value::Null) => {}
            ParamValue::Value(value) => {
                payload.insert(attribute.name.to_string(), value.clone());
            }
            ParamValue::Nested(object) => {
                payload.insert(attribute.name.to_string(), Value::Object(object.clone()));
            }
            ParamValue::Reference(token) => {
                payload.insert(format!("{}_token", attribute.name), Value::from(token.as_str()));
            }
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ATTRIBUTES: &[Attribute] = &[
        Attribute::server("token"),
        Attribute::writable("email"),
        Attribute::server("created_at"),
        Attribute::writable("card"),
    ];

    fn keys(payload: &Payload) -> Vec<&str> {
        payload.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_unsupplied_attributes_are_omitted() {
        let params = Params::new().set("email", "roland@pin.net.au");
        let payload = marshal(ATTRIBUTES, &params);
        assert_eq!(keys(&payload), vec!["email"]);
        assert_eq!(payload["email"], json!("roland@pin.net.au"));
    }

    #[test]
    fn test_server_assigned_attributes_are_never_sent() {
        let params = Params::new()
            .set("token", "cus_XZg1ULpWaROQCOT5PdwLkQ")
            .set("created_at", "2012-06-22T06:27:33Z")
            .set("email", "roland@pin.net.au");
        let payload = marshal(ATTRIBUTES, &params);
        assert_eq!(keys(&payload), vec!["email"]);
    }

    #[test]
    fn test_undeclared_names_are_dropped() {
        let params = Params::new()
            .set("email", "a@b.c")
            .set("nickname", "roly");
        let payload = marshal(ATTRIBUTES, &params);
        assert!(!payload.contains_key("nickname"));
    }

    #[test]
    fn test_reference_becomes_token_key() {
        let params = Params::new()
            .set("email", "a@b.c")
            .set("card", ParamValue::Reference("card_nytGw7koRg23EEp9NTmz9w".into()));
        let payload = marshal(ATTRIBUTES, &params);
        assert_eq!(keys(&payload), vec!["email", "card_token"]);
        assert_eq!(payload["card_token"], json!("card_nytGw7koRg23EEp9NTmz9w"));
    }

    #[test]
    fn test_nested_object_kept_under_name() {
        let mut card = Attributes::new();
        card.insert("number".into(), json!("5520000000000000"));
        let params = Params::new().set("card", ParamValue::Nested(card));
        let payload = marshal(ATTRIBUTES, &params);
        assert_eq!(payload["card"], json!({ "number": "5520000000000000" }));
        assert!(!payload.contains_key("card_token"));
    }

    #[test]
    fn test_declared_order_wins_over_insertion_order() {
        let params = Params::new()
            .set("card", ParamValue::Reference("card_1".into()))
            .set("email", "a@b.c");
        let payload = marshal(ATTRIBUTES, &params);
        assert_eq!(keys(&payload), vec!["email", "card_token"]);
    }

    #[test]
    fn test_null_and_missing_optional_values() {
        let params = Params::new()
            .set("email", Value::Null)
            .maybe::<String>("card", None);
        assert!(marshal(ATTRIBUTES, &params).is_empty());
    }

    #[test]
    fn test_set_replaces_earlier_value() {
        let params = Params::new().set("email", "old@b.c").set("email", "new@b.c");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("email"), Some(&ParamValue::from("new@b.c")));
    }
}
