//! Extractors that never reject a browser submission.
//!
//! Every form and query field is raw text that the services parse with their
//! own fallbacks. Repeated keys keep their first value, a missing or foreign
//! content type is still read as url-encoded, and a path id that does not
//! decode to a number is simply absent.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// First value of every key in an url-encoded payload. Garbage decodes to nothing.
pub fn first_values(raw: &[u8]) -> Map<String, Value> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw).unwrap_or_default();
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
    fields
}

/// Decode an url-encoded payload into a struct of optional text fields.
pub fn decode_fields<T>(raw: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(Value::Object(first_values(raw))).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "form fields did not decode, using empty form");
        T::default()
    })
}

/// Url-encoded request body, whatever the request claims its content type is.
#[derive(Debug, Clone, Default)]
pub struct LenientForm<T>(pub T);

impl<S, T> FromRequest<S> for LenientForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Bytes::from_request(req, state).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable form body, using empty form");
                Bytes::new()
            }
        };
        Ok(Self(decode_fields(&body)))
    }
}

/// Query string decoded with the same first-value rule as [`LenientForm`].
#[derive(Debug, Clone, Default)]
pub struct LenientQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for LenientQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        Ok(Self(decode_fields(query.as_bytes())))
    }
}

/// The `{id}` segment of the route as a row id, `None` when it is not one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Option<i32>);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = match RawPathParams::from_request_parts(parts, state).await {
            Ok(params) => params
                .iter()
                .find(|(key, _)| *key == "id")
                .and_then(|(_, value)| value.parse::<i32>().ok()),
            Err(err) => {
                tracing::debug!(uri = %parts.uri, error = %err, "undecodable path id");
                None
            }
        };
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::orders::OrderForm;

    #[test]
    fn first_value_wins_for_repeated_keys() {
        let fields = first_values(b"qty=1&qty=2&city=Yangon");
        assert_eq!(fields["qty"], "1");
        assert_eq!(fields["city"], "Yangon");
    }

    #[test]
    fn decodes_into_optional_text_fields() {
        let form: OrderForm = decode_fields(b"product_id=2&customer_name=Ma+Hla&qty=3&extra=x");
        assert_eq!(form.product_id.as_deref(), Some("2"));
        assert_eq!(form.customer_name.as_deref(), Some("Ma Hla"));
        assert_eq!(form.qty.as_deref(), Some("3"));
        assert!(form.phone.is_none());
    }

    #[test]
    fn garbage_payload_is_an_empty_form() {
        let form: OrderForm = decode_fields(&[0xff, 0xfe, b'=', b'1']);
        assert!(form.qty.is_none());

        let form: OrderForm = decode_fields(b"");
        assert!(form.qty.is_none());
        assert!(form.customer_name.is_none());
    }
}
