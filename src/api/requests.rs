//! Request payloads and their validation
//!
//! Bodies are deserialized by axum's `Json` extractor. Rejections are turned
//! into a `PayloadRejection` that names the offending field and the reason.

use axum::extract::rejection::JsonRejection;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use utoipa::ToSchema;

use crate::database::models::NewOrder;

/// Request to create a new order
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// The stock symbol (e.g., "KMD")
    #[schema(example = "KMD")]
    pub symbol: String,
    /// The price per unit of the stock
    #[schema(example = 12.5)]
    pub price: f64,
    /// Number of units to trade
    #[schema(example = 10)]
    #[serde(deserialize_with = "deserialize_integral")]
    pub quantity: i64,
    /// Type of order, either "buy" or "sell"
    #[schema(example = "buy")]
    pub order_type: String,
}

/// Why an order payload was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadRejection {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedContentType,

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing field `{0}`")]
    MissingField(String),

    #[error("Field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid request body: {0}")]
    Unreadable(String),
}

impl CreateOrderRequest {
    /// Checks that deserialization cannot express
    pub fn validate(self) -> Result<Self, PayloadRejection> {
        if self.symbol.is_empty() {
            return Err(PayloadRejection::EmptyField("symbol"));
        }
        Ok(self)
    }
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder::new(
            request.symbol,
            request.price,
            request.quantity,
            request.order_type,
        )
    }
}

impl From<JsonRejection> for PayloadRejection {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(e) => PayloadRejection::MalformedJson(e.body_text()),
            JsonRejection::JsonDataError(e) => PayloadRejection::from_data_error(&e.body_text()),
            JsonRejection::MissingJsonContentType(_) => PayloadRejection::UnsupportedContentType,
            other => PayloadRejection::Unreadable(other.body_text()),
        }
    }
}

impl PayloadRejection {
    /// Classify a deserialization failure from its serde message.
    ///
    /// Handles the shapes serde produces for a typed struct:
    /// `missing field `x``, `x: invalid type: ...` and a top-level
    /// `invalid type: ..., expected struct ...`.
    pub fn from_data_error(text: &str) -> Self {
        let detail = text
            .split_once("target type: ")
            .map(|(_, detail)| detail)
            .unwrap_or(text);
        let detail = detail
            .rsplit_once(" at line ")
            .map(|(detail, _)| detail)
            .unwrap_or(detail);

        if let Some(rest) = detail.strip_prefix("missing field `") {
            return PayloadRejection::MissingField(rest.trim_end_matches('`').to_string());
        }

        if let Some((field, reason)) = detail.split_once(": ") {
            if is_type_mismatch(reason) {
                return PayloadRejection::WrongType {
                    field: field.to_string(),
                    expected: expected_type(field),
                };
            }
        }

        if is_type_mismatch(detail) {
            return PayloadRejection::NotAnObject;
        }

        PayloadRejection::Unreadable(detail.to_string())
    }
}

fn is_type_mismatch(reason: &str) -> bool {
    reason.starts_with("invalid type") || reason.starts_with("invalid value")
}

fn expected_type(field: &str) -> &'static str {
    match field {
        "price" => "a number",
        "quantity" => "an integer",
        _ => "a string",
    }
}

// Integral floats such as `10.0` are accepted; `10.5` is not.
fn deserialize_integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;

    if let Some(value) = number.as_i64() {
        return Ok(value);
    }

    let float = number.as_f64().unwrap_or(f64::NAN);
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Ok(float as i64)
    } else {
        Err(de::Error::invalid_value(Unexpected::Float(float), &"an integer"))
    }
}
