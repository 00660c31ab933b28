//! Response envelope decoding.
//!
//! The collection commands answer with `{"<Key>": payload}` or
//! `{"error": "..."}`. `getModel` answers with a list instead, whose first
//! element is either a `[tag, value]` pair or the model record itself, so it
//! gets its own decoder ([`ModelEnvelope`]).

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CarQueryError;
use crate::params::Command;
use crate::types::Record;

/// Field (or tag) the API uses to report a failed request.
const ERROR_FIELD: &str = "error";

/// Key name that selects the single-model decoding of `getModel`.
pub const MODEL_KEY: &str = "Model";

/// Which part of a response the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseScope<'a> {
    /// The whole parsed envelope.
    Whole,
    /// The value under one top-level field, `null` if the field is missing.
    Key(&'a str),
    /// The single-model response shape of `getModel`.
    Model,
}

impl<'a> ResponseScope<'a> {
    /// Scope for a top-level field name. An empty name means the whole body
    /// and `"Model"` selects the single-model decoding.
    pub fn for_key(key: &'a str) -> Self {
        match key {
            "" => ResponseScope::Whole,
            MODEL_KEY => ResponseScope::Model,
            key => ResponseScope::Key(key),
        }
    }

    /// Scope the API uses for `command`'s payload.
    pub fn for_command(command: Command) -> ResponseScope<'static> {
        match command.response_key() {
            Some(key) => ResponseScope::Key(key),
            None => ResponseScope::Model,
        }
    }
}

/// Decode a response body according to `scope`.
///
/// Fails with [`CarQueryError::Api`] when the body carries an error, and with
/// [`CarQueryError::Json`] when it is not JSON of the expected shape.
pub fn decode_envelope(body: &str, scope: ResponseScope<'_>) -> Result<Value, CarQueryError> {
    if scope == ResponseScope::Model {
        let envelope: ModelEnvelope =
            serde_json::from_str(body).map_err(|e| CarQueryError::json(e, body))?;
        return envelope.into_result().map(Value::Object);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| CarQueryError::json(e, body))?;
    let Value::Object(mut map) = value else {
        return Err(CarQueryError::json("expected a JSON object", body));
    };

    if let Some(error) = map.get(ERROR_FIELD) {
        return Err(CarQueryError::Api {
            message: message_text(error),
        });
    }

    match scope {
        ResponseScope::Key(key) => Ok(map.remove(key).unwrap_or(Value::Null)),
        _ => Ok(Value::Object(map)),
    }
}

/// Convert an unwrapped payload into a typed value.
pub fn payload_into<T: DeserializeOwned>(payload: Value) -> Result<T, CarQueryError> {
    T::deserialize(&payload).map_err(|e| CarQueryError::json(e, &payload.to_string()))
}

/// Convert an unwrapped collection payload into a list.
///
/// A missing payload, `null` or `{}` count as an empty result: an empty
/// match is never an error.
pub fn payload_into_list<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>, CarQueryError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Object(ref map) if map.is_empty() => Ok(Vec::new()),
        other => payload_into(other),
    }
}

/// Decoded `getModel` response.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEnvelope {
    /// The API rejected the request.
    Error(String),
    /// The model record; empty when nothing matched.
    Data(Record),
}

impl ModelEnvelope {
    /// Interpret a parsed `getModel` body.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Array(items) => match items.into_iter().next() {
                None | Some(Value::Null) => Ok(ModelEnvelope::Data(Map::new())),
                Some(Value::Array(pair)) => Self::from_pair(pair),
                Some(Value::Object(record)) => Ok(Self::from_object(record)),
                Some(other) => Err(format!("unexpected model entry: {other}")),
            },
            Value::Object(record) => Ok(Self::from_object(record)),
            other => Err(format!("unexpected model response: {other}")),
        }
    }

    fn from_pair(pair: Vec<Value>) -> Result<Self, String> {
        let mut pair = pair.into_iter();
        let (Some(Value::String(tag)), Some(value), None) = (pair.next(), pair.next(), pair.next())
        else {
            return Err("expected a [tag, value] pair".to_string());
        };

        if tag == ERROR_FIELD {
            return Ok(ModelEnvelope::Error(message_text(&value)));
        }

        match value {
            Value::Object(record) => Ok(ModelEnvelope::Data(record)),
            Value::Null => Ok(ModelEnvelope::Data(Map::new())),
            other => Err(format!("unexpected model record for tag {tag:?}: {other}")),
        }
    }

    fn from_object(mut record: Record) -> Self {
        match record.remove(ERROR_FIELD) {
            Some(error) => ModelEnvelope::Error(message_text(&error)),
            None => ModelEnvelope::Data(record),
        }
    }

    /// Turn the envelope into the record or an API error.
    pub fn into_result(self) -> Result<Record, CarQueryError> {
        match self {
            ModelEnvelope::Error(message) => Err(CarQueryError::Api { message }),
            ModelEnvelope::Data(record) => Ok(record),
        }
    }
}

impl<'de> Deserialize<'de> for ModelEnvelope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ModelEnvelope::from_value(value).map_err(de::Error::custom)
    }
}

/// Error messages are normally strings; anything else is kept as JSON text.
fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
