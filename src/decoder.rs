//! Manages decoders
pub mod climate;
pub mod json;

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

use crate::error::IngestError;

/// CSV row - column values in header order
pub type Row = Vec<String>;

/// Decoder converts binary message from Kafka into CSV row
pub trait Decoder {
    fn get_name(&self) -> String;
    /// Column names, also used as the CSV header
    fn columns(&self) -> Vec<&str>;
    fn decode(&self, message: &[u8]) -> Result<Row, IngestError>;
}

/// Creates decoder of specified name.
/// If you add your own decoders, register them here
pub fn get_decoder(
    name: &str,
    decoder_settings: Option<toml::Value>,
) -> Result<Box<dyn Decoder + Send + Sync>> {
    match name {
        "climate" => Ok(Box::new(climate::Decoder {})),
        "json" => match decoder_settings {
            Some(s) => Ok(Box::new(json::new(s.try_into()?)?)),
            None => Err(anyhow!("json decoder config missing")),
        },
        _ => Err(anyhow!("unknown decoder {}", name)),
    }
}

/// Parses message as a JSON object
pub fn parse_object(message: &[u8]) -> Result<Map<String, Value>, IngestError> {
    let text = std::str::from_utf8(message)?;
    match serde_json::from_str(text)? {
        Value::Object(obj) => Ok(obj),
        Value::Array(_) => Err(IngestError::NotAnObject("array")),
        Value::String(_) => Err(IngestError::NotAnObject("string")),
        Value::Number(_) => Err(IngestError::NotAnObject("number")),
        Value::Bool(_) => Err(IngestError::NotAnObject("bool")),
        Value::Null => Err(IngestError::NotAnObject("null")),
    }
}

/// Picks `fields` out of `obj` in order, failing on the first absent one
pub fn extract<S: AsRef<str>>(
    obj: &Map<String, Value>,
    fields: &[S],
) -> Result<Row, IngestError> {
    fields
        .iter()
        .map(|f| {
            obj.get(f.as_ref())
                .map(stringify)
                .ok_or_else(|| IngestError::MissingField(f.as_ref().to_owned()))
        })
        .collect()
}

/// Renders JSON value as a bare CSV cell. Strings lose their quotes,
/// numbers keep their source text, null becomes empty, containers stay compact JSON.
pub fn stringify(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => v.to_string(),
    }
}
