//! Generic JSON decoder, picks configured top-level keys
use anyhow::anyhow;
use serde::Deserialize;

use super::{extract, parse_object, Row};
use crate::error::IngestError;

/// `custom` section of ingester config
#[derive(Deserialize)]
pub struct Settings {
    /// keys to extract, in CSV column order
    pub fields: Vec<String>,
}

pub struct Decoder {
    fields: Vec<String>,
}

pub fn new(settings: Settings) -> Result<Decoder, anyhow::Error> {
    if settings.fields.is_empty() {
        return Err(anyhow!("json decoder needs at least one field"));
    }
    for (i, f) in settings.fields.iter().enumerate() {
        if settings.fields[..i].contains(f) {
            return Err(anyhow!("duplicate field {f}"));
        }
    }
    Ok(Decoder {
        fields: settings.fields,
    })
}

impl super::Decoder for Decoder {
    fn get_name(&self) -> String {
        String::from("json")
    }

    fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(String::as_str).collect()
    }

    fn decode(&self, message: &[u8]) -> Result<Row, IngestError> {
        let obj = parse_object(message)?;
        extract(&obj, &self.fields)
    }
}
