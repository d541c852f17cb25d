use super::{extract, parse_object, Row};
use crate::error::IngestError;

/// Fields of an air-quality reading, in CSV column order
pub const FIELDS: [&str; 6] = [
    "timestamp",
    "city",
    "aqi",
    "weather_icon",
    "wind_speed",
    "humidity",
];

pub struct Decoder;

impl super::Decoder for Decoder {
    fn get_name(&self) -> String {
        String::from("climate")
    }
    fn columns(&self) -> Vec<&str> {
        FIELDS.to_vec()
    }
    fn decode(&self, message: &[u8]) -> Result<Row, IngestError> {
        let obj = parse_object(message)?;
        extract(&obj, &FIELDS)
    }
}
