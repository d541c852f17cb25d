//! ## climate-ingest
//! Service for real-time ingestion of JSON messages from Kafka into append-only CSV files.
//!
//! ## Configuration
//! Example config:
//! ```toml
//! [ingesters.climate]
//! decoder = "climate"                     # timestamp,city,aqi,weather_icon,wind_speed,humidity
//! kafka_broker = "localhost:9092"
//! topic = "climate-data"
//! consumer_group = "climate-group"        # defaults to ingester's name
//! output_path = "received_data.csv"
//! quote_style = "necessary"               # or "never" to write cells verbatim
//! fsync = true
//!
//! [ingesters.stations]
//! decoder = "json"                        # generic decoder
//! kafka_broker = "localhost:9092"
//! topic = "stations"
//! output_path = "stations.csv"
//! custom.fields = ["id", "lat", "lon"]    # columns, in order
//! ```
//! Any option may be overridden from the environment,
//! e.g. `CLIMATE_INGEST__INGESTERS__CLIMATE__TOPIC=other-topic`.
//!
//! ## Extending
//! Other message layouts are supported by writing own implementations of [Decoder] trait
//! and registering them in [get_decoder].
//!
//! [Decoder]: decoder::Decoder
//! [get_decoder]: decoder::get_decoder
//!
//! ## Kafka and CSV
//! Every message is decoded, appended as one CSV row and flushed to disk before the next
//! one is received. Messages that cannot be decoded are logged and skipped.
//! Offsets are stored only after a message was handled, and committed in background
//! by the consumer group, so on restart ingestion resumes right after the last handled
//! message. Redelivered messages produce duplicate rows.

pub mod decoder;
pub mod error;
pub mod format;
pub mod ingester;
pub mod pipeline;
pub mod settings;
pub mod sink;
