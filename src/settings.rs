//! Application config
use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::format::QuoteStyle;

/// Prefix of environment variables overriding config,
/// e.g. `CLIMATE_INGEST__INGESTERS__CLIMATE__TOPIC`
pub const ENV_PREFIX: &str = "CLIMATE_INGEST";

/// configuration of single topic ingester
#[derive(Deserialize, Debug)]
pub struct Ingester {
    /// name of decoder to use (default: climate)
    #[serde(default = "default_decoder")]
    pub decoder: String,
    /// address of bootstrap kafka broker
    pub kafka_broker: String,
    /// topic to ingest
    pub topic: String,
    /// consumer group to use (default: use ingester's name)
    pub consumer_group: Option<String>,
    /// where new consumer group starts reading (default: earliest)
    #[serde(default = "default_offset_reset")]
    pub auto_offset_reset: String,
    /// CSV file rows are appended to
    pub output_path: PathBuf,
    /// quoting of cells with commas, quotes or newlines (default: necessary)
    #[serde(default)]
    pub quote_style: QuoteStyle,
    /// sync every row to disk (default: true)
    #[serde(default = "default_fsync")]
    pub fsync: bool,
    /// extra librdkafka consumer properties
    #[serde(default)]
    pub kafka: HashMap<String, String>,
    /// Decoder-specific configuration
    pub custom: Option<toml::Value>,
}

fn default_decoder() -> String {
    String::from("climate")
}

fn default_offset_reset() -> String {
    String::from("earliest")
}

fn default_fsync() -> bool {
    true
}

#[derive(Deserialize, Debug)]
pub struct Settings {
    /// Map of ingester names and settings
    #[serde(default)]
    pub ingesters: HashMap<String, Ingester>,
}

impl Settings {
    /// Loads `config/default`, then `cfgfile`, then environment overrides
    pub fn new(cfgfile: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name("config/default").required(false));
        if let Some(f) = cfgfile {
            builder = builder.add_source(File::with_name(f).required(true));
        }
        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        for (name, cfg) in &mut settings.ingesters {
            cfg.consumer_group.get_or_insert_with(|| name.to_owned());
        }
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ingesters.is_empty() {
            return Err(ConfigError::Message(String::from(
                "no ingesters configured",
            )));
        }
        let mut paths = HashSet::new();
        for (name, cfg) in &self.ingesters {
            if !paths.insert(&cfg.output_path) {
                return Err(ConfigError::Message(format!(
                    "ingester {name}: output file {} is used by another ingester",
                    cfg.output_path.display()
                )));
            }
        }
        Ok(())
    }
}
