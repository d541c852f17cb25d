//! Environment overrides, in their own test binary since env is process-wide

use climate_ingest::settings::Settings;

#[test]
fn environment_configures_ingester() {
    std::env::set_var("CLIMATE_INGEST__INGESTERS__CLIMATE__KAFKA_BROKER", "localhost:9092");
    std::env::set_var("CLIMATE_INGEST__INGESTERS__CLIMATE__TOPIC", "climate-data");
    std::env::set_var("CLIMATE_INGEST__INGESTERS__CLIMATE__OUTPUT_PATH", "received_data.csv");
    std::env::set_var("CLIMATE_INGEST__INGESTERS__CLIMATE__FSYNC", "false");

    let settings = Settings::new(None).unwrap();
    let cfg = &settings.ingesters["climate"];
    assert_eq!(cfg.kafka_broker, "localhost:9092");
    assert_eq!(cfg.topic, "climate-data");
    assert_eq!(cfg.consumer_group.as_deref(), Some("climate"));
    assert!(!cfg.fsync);
}
