use anyhow::Context;
use rdkafka::{
    config::ClientConfig,
    consumer::{CommitMode, Consumer, StreamConsumer},
    Message,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{decoder::get_decoder, pipeline::Pipeline, settings};

pub struct Ingester {
    name: String,
    topic: String,
    consumer: StreamConsumer,
    pipeline: Pipeline,
}

/// librdkafka consumer properties for an ingester.
/// Offsets are stored by hand once a message is handled and committed
/// in the background, so a commit never runs ahead of the CSV file.
pub fn client_config(name: &str, cfg: &settings::Ingester) -> ClientConfig {
    let mut client = ClientConfig::new();
    client
        .set("bootstrap.servers", &cfg.kafka_broker)
        .set("group.id", cfg.consumer_group.as_deref().unwrap_or(name))
        .set("auto.offset.reset", &cfg.auto_offset_reset)
        .set("enable.auto.commit", "true")
        .set("enable.auto.offset.store", "false")
        .set("enable.partition.eof", "false");
    for (k, v) in &cfg.kafka {
        client.set(k, v);
    }
    client
}

impl Ingester {
    pub async fn new(name: &str, cfg: settings::Ingester) -> Result<Ingester, anyhow::Error> {
        let decoder = get_decoder(&cfg.decoder, cfg.custom.clone())?;
        let decoder_name = decoder.get_name();
        let consumer: StreamConsumer = client_config(name, &cfg)
            .create()
            .context("creating kafka consumer")?;
        consumer
            .subscribe(&[cfg.topic.as_str()])
            .with_context(|| format!("subscribing to {}", cfg.topic))?;
        let pipeline = Pipeline::open(decoder, &cfg.output_path, cfg.quote_style, cfg.fsync).await?;
        info!(
            ingester = name,
            decoder = %decoder_name,
            "listening on topic {} at {}, writing to {}",
            cfg.topic,
            cfg.kafka_broker,
            pipeline.output_path().display()
        );
        Ok(Ingester {
            name: name.to_owned(),
            topic: cfg.topic,
            consumer,
            pipeline,
        })
    }

    /// Consumes until `shutdown` is cancelled. A message being handled
    /// when the signal arrives is finished first.
    pub async fn start(&mut self, shutdown: CancellationToken) {
        let mut stored = false;
        loop {
            let received = tokio::select! {
                _ = shutdown.cancelled() => break,
                r = self.consumer.recv() => r,
            };
            let msg = match received {
                Ok(msg) => msg,
                Err(e) => {
                    error!(ingester = %self.name, "error receiving message: {e}");
                    continue;
                }
            };
            debug!(
                ingester = %self.name,
                "message {}/{} at offset {}",
                msg.topic(),
                msg.partition(),
                msg.offset()
            );
            self.pipeline.process(msg.payload()).await;
            // failed messages are dropped for good, so their offsets are stored too
            match self.consumer.store_offset_from_message(&msg) {
                Ok(()) => stored = true,
                Err(e) => error!(ingester = %self.name, "failed to store offset: {e}"),
            }
        }
        info!(ingester = %self.name, "stopping consumption of {}", self.topic);
        if !stored {
            return;
        }
        match self.consumer.commit_consumer_state(CommitMode::Sync) {
            Ok(()) => info!(ingester = %self.name, "offsets committed"),
            Err(e) => warn!(ingester = %self.name, "final offset commit: {e}"),
        }
    }
}
