//! Decode, format and append of a single message
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::{
    decoder::Decoder,
    error::IngestError,
    format::{format_line, QuoteStyle},
    sink::CsvSink,
};

pub struct Pipeline {
    decoder: Box<dyn Decoder + Send + Sync>,
    sink: CsvSink,
    quote: QuoteStyle,
}

impl Pipeline {
    /// Opens the output file, writing the decoder's header if the file is new or empty
    pub async fn open(
        decoder: Box<dyn Decoder + Send + Sync>,
        output_path: &Path,
        quote: QuoteStyle,
        fsync: bool,
    ) -> Result<Pipeline, anyhow::Error> {
        let header = format_line(decoder.columns(), quote)?;
        let sink = CsvSink::open(output_path, &header, fsync)
            .await
            .with_context(|| format!("opening output file {}", output_path.display()))?;
        Ok(Pipeline {
            decoder,
            sink,
            quote,
        })
    }

    /// Turns payload into a CSV row and appends it
    pub async fn handle(&mut self, payload: Option<&[u8]>) -> Result<(), IngestError> {
        let payload = payload.ok_or(IngestError::EmptyPayload)?;
        let row = self.decoder.decode(payload)?;
        let line = format_line(&row, self.quote)?;
        self.sink.append(&line).await?;
        Ok(())
    }

    /// Like [handle](Pipeline::handle), but logs and swallows the error.
    /// Returns whether a row was appended.
    pub async fn process(&mut self, payload: Option<&[u8]>) -> bool {
        if let Some(p) = payload {
            info!("received: {}", String::from_utf8_lossy(p));
        }
        match self.handle(payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!(kind = %e.kind(), "dropping message: {e}");
                false
            }
        }
    }

    pub fn output_path(&self) -> &Path {
        self.sink.path()
    }
}
