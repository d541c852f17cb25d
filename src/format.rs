//! CSV line formatting
use csv::{QuoteStyle as CsvQuoteStyle, Terminator, WriterBuilder};
use serde::Deserialize;

use crate::error::IngestError;

/// How cell values containing delimiters are written
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Quote only cells containing a comma, quote or line break
    #[default]
    Necessary,
    /// Write cells verbatim. Embedded commas shift the columns.
    Never,
}

impl From<QuoteStyle> for CsvQuoteStyle {
    fn from(q: QuoteStyle) -> Self {
        match q {
            QuoteStyle::Necessary => CsvQuoteStyle::Necessary,
            QuoteStyle::Never => CsvQuoteStyle::Never,
        }
    }
}

/// Formats one CSV line terminated by `\n`
pub fn format_line<I, T>(values: I, quote: QuoteStyle) -> Result<String, IngestError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(quote.into())
        .from_writer(Vec::new());
    for v in values {
        w.write_field(v.as_ref())?;
    }
    w.write_record(None::<&[u8]>)?;
    let buf = w.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(buf).map_err(|e| {
        IngestError::Write(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
