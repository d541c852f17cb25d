//! Append-only CSV file
use std::path::{Path, PathBuf};

use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
};
use tracing::info;

pub struct CsvSink {
    path: PathBuf,
    file: File,
    fsync: bool,
}

impl CsvSink {
    /// Opens `path` for appending. `header` is written only if the file
    /// turns out to be empty, so reopening a populated file never repeats it.
    pub async fn open(path: &Path, header: &str, fsync: bool) -> std::io::Result<CsvSink> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        let mut sink = CsvSink {
            path: path.to_owned(),
            file,
            fsync,
        };
        if sink.file.metadata().await?.len() == 0 {
            info!("writing CSV header to {}", path.display());
            sink.append(header).await?;
        }
        Ok(sink)
    }

    /// Appends one line and pushes it to disk before returning
    pub async fn append(&mut self, line: &str) -> std::io::Result<()> {
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        if self.fsync {
            self.file.sync_data().await?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
