//! Trade sink: append executed trades to a JSON-lines file.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::SinkError;

pub struct TradeSink {
    path: PathBuf,
    file: File,
}

impl TradeSink {
    /// Open (creating if necessary) the trade file at `path`, creating
    /// its parent directory if it doesn't exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| SinkError::CreateDir {
                        path: parent.display().to_string(),
                        source,
                    })?;
                debug!(dir = %parent.display(), "created trade sink directory");
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| SinkError::Open {
                path: path.display().to_string(),
                source,
            })?;

        Ok(TradeSink { path, file })
    }

    /// Append one JSON-encoded trade, followed by a newline, flushing
    /// immediately so a crash doesn't lose a buffered record.
    pub async fn write(&mut self, json: &[u8]) -> Result<(), SinkError> {
        let result = match self.file.write_all(json).await {
            Ok(()) => self.file.write_all(b"\n").await,
            Err(source) => Err(source),
        };
        result
            .map_err(|source| SinkError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        self.file.flush().await.map_err(|source| SinkError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_parent_directory_and_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trades.jsonl");

        let mut sink = TradeSink::open(&path).await.unwrap();
        sink.write(br#"{"a":1}"#).await.unwrap();
        sink.write(br#"{"a":2}"#).await.unwrap();

        let contents = fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"a\":2}\n");
    }

    #[tokio::test]
    async fn reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.jsonl");

        TradeSink::open(&path)
            .await
            .unwrap()
            .write(br#"{"a":1}"#)
            .await
            .unwrap();
        TradeSink::open(&path)
            .await
            .unwrap()
            .write(br#"{"a":2}"#)
            .await
            .unwrap();

        let contents = fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"a\":2}\n");
    }
}
