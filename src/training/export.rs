//! Training log export in JSON or bincode.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::record::TrainingRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Collected training records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingLog {
    pub records: Vec<TrainingRecord>,
}

impl TrainingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TrainingRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = TrainingRecord>) {
        self.records.extend(records);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records from one game.
    pub fn game(&self, game_id: &str) -> impl Iterator<Item = &TrainingRecord> {
        let game_id = game_id.to_string();
        self.records.iter().filter(move |r| r.game_id == game_id)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_json<R: Read>(reader: R) -> Result<Self, ExportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_bincode<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn read_bincode<R: Read>(reader: R) -> Result<Self, ExportError> {
        Ok(bincode::deserialize_from(reader)?)
    }

    /// Write to `path`, picking bincode for a `.bin` extension and JSON otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        if is_binary(path) {
            self.write_bincode(&mut writer)?;
        } else {
            self.write_json(&mut writer)?;
        }
        writer.flush()?;
        log::info!("wrote {} training records to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a file written by `save`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        if is_binary(path) {
            Self::read_bincode(reader)
        } else {
            Self::read_json(reader)
        }
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}
