//! JSON-lines placement sink.

use std::io::Write;

use async_trait::async_trait;

use motif::{
    placement::Placement,
    sink::{PlacementSink, SinkError},
};

/// Writes one JSON placement record per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> PlacementSink for JsonLinesSink<W> {
    async fn place(&mut self, placement: Placement) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &placement)
            .map_err(|err| SinkError::with_source("failed to encode placement", err))?;
        self.writer
            .write_all(b"\n")
            .map_err(|err| SinkError::with_source("failed to write placement", err))?;
        self.written += 1;
        Ok(())
    }
}
