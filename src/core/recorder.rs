//! Interaction recording and playback.
//!
//! A record is a JSON-lines file: a header object followed by one
//! [`InputEvent`] per line. The recorder keeps state between uses, so it must
//! be switched off and cleared before each new record or playback.

use super::event::InputEvent;
use crate::error::{InteractorError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const RECORD_FORMAT: &str = "view-interactor";
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct RecordHeader {
    format: String,
    version: u32,
    recorded_at: String,
}

/// Writes dispatched events to a record file and reads them back
#[derive(Debug, Default)]
pub struct EventRecorder {
    file_name: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    enabled: bool,
    recorded: usize,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        self.file_name = Some(path.into());
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn on(&mut self) {
        self.enabled = true;
    }

    /// Stop recording and flush what was written so far
    pub fn off(&mut self) -> Result<()> {
        self.enabled = false;
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Drop any open stream and reset counters
    pub fn clear(&mut self) {
        self.writer = None;
        self.recorded = 0;
    }

    pub fn is_recording(&self) -> bool {
        self.enabled && self.writer.is_some()
    }

    /// Number of events written since the last `record`
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Create the record file and write its header
    pub fn record(&mut self) -> Result<()> {
        let path = self.file_name.clone().ok_or(InteractorError::EmptyRecordPath)?;
        let mut writer = BufWriter::new(File::create(&path)?);
        let header = RecordHeader {
            format: RECORD_FORMAT.to_string(),
            version: RECORD_VERSION,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        };
        serde_json::to_writer(&mut writer, &header)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        self.writer = Some(writer);
        self.recorded = 0;
        log::info!("Recording interaction to {}", path.display());
        Ok(())
    }

    /// Append an event when recording, otherwise do nothing
    pub fn record_event(&mut self, event: &InputEvent) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if let Some(writer) = self.writer.as_mut() {
            serde_json::to_writer(&mut *writer, event)?;
            writer.write_all(b"\n")?;
            self.recorded += 1;
        }
        Ok(())
    }

    /// Read every event of the record file
    pub fn play(&self) -> Result<Vec<InputEvent>> {
        let path = self.file_name.clone().ok_or(InteractorError::EmptyRecordPath)?;
        let invalid = |reason: String| InteractorError::InvalidRecord {
            path: path.clone(),
            reason,
        };

        let reader = BufReader::new(File::open(&path)?);
        let mut lines = reader.lines();

        let header_line = lines.next().ok_or_else(|| invalid("empty file".to_string()))??;
        let header: RecordHeader =
            serde_json::from_str(&header_line).map_err(|e| invalid(format!("bad header: {e}")))?;
        if header.format != RECORD_FORMAT || header.version != RECORD_VERSION {
            return Err(invalid(format!(
                "unsupported format {} v{}",
                header.format, header.version
            )));
        }

        let mut events = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line)
                .map_err(|e| invalid(format!("line {}: {e}", index + 2)))?;
            events.push(event);
        }
        log::debug!(
            "Loaded {} events recorded at {} from {}",
            events.len(),
            header.recorded_at,
            path.display()
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("view-interactor-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_record_then_play() {
        let path = temp_path("record-play.jsonl");
        let mut recorder = EventRecorder::new();
        recorder.set_file_name(&path);
        recorder.on();
        recorder.record().unwrap();
        recorder.record_event(&InputEvent::key('g')).unwrap();
        recorder.record_event(&InputEvent::named("Return")).unwrap();
        assert_eq!(recorder.recorded(), 2);
        recorder.off().unwrap();

        let events = recorder.play().unwrap();
        assert_eq!(events, vec![InputEvent::key('g'), InputEvent::named("Return")]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_events_ignored_when_off() {
        let path = temp_path("off.jsonl");
        let mut recorder = EventRecorder::new();
        recorder.set_file_name(&path);
        recorder.record().unwrap();
        recorder.record_event(&InputEvent::key('g')).unwrap();
        assert_eq!(recorder.recorded(), 0);
        assert!(!recorder.is_recording());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_play_rejects_foreign_file() {
        let path = temp_path("foreign.jsonl");
        std::fs::write(&path, "{\"format\":\"other\",\"version\":1,\"recorded_at\":\"\"}\n").unwrap();
        let mut recorder = EventRecorder::new();
        recorder.set_file_name(&path);
        assert!(matches!(recorder.play(), Err(InteractorError::InvalidRecord { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_record_without_file_name() {
        let mut recorder = EventRecorder::new();
        assert!(matches!(recorder.record(), Err(InteractorError::EmptyRecordPath)));
    }
}
