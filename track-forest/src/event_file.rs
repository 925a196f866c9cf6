//! Event file input boundary
//!
//! Parses the JSON event file that carries one event's track batch into the
//! library. The file is a single object with a `tracks` array; each entry
//! holds the track fields with the kinematic vectors as JSON arrays.
//!
//! ## Tolerance
//! - A kinematic vector with a component count other than 4 is replaced by
//!   all-NaN and logged. The track stays in the batch so the genealogy is
//!   unaffected, but it can never pass the keep predicate or yield endpoints,
//!   so it is pruned from the output.
//! - Missing `parent_id` defaults to 0 (primary); missing `child_ids` to an
//!   empty list.
//!
//! File-level failures (unreadable file, invalid JSON, wrong top-level
//! shape) abort the whole event.

use crate::types::{Result, Track, TrackError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One event's track batch, loaded from a JSON event file.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFile {
    /// Tracks in batch order
    pub tracks: Vec<Track>,
}

impl EventFile {
    /// Read and parse an event file from disk.
    pub fn read(path: &Path) -> Result<EventFile> {
        log::info!("Reading event file: {:?}", path);
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse an event from JSON text.
    pub fn parse(text: &str) -> Result<EventFile> {
        let raw: RawEvent = serde_json::from_str(text)
            .map_err(|e| TrackError::EventParseError(e.to_string()))?;

        let tracks: Vec<Track> = raw.tracks.into_iter().map(RawTrack::into_track).collect();
        log::debug!("Loaded {} tracks from event file", tracks.len());

        Ok(EventFile { tracks })
    }

    /// Number of tracks in the batch.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when the batch holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    tracks: Vec<RawTrack>,
}

/// Deserialization shape for one track, with variable-length kinematic
/// vectors so a malformed entry degrades instead of failing the event.
#[derive(Debug, Deserialize)]
struct RawTrack {
    id: i32,
    pdg: i32,
    #[serde(default)]
    parent_id: i32,
    #[serde(default)]
    child_ids: Vec<i32>,
    #[serde(default)]
    start_xyzt: Vec<f64>,
    #[serde(default)]
    end_xyzt: Vec<f64>,
    #[serde(default)]
    start_momentum: Vec<f64>,
}

impl RawTrack {
    fn into_track(self) -> Track {
        let start_xyzt = fixed4(&self.start_xyzt, self.id, "start_xyzt");
        let end_xyzt = fixed4(&self.end_xyzt, self.id, "end_xyzt");
        let start_momentum = fixed4(&self.start_momentum, self.id, "start_momentum");
        Track {
            id: self.id,
            pdg: self.pdg,
            parent_id: self.parent_id,
            child_ids: self.child_ids,
            start_xyzt,
            end_xyzt,
            start_momentum,
        }
    }
}

/// Convert a raw kinematic vector into the fixed 4-component form,
/// degrading to all-NaN when the component count is wrong.
fn fixed4(raw: &[f64], track_id: i32, field: &str) -> [f64; 4] {
    match <[f64; 4]>::try_from(raw) {
        Ok(components) => components,
        Err(_) => {
            log::warn!(
                "Track {}: {} has {} components (expected 4), track will be pruned",
                track_id,
                field,
                raw.len()
            );
            [f64::NAN; 4]
        }
    }
}
