//! Core types for the track-forest library
//!
//! This module defines the track record consumed by the genealogy resolver
//! and the error type shared across the library. A batch of tracks is one
//! simulated event; the batch is rebuilt from scratch for every event and
//! never outlives it.

use serde::{Deserialize, Serialize};

/// Result type for library operations
pub type Result<T> = std::result::Result<T, TrackError>;

/// One simulated particle's full lifetime record within a single event.
///
/// Tracks reference each other by `id`, not by position in the batch; ids
/// are unique within the event but not necessarily dense. Momentum
/// components are stored in GeV (the convention of the source data), while
/// kinetic energy is exposed in MeV to match the display and the pruning
/// thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier, unique within the event
    pub id: i32,
    /// Signed PDG species code; composite nuclei use the 10LZZZAAAI
    /// encoding (all values above 1e9)
    pub pdg: i32,
    /// Id of the mother track; 0 means this track is a primary
    pub parent_id: i32,
    /// Ids of direct daughters, in creation order (may be empty)
    pub child_ids: Vec<i32>,
    /// Start position and time `(x, y, z, t)`
    pub start_xyzt: [f64; 4],
    /// End position and time `(x, y, z, t)`
    pub end_xyzt: [f64; 4],
    /// Start momentum `(px, py, pz, E)` in GeV
    pub start_momentum: [f64; 4],
}

impl Track {
    /// True if this track was created at the event origin (no mother).
    pub fn is_primary(&self) -> bool {
        self.parent_id == 0
    }

    /// Kinetic energy in MeV, derived from the start momentum 4-vector as
    /// `E - m` with the invariant mass taken from the same vector.
    ///
    /// Returns `None` when any momentum component is non-finite; such a
    /// track cannot be evaluated by the keep predicate and is dropped from
    /// output rather than failing the event.
    pub fn kinetic_energy_mev(&self) -> Option<f64> {
        if !self.start_momentum.iter().all(|c| c.is_finite()) {
            return None;
        }
        let [px, py, pz, e] = self.start_momentum;
        let mass_sq = e * e - (px * px + py * py + pz * pz);
        // Rounding can push a massless vector slightly spacelike; clamp at
        // zero so photons evaluate to KE = E.
        let mass = if mass_sq > 0.0 { mass_sq.sqrt() } else { 0.0 };
        Some((e - mass) * 1000.0)
    }

    /// Spatial start point `[x, y, z]`, dropping the time component.
    /// `None` when any component is non-finite.
    pub fn start_point(&self) -> Option<[f64; 3]> {
        spatial(&self.start_xyzt)
    }

    /// Spatial end point `[x, y, z]`, dropping the time component.
    /// `None` when any component is non-finite.
    pub fn end_point(&self) -> Option<[f64; 3]> {
        spatial(&self.end_xyzt)
    }
}

fn spatial(xyzt: &[f64; 4]) -> Option<[f64; 3]> {
    let point = [xyzt[0], xyzt[1], xyzt[2]];
    if point.iter().all(|c| c.is_finite()) {
        Some(point)
    } else {
        None
    }
}

/// Errors that can occur while loading an event or resolving its genealogy
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Failed to read event file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse event file: {0}")]
    EventParseError(String),

    #[error("Duplicate track id {0} in event batch")]
    DuplicateTrackId(i32),

    #[error("Track {track_id} references unknown parent id {parent_id}")]
    UnresolvedParent { track_id: i32, parent_id: i32 },

    #[error("Track {track_id} references unknown daughter id {child_id}")]
    UnresolvedChild { track_id: i32, child_id: i32 },
}
