//! Track pruning policy
//!
//! The keep predicate decides whether a track — and with it the whole
//! subtree hanging off it — appears in the serialized forest. Low-energy
//! electromagnetic secondaries and recoil nucleons are suppressed by
//! species-dependent kinetic-energy thresholds; every other species is kept
//! at any energy, so muons, pions and the like always survive.

use crate::names::is_nucleus;
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Default threshold for photons, electrons and positrons, in MeV.
pub const DEFAULT_EM_THRESHOLD_MEV: f64 = 5.0;

/// Default threshold for neutrons, protons and composite nuclei, in MeV.
pub const DEFAULT_NUCLEON_THRESHOLD_MEV: f64 = 10.0;

/// Species- and energy-dependent keep/drop rule.
///
/// A pure function of a track's species code and kinetic energy; evaluating
/// it has no side effects. Both thresholds are closed lower bounds: a track
/// exactly at its threshold is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepPolicy {
    /// Minimum kinetic energy for photons (22), electrons (11) and
    /// positrons (-11), in MeV
    #[serde(default = "default_em_threshold")]
    pub em_threshold_mev: f64,

    /// Minimum kinetic energy for neutrons (2112), protons (2212) and
    /// composite-nucleus codes, in MeV
    #[serde(default = "default_nucleon_threshold")]
    pub nucleon_threshold_mev: f64,
}

fn default_em_threshold() -> f64 {
    DEFAULT_EM_THRESHOLD_MEV
}

fn default_nucleon_threshold() -> f64 {
    DEFAULT_NUCLEON_THRESHOLD_MEV
}

impl Default for KeepPolicy {
    fn default() -> Self {
        Self {
            em_threshold_mev: DEFAULT_EM_THRESHOLD_MEV,
            nucleon_threshold_mev: DEFAULT_NUCLEON_THRESHOLD_MEV,
        }
    }
}

impl KeepPolicy {
    /// Create a policy with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the electromagnetic threshold in MeV
    pub fn with_em_threshold(mut self, mev: f64) -> Self {
        self.em_threshold_mev = mev;
        self
    }

    /// Builder method: set the nucleon/nucleus threshold in MeV
    pub fn with_nucleon_threshold(mut self, mev: f64) -> Self {
        self.nucleon_threshold_mev = mev;
        self
    }

    /// Decide whether a track is kept in the output forest.
    ///
    /// A track whose kinetic energy cannot be evaluated (malformed
    /// momentum) is dropped; one low-significance track must not fail the
    /// whole event.
    pub fn keep(&self, track: &Track) -> bool {
        let Some(ke) = track.kinetic_energy_mev() else {
            log::warn!(
                "Track {} has unusable momentum, dropping it from output",
                track.id
            );
            return false;
        };
        match track.pdg {
            22 | 11 | -11 => ke >= self.em_threshold_mev,
            2112 | 2212 => ke >= self.nucleon_threshold_mev,
            pdg if is_nucleus(pdg) => ke >= self.nucleon_threshold_mev,
            _ => true,
        }
    }
}
