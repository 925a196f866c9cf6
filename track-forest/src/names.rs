//! Particle species naming
//!
//! Resolves PDG species codes to display names. Known codes come from an
//! embedded table of standard particle names (the subset of the standard
//! PDG database that shows up in tracking output); composite nuclei, which
//! have no table entry, are decoded from their numeric encoding. Codes that
//! resolve neither way fall back to the stringified number, so an unknown
//! species never fails serialization.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Lower bound (exclusive) of the composite-nucleus code range.
///
/// Nuclear codes follow the 10LZZZAAAI scheme:
/// `1e9 + Z * 10_000 + A * 10 + I`, where `I` is the isomer level.
pub const NUCLEUS_PDG_BASE: i32 = 1_000_000_000;

/// True if the code falls in the composite-nucleus range.
pub fn is_nucleus(pdg: i32) -> bool {
    pdg > NUCLEUS_PDG_BASE
}

/// Canonical names for the standard particles expected in tracking output,
/// keyed by PDG code. Names follow the standard PDG database spelling.
static STANDARD_NAMES: &[(i32, &str)] = &[
    // Leptons
    (11, "e-"),
    (-11, "e+"),
    (12, "nu_e"),
    (-12, "nu_e_bar"),
    (13, "mu-"),
    (-13, "mu+"),
    (14, "nu_mu"),
    (-14, "nu_mu_bar"),
    (15, "tau-"),
    (-15, "tau+"),
    (16, "nu_tau"),
    (-16, "nu_tau_bar"),
    // Gauge bosons
    (22, "gamma"),
    // Light mesons
    (111, "pi0"),
    (211, "pi+"),
    (-211, "pi-"),
    (221, "eta"),
    (130, "K_L0"),
    (310, "K_S0"),
    (311, "K0"),
    (-311, "K0_bar"),
    (321, "K+"),
    (-321, "K-"),
    // Baryons
    (2112, "neutron"),
    (-2112, "antineutron"),
    (2212, "proton"),
    (-2212, "antiproton"),
    (3122, "Lambda0"),
    (-3122, "antilambda"),
    (3112, "Sigma-"),
    (3212, "Sigma0"),
    (3222, "Sigma+"),
    (3312, "Xi-"),
    (3322, "Xi0"),
    (3334, "Omega-"),
];

/// Process-wide name lookup, materialized lazily from [`STANDARD_NAMES`].
/// Read-only after first use; safe for concurrent lookups.
fn name_table() -> &'static HashMap<i32, &'static str> {
    static TABLE: OnceLock<HashMap<i32, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| STANDARD_NAMES.iter().copied().collect())
}

/// Element symbols for decoded nuclei. Covers the argon target region and
/// the light fragments; any other element falls back to the numeric code.
fn element_symbol(z: i32) -> Option<&'static str> {
    match z {
        1 => Some("H"),
        2 => Some("He"),
        14 => Some("Si"),
        15 => Some("P"),
        16 => Some("S"),
        17 => Some("Cl"),
        18 => Some("Ar"),
        19 => Some("Ca"),
        _ => None,
    }
}

/// Display name for a PDG species code.
///
/// Lookup order: the standard name table; then, for codes in the nucleus
/// range, `"<Symbol>-<A>"` decoded from the 10LZZZAAAI encoding (the isomer
/// digit is discarded by the integer division); finally the stringified
/// code itself, which signals "unknown species" without failing.
pub fn pdg_name(pdg: i32) -> String {
    if let Some(name) = name_table().get(&pdg) {
        return (*name).to_string();
    }
    if is_nucleus(pdg) {
        let z = (pdg - NUCLEUS_PDG_BASE) / 10_000;
        let a = (pdg - NUCLEUS_PDG_BASE - z * 10_000) / 10;
        if let Some(symbol) = element_symbol(z) {
            return format!("{}-{}", symbol, a);
        }
    }
    log::trace!("No display name for species code {}, using the code", pdg);
    pdg.to_string()
}
