//! Track Forest Library
//!
//! A stateless, reusable library for turning a flat per-event batch of
//! simulated particle tracks into a pruned genealogical tree, serialized as
//! nested JSON for event-display consumption.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on the tree:
//! - Resolves the genealogy of a batch (parents, ordered children, siblings)
//! - Applies the species/energy keep-drop policy
//! - Resolves species names from PDG codes, including composite nuclei
//! - Serializes the pruned forest of kept primaries and descendants
//!
//! The library does NOT:
//! - Read columnar (ROOT) simulation files
//! - Emit space points, dead regions, or run metadata
//! - Configure output destinations or formatting beyond the node shape
//!
//! All higher-level functionality is in the application layer
//! (track-forest-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use track_forest::{build_forest, EventFile, KeepPolicy};
//! use std::path::Path;
//!
//! // Load one event's track batch
//! let event = EventFile::read(Path::new("event.json")).unwrap();
//!
//! // Configure pruning
//! let policy = KeepPolicy::new().with_em_threshold(5.0);
//!
//! // Build the pruned forest and serialize it
//! let forest = build_forest(&event.tracks, &policy).unwrap();
//! println!("{}", serde_json::to_string(&forest).unwrap());
//! ```

// Public modules
pub mod event_file;
pub mod forest;
pub mod genealogy;
pub mod names;
pub mod policy;
pub mod types;

// Re-export main types for convenience
pub use event_file::EventFile;
pub use forest::{build_forest, Forest, ForestBuilder, NodeData, TrackNode, LEAF_ICON};
pub use genealogy::Genealogy;
pub use names::{is_nucleus, pdg_name};
pub use policy::KeepPolicy;
pub use types::{Result, Track, TrackError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
