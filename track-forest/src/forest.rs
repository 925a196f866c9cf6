//! Pruned forest serialization
//!
//! Walks the resolved genealogy from each kept primary and produces the
//! nested node structure consumed by the tree widget of the event display.
//! The keep predicate is evaluated once per candidate track, before
//! recursion: a dropped track's entire subtree is invisible, even when
//! individual descendants would pass the predicate on their own.
//!
//! The walk is a value-returning recursion over batch indices; there is no
//! shared mutable accumulator beyond the node structure being built.

use crate::genealogy::Genealogy;
use crate::names::pdg_name;
use crate::policy::KeepPolicy;
use crate::types::{Result, Track};
use serde::Serialize;

/// Icon value marking nodes with zero kept children.
pub const LEAF_ICON: &str = "jstree-file";

/// Spatial endpoints of a track, time component dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Start point `[x, y, z]`
    pub start: [f64; 3],
    /// End point `[x, y, z]`
    pub end: [f64; 3],
}

/// One serialized track together with its kept descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackNode {
    /// Track identifier from the input batch
    pub id: i32,
    /// Display label: species name and whole-MeV kinetic energy
    pub text: String,
    /// Spatial endpoints
    pub data: NodeData,
    /// Kept children in creation order; empty for a leaf
    pub children: Vec<TrackNode>,
    /// Leaf marker, present only when `children` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

/// Ordered sequence of kept primary trees. Serializes as a JSON array.
pub type Forest = Vec<TrackNode>;

/// Recursive serializer over one event's tracks and resolved genealogy.
pub struct ForestBuilder<'a> {
    tracks: &'a [Track],
    genealogy: &'a Genealogy,
    policy: &'a KeepPolicy,
}

impl<'a> ForestBuilder<'a> {
    /// Create a builder over a batch and its resolved genealogy.
    ///
    /// The genealogy must have been resolved from the same `tracks` slice;
    /// the builder walks it by index.
    pub fn new(tracks: &'a [Track], genealogy: &'a Genealogy, policy: &'a KeepPolicy) -> Self {
        Self {
            tracks,
            genealogy,
            policy,
        }
    }

    /// Serialize the forest of kept primaries, in batch order.
    pub fn build(&self) -> Forest {
        let forest: Forest = self
            .genealogy
            .primaries()
            .iter()
            .copied()
            .filter(|&index| self.policy.keep(&self.tracks[index]))
            .filter_map(|index| self.emit(index))
            .collect();
        log::debug!(
            "Serialized {} of {} primaries",
            forest.len(),
            self.genealogy.primaries().len()
        );
        forest
    }

    /// Emit the node for a kept track, recursing into its kept children.
    ///
    /// Returns `None` when the track's endpoints or energy cannot be
    /// extracted; the track then fails its own inclusion and its subtree
    /// disappears with it.
    fn emit(&self, index: usize) -> Option<TrackNode> {
        let track = &self.tracks[index];
        let start = track.start_point()?;
        let end = track.end_point()?;
        let ke = track.kinetic_energy_mev()?;

        let children: Vec<TrackNode> = self
            .genealogy
            .children(index)
            .iter()
            .copied()
            .filter(|&child| self.policy.keep(&self.tracks[child]))
            .filter_map(|child| self.emit(child))
            .collect();

        let icon = if children.is_empty() {
            Some(LEAF_ICON)
        } else {
            None
        };

        Some(TrackNode {
            id: track.id,
            // Energy is truncated to a whole number of MeV for display.
            text: format!("{}  {} MeV", pdg_name(track.pdg), ke as i64),
            data: NodeData { start, end },
            children,
            icon,
        })
    }
}

/// Resolve a batch's genealogy and serialize its pruned forest in one call.
///
/// Fails only on genealogy errors (duplicate or unresolvable ids); an empty
/// batch yields an empty forest.
pub fn build_forest(tracks: &[Track], policy: &KeepPolicy) -> Result<Forest> {
    let genealogy = Genealogy::resolve(tracks)?;
    Ok(ForestBuilder::new(tracks, &genealogy, policy).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackError;
    use serde_json::json;

    /// Track with massless kinematics so `ke_mev` is exact, and endpoints
    /// derived from the id so nodes are distinguishable.
    fn track(id: i32, pdg: i32, parent_id: i32, child_ids: &[i32], ke_mev: f64) -> Track {
        let e = ke_mev / 1000.0;
        Track {
            id,
            pdg,
            parent_id,
            child_ids: child_ids.to_vec(),
            start_xyzt: [id as f64, 0.0, 0.0, 0.0],
            end_xyzt: [id as f64, 1.0, 0.0, 0.5],
            start_momentum: [e, 0.0, 0.0, e],
        }
    }

    /// All node ids in the forest, depth-first.
    fn all_ids(nodes: &[TrackNode]) -> Vec<i32> {
        let mut ids = Vec::new();
        for node in nodes {
            ids.push(node.id);
            ids.extend(all_ids(&node.children));
        }
        ids
    }

    #[test]
    fn test_empty_batch() {
        let forest = build_forest(&[], &KeepPolicy::new()).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_three_track_event() {
        // Primary photon (20 MeV) with a 2 MeV electron daughter, plus a
        // primary muon (50 MeV). The electron is below the 5 MeV threshold.
        let tracks = vec![
            track(1, 22, 0, &[2], 20.0),
            track(2, 11, 1, &[], 2.0),
            track(3, 13, 0, &[], 50.0),
        ];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].text, "gamma  20 MeV");
        assert!(forest[0].children.is_empty());
        assert_eq!(forest[0].icon, Some(LEAF_ICON));

        assert_eq!(forest[1].id, 3);
        assert_eq!(forest[1].text, "mu-  50 MeV");
        assert_eq!(forest[1].icon, Some(LEAF_ICON));
    }

    #[test]
    fn test_pruned_subtree_invisible() {
        // The 2 MeV electron is dropped; its 50 MeV photon daughter must
        // not surface anywhere, even though it passes the predicate.
        let tracks = vec![
            track(1, 22, 0, &[2], 20.0),
            track(2, 11, 1, &[4], 2.0),
            track(4, 22, 2, &[], 50.0),
        ];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert_eq!(all_ids(&forest), vec![1]);
    }

    #[test]
    fn test_dropped_primary_hides_descendants() {
        // A dropped primary's surviving daughter is not promoted to root.
        let tracks = vec![track(1, 11, 0, &[2], 2.0), track(2, 13, 1, &[], 50.0)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_children_order_preserved() {
        // Candidate daughters 5, 6, 7: the middle one is dropped and the
        // survivors keep their relative order.
        let tracks = vec![
            track(1, 13, 0, &[5, 6, 7], 100.0),
            track(5, 22, 1, &[], 30.0),
            track(6, 11, 1, &[], 1.0),
            track(7, 22, 1, &[], 40.0),
        ];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert_eq!(forest.len(), 1);
        let child_ids: Vec<i32> = forest[0].children.iter().map(|n| n.id).collect();
        assert_eq!(child_ids, vec![5, 7]);
        assert_eq!(forest[0].icon, None);
    }

    #[test]
    fn test_malformed_endpoint_drops_subtree() {
        let mut muon = track(1, 13, 0, &[2], 50.0);
        muon.end_xyzt[1] = f64::NAN;
        let tracks = vec![muon, track(2, 13, 1, &[], 60.0)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_nested_emission() {
        // mu- → gamma → (e+, e-): all above threshold, full chain kept.
        let tracks = vec![
            track(1, 13, 0, &[2], 300.0),
            track(2, 22, 1, &[3, 4], 80.0),
            track(3, -11, 2, &[], 30.0),
            track(4, 11, 2, &[], 25.0),
        ];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert_eq!(all_ids(&forest), vec![1, 2, 3, 4]);
        let photon = &forest[0].children[0];
        assert_eq!(photon.icon, None);
        assert_eq!(photon.children[0].text, "e+  30 MeV");
        assert_eq!(photon.children[1].text, "e-  25 MeV");
    }

    #[test]
    fn test_energy_truncated_in_text() {
        let tracks = vec![track(1, 13, 0, &[], 2.7)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert_eq!(forest[0].text, "mu-  2 MeV");
    }

    #[test]
    fn test_nucleus_label_in_text() {
        let tracks = vec![track(1, 1_000_180_400, 0, &[], 12.0)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        assert_eq!(forest[0].text, "Ar-40  12 MeV");
    }

    #[test]
    fn test_json_shape() {
        let tracks = vec![track(1, 22, 0, &[], 20.0)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        let value = serde_json::to_value(&forest).unwrap();
        assert_eq!(
            value,
            json!([{
                "id": 1,
                "text": "gamma  20 MeV",
                "data": {
                    "start": [1.0, 0.0, 0.0],
                    "end": [1.0, 1.0, 0.0]
                },
                "children": [],
                "icon": "jstree-file"
            }])
        );
    }

    #[test]
    fn test_icon_omitted_for_inner_nodes() {
        let tracks = vec![track(1, 13, 0, &[2], 100.0), track(2, 13, 1, &[], 50.0)];
        let forest = build_forest(&tracks, &KeepPolicy::new()).unwrap();
        let value = serde_json::to_value(&forest).unwrap();
        assert!(value[0].get("icon").is_none());
        assert_eq!(value[0]["children"][0]["icon"], json!("jstree-file"));
    }

    #[test]
    fn test_genealogy_error_propagates() {
        let tracks = vec![track(2, 11, 99, &[], 20.0)];
        let err = build_forest(&tracks, &KeepPolicy::new()).unwrap_err();
        assert!(matches!(err, TrackError::UnresolvedParent { .. }));
    }
}
