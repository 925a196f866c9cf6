//! Genealogy resolution
//!
//! Rebuilds the family structure of one event's track batch. Tracks
//! reference each other through sparse external ids; this module maps every
//! reference onto dense indices into the batch, so that the tree walk can
//! use plain index tables with no id lookups and no reference cycles.
//!
//! Resolution is pure and deterministic: any unresolvable reference is a
//! data-integrity error that fails the whole event, never patched over with
//! a guessed index.

use crate::types::{Result, Track, TrackError};
use std::collections::HashMap;

/// Resolved parent/child/sibling relationships for one track batch.
///
/// All relationship tables hold indices into the batch the genealogy was
/// resolved from, never track ids. The structure is rebuilt fresh per event
/// and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct Genealogy {
    /// id → batch index, bijective over the ids present
    index_of: HashMap<i32, usize>,
    /// batch index → id (inverse of `index_of`)
    ids: Vec<i32>,
    /// Mother index per track; `None` for primaries
    parents: Vec<Option<usize>>,
    /// Daughter indices per track, in creation order
    children: Vec<Vec<usize>>,
    /// Sibling indices per track; includes the track itself
    siblings: Vec<Vec<usize>>,
    /// Indices of all primaries, in batch order
    primaries: Vec<usize>,
}

impl Genealogy {
    /// Resolve the genealogy of a track batch.
    ///
    /// Builds the id→index map in one pass, then resolves every parent and
    /// daughter reference through it. Fails with a [`TrackError`] on a
    /// duplicate id or a reference to an id not present in the batch.
    pub fn resolve(tracks: &[Track]) -> Result<Self> {
        log::debug!("Resolving genealogy for {} tracks", tracks.len());

        // Pass 1: id → index map. Ids must be unique, otherwise every
        // later reference is ambiguous.
        let mut index_of = HashMap::with_capacity(tracks.len());
        let mut ids = Vec::with_capacity(tracks.len());
        for (index, track) in tracks.iter().enumerate() {
            if index_of.insert(track.id, index).is_some() {
                return Err(TrackError::DuplicateTrackId(track.id));
            }
            ids.push(track.id);
        }

        // Pass 2: parents. Parent id 0 marks a primary; anything else must
        // resolve through the map.
        let mut parents = Vec::with_capacity(tracks.len());
        for track in tracks {
            if track.is_primary() {
                parents.push(None);
            } else {
                match index_of.get(&track.parent_id) {
                    Some(&parent) => parents.push(Some(parent)),
                    None => {
                        return Err(TrackError::UnresolvedParent {
                            track_id: track.id,
                            parent_id: track.parent_id,
                        });
                    }
                }
            }
        }

        // Pass 3: children, preserving creation order.
        let mut children = Vec::with_capacity(tracks.len());
        for track in tracks {
            let mut daughters = Vec::with_capacity(track.child_ids.len());
            for &child_id in &track.child_ids {
                match index_of.get(&child_id) {
                    Some(&child) => daughters.push(child),
                    None => {
                        return Err(TrackError::UnresolvedChild {
                            track_id: track.id,
                            child_id,
                        });
                    }
                }
            }
            children.push(daughters);
        }

        // Pass 4: siblings. The primaries list is collected once and shared
        // by every primary; a secondary's siblings are its mother's
        // children, itself included.
        let primaries: Vec<usize> = (0..tracks.len())
            .filter(|&index| parents[index].is_none())
            .collect();
        let mut siblings = Vec::with_capacity(tracks.len());
        for index in 0..tracks.len() {
            match parents[index] {
                None => siblings.push(primaries.clone()),
                Some(parent) => siblings.push(children[parent].clone()),
            }
        }

        log::debug!(
            "Genealogy resolved: {} primaries, {} tracks",
            primaries.len(),
            tracks.len()
        );

        Ok(Self {
            index_of,
            ids,
            parents,
            children,
            siblings,
            primaries,
        })
    }

    /// Number of tracks in the resolved batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Batch index of the track with the given id, if present.
    pub fn index_of(&self, id: i32) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Id of the track at the given batch index.
    pub fn id_at(&self, index: usize) -> i32 {
        self.ids[index]
    }

    /// Mother index of the track at `index`; `None` for primaries.
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents[index]
    }

    /// Daughter indices of the track at `index`, in creation order.
    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    /// Sibling indices of the track at `index`. For a primary this is the
    /// list of all primaries; for a secondary it is the mother's child
    /// list. Both include the track itself.
    pub fn siblings(&self, index: usize) -> &[usize] {
        &self.siblings[index]
    }

    /// Indices of all primary tracks, in batch order.
    pub fn primaries(&self) -> &[usize] {
        &self.primaries
    }

    /// True if the track at `index` is a primary.
    pub fn is_primary(&self, index: usize) -> bool {
        self.parents[index].is_none()
    }
}
