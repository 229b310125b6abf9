//! Explicit save and restore of map state.
//!
//! [`MapState`] is a detached, inert snapshot: plain pairs plus the
//! sentinel flags. It is the exchange format for anything that needs to
//! move a map across a boundary that cannot carry live handles, and
//! restoring honors the flags, so a protected placeholder survives the
//! round trip protected.

use crate::key::Key;
use crate::map::{MagicMap, Origin};
use crate::value::Value;

/// A snapshot of a map's entries and sentinel flags.
#[derive(Debug, Clone)]
pub struct MapState {
    /// The entries, in insertion order.
    pub pairs: Vec<(Key, Value)>,
    /// Whether the map was a from-null placeholder.
    pub from_none: bool,
    /// Whether the map was a from-missing placeholder.
    pub from_missing: bool,
}

impl MagicMap {
    /// Captures this map's entries and flags.
    #[must_use]
    pub fn state(&self) -> MapState {
        MapState {
            pairs: self.entries(),
            from_none: self.is_from_none(),
            from_missing: self.is_from_missing(),
        }
    }

    /// Rebuilds a map from a snapshot.
    ///
    /// Flags win: a snapshot of a placeholder restores to a fresh
    /// protected placeholder (placeholders are always empty, so no pairs
    /// are lost). Ordinary snapshots restore through the hook engine, so
    /// sharing between the snapshot's values is preserved.
    #[must_use]
    pub fn restore(state: MapState) -> MagicMap {
        if state.from_none {
            return MagicMap::placeholder(Origin::FromNone);
        }
        if state.from_missing {
            return MagicMap::placeholder(Origin::FromMissing);
        }
        MagicMap::from_pairs(state.pairs)
    }
}
