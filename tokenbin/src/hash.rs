//! The incremental fold path needs a name -> position lookup table.  The choice of hash function
//! for that table matters much more than anything else in that path, since every input token
//! is hashed at least once.
//!
//! This is isolated to this module to make it easier to experiment with different impls.
use crate::Entry;
use std::sync::Arc;
use tracing::*;

pub(crate) use rustc_hash::FxHashMap as HashMap;

/// Maps each token name to its position in a table's entries.
///
/// Keys share the allocation of the entry's own name.
pub(crate) type NameIndex = HashMap<Arc<str>, usize>;

/// Index the entries by name from scratch.
pub(crate) fn build_index(entries: &[Arc<Entry>]) -> NameIndex {
    debug!(entries = entries.len(), "Building name index");

    let mut index = NameIndex::default();
    index.reserve(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        index.insert(Arc::clone(entry.shared_name()), position);
    }

    index
}
