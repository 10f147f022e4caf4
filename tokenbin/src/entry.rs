use serde::Serialize;
use std::sync::Arc;

/// One distinct token in a [`crate::TokenTable`], along with how often it occurred.
///
/// Entries are shared between tables (and with the views a table hands out) as `Arc<Entry>`, so
/// there is deliberately no way to modify one from outside this crate.  A table that needs
/// different counts for a token either allocates a new `Entry` or, in the incremental fold path,
/// goes through [`Arc::make_mut`] so that anyone else holding the old entry keeps seeing the old
/// counts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    name: Arc<str>,
    frequency: u64,
    document_count: u64,
}

impl Entry {
    /// Make a new entry.
    ///
    /// `name` is always copied into an allocation owned by the entry, even if it was sliced out
    /// of a much larger buffer, so holding on to an entry never keeps the source text alive.
    pub fn new(name: impl AsRef<str>, frequency: u64, document_count: u64) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            frequency,
            document_count,
        }
    }

    /// The token text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of occurrences of this token across every document folded into the table
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Number of distinct documents in which this token occurred at least once
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// The name, as the shared allocation.  Cloning this is how the name index avoids a second
    /// copy of every token string.
    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// Combine the counts of two entries for the same token into a new entry.
    ///
    /// The caller must already have checked that the sums can't overflow; see
    /// [`crate::TokenTable::merge`].
    pub(crate) fn combine(left: &Entry, right: &Entry) -> Self {
        debug_assert_eq!(left.name, right.name);

        Self {
            name: Arc::clone(&left.name),
            frequency: left.frequency + right.frequency,
            document_count: left.document_count + right.document_count,
        }
    }

    /// Fold one more document in which this token occurred `occurrences` times.
    pub(crate) fn record_document(&mut self, occurrences: u64) {
        self.frequency += occurrences;
        self.document_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_copied_out_of_the_source_buffer() {
        let huge = "x".repeat(1 << 16) + " beep";
        let entry = Entry::new(&huge[huge.len() - 4..], 1, 1);
        drop(huge);

        assert_eq!("beep", entry.name());
    }

    #[test]
    fn combine_sums_counts_and_shares_the_name() {
        let left = Entry::new("beep", 3, 2);
        let right = Entry::new("beep", 1, 1);

        let combined = Entry::combine(&left, &right);

        assert_eq!(4, combined.frequency());
        assert_eq!(3, combined.document_count());
        assert!(Arc::ptr_eq(left.shared_name(), combined.shared_name()));

        // Neither side was touched
        assert_eq!(Entry::new("beep", 3, 2), left);
        assert_eq!(Entry::new("beep", 1, 1), right);
    }
}
