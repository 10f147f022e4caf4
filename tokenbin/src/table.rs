//! The token table: every distinct token in some set of documents, with its frequency and the
//! number of documents it appears in.
//!
//! The canonical representation is a vector of entries sorted by name.  That's what makes
//! [`merge`] a single linear pass over both inputs, which matters when thousands of small
//! per-document tables are folded into one corpus table.
//!
//! [`TokenTable::add_tokens`] trades that away for speed: it looks tokens up in a hash index and
//! appends unseen names to the end.  If an appended name sorts before an existing one the table
//! remembers that it's no longer sorted, and anything that needs sorted entries (merging,
//! [`TokenTable::sorted_entries`]) sorts a copy of the entry references on demand.
//! [`TokenTable::sort_entries`] puts the table back in canonical form.
use crate::error::{CapacityExceededSnafu, InvalidInputSnafu};
use crate::hash::{self, HashMap, NameIndex};
use crate::{split_words, Entry, Result};
use serde::ser::SerializeStruct;
use serde::Serialize;
use snafu::{ensure, OptionExt};
use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::*;

/// Token frequencies and document counts for one or more documents.
///
/// Tables are cheap to merge and merging never modifies either input; entries which appear in
/// only one input are shared with the output rather than copied.
///
/// The default table contains no documents at all, which makes it the identity for [`merge`].
/// Compare with `TokenTable::build(&[] as &[&str])`, which is one empty document.
#[derive(Clone, Debug)]
pub struct TokenTable {
    entries: Vec<Arc<Entry>>,

    /// Number of documents folded into this table
    total_documents: u64,

    /// Number of tokens (not distinct tokens) folded into this table
    total_tokens: u64,

    /// Whether `entries` is currently sorted by name.  Only `add_tokens` can make this false.
    sorted: bool,

    /// Position of each entry by name, built the first time `add_tokens` is called and dropped
    /// whenever entries move.
    index: Option<NameIndex>,
}

impl Default for TokenTable {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_documents: 0,
            total_tokens: 0,
            sorted: true,
            index: None,
        }
    }
}

impl TokenTable {
    /// Build a table from the tokens of a single document.
    ///
    /// Tokens don't need to be sorted or unique.  Every distinct token gets one entry with a
    /// document count of 1, no matter how many times it repeats.
    pub fn build<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut sorted = tokens.iter().map(AsRef::as_ref).collect::<Vec<&str>>();
        sorted.sort_unstable();

        let entries = sorted
            .chunk_by(|a, b| a == b)
            .map(|run| Arc::new(Entry::new(run[0], run.len() as u64, 1)))
            .collect::<Vec<_>>();

        trace!(
            tokens = tokens.len(),
            distinct = entries.len(),
            "Built token table"
        );

        Self {
            entries,
            total_documents: 1,
            total_tokens: tokens.len() as u64,
            sorted: true,
            index: None,
        }
    }

    /// Build a table from one document of raw text, using [`split_words`] to find the tokens.
    pub fn from_text(text: &str) -> Self {
        Self::build(&split_words(text).collect::<Vec<_>>())
    }

    /// Reassemble a table from entries that were produced somewhere else.
    ///
    /// Everything a table normally guarantees by construction is checked here instead: names
    /// must be unique and sorted, every entry must have been seen in at least one document but
    /// no more documents than it has occurrences or than the table has documents, and the
    /// frequencies can't add up to more than `total_tokens`.
    pub fn from_sorted_entries(
        entries: Vec<Entry>,
        total_documents: u64,
        total_tokens: u64,
    ) -> Result<Self> {
        for pair in entries.windows(2) {
            ensure!(
                pair[0].name() < pair[1].name(),
                InvalidInputSnafu {
                    reason: format!(
                        "entries must be sorted by unique name, but '{}' is followed by '{}'",
                        pair[0].name(),
                        pair[1].name()
                    )
                }
            );
        }

        let mut frequencies = 0u64;
        for entry in &entries {
            ensure!(
                entry.document_count() > 0 && entry.document_count() <= entry.frequency(),
                InvalidInputSnafu {
                    reason: format!(
                        "token '{}' has a document count of {} and a frequency of {}",
                        entry.name(),
                        entry.document_count(),
                        entry.frequency()
                    )
                }
            );
            ensure!(
                entry.document_count() <= total_documents,
                InvalidInputSnafu {
                    reason: format!(
                        "token '{}' appears in {} documents but the table only has {total_documents}",
                        entry.name(),
                        entry.document_count()
                    )
                }
            );
            frequencies = frequencies
                .checked_add(entry.frequency())
                .filter(|sum| *sum <= total_tokens)
                .with_context(|| InvalidInputSnafu {
                    reason: format!("token frequencies add up to more than {total_tokens} tokens"),
                })?;
        }

        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
            total_documents,
            total_tokens,
            sorted: true,
            index: None,
        })
    }

    /// All entries, in the table's internal order.
    ///
    /// That order is by name unless [`Self::add_tokens`] has appended names out of order; see
    /// [`Self::is_sorted`].  Use [`Self::sorted_entries`] if you need the order guaranteed.
    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    /// All entries sorted by name.  Borrowed unless the table is currently unsorted.
    pub fn sorted_entries(&self) -> Cow<'_, [Arc<Entry>]> {
        if self.sorted {
            Cow::Borrowed(&self.entries)
        } else {
            let mut entries = self.entries.clone();
            entries.sort_unstable_by(|a, b| a.name().cmp(b.name()));
            Cow::Owned(entries)
        }
    }

    /// Whether [`Self::entries`] is currently in name order
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Look up the entry for a token
    pub fn get(&self, name: &str) -> Option<&Arc<Entry>> {
        if self.sorted {
            self.entries
                .binary_search_by(|entry| entry.name().cmp(name))
                .ok()
                .map(|position| &self.entries[position])
        } else if let Some(index) = &self.index {
            index.get(name).map(|&position| &self.entries[position])
        } else {
            self.entries.iter().find(|entry| entry.name() == name)
        }
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Entries from most to least frequent.  Ties are broken by name, ascending.
    ///
    /// The returned `Vec` is yours to reorder or filter; the entries in it are shared with the
    /// table.
    pub fn by_frequency_descending(&self) -> Vec<Arc<Entry>> {
        self.sorted_by_count(Entry::frequency)
    }

    /// Entries from the most to the fewest documents.  Ties are broken by name, ascending.
    pub fn by_document_count_descending(&self) -> Vec<Arc<Entry>> {
        self.sorted_by_count(Entry::document_count)
    }

    fn sorted_by_count(&self, count: impl Fn(&Entry) -> u64) -> Vec<Arc<Entry>> {
        let mut entries = self.entries.clone();
        // Names are unique so this is a total order, and an unstable sort gives the same result
        // every time
        entries.sort_unstable_by(|a, b| {
            count(b)
                .cmp(&count(a))
                .then_with(|| a.name().cmp(b.name()))
        });
        entries
    }

    /// Merge this table with another one into a new table.  See [`merge`].
    pub fn concat(&self, rhs: &TokenTable) -> Result<TokenTable> {
        merge(self, rhs)
    }

    /// Merge any number of tables, left to right, starting from the empty table.
    pub fn merge_all<I, T>(tables: I) -> Result<TokenTable>
    where
        I: IntoIterator<Item = T>,
        T: Borrow<TokenTable>,
    {
        tables
            .into_iter()
            .try_fold(TokenTable::default(), |acc, table| merge(&acc, table.borrow()))
    }

    /// Fold the tokens of one more document into this table, in place.
    ///
    /// This is faster than building a table for the document and merging it, mostly because it
    /// doesn't allocate a new table each time, but the entries are no longer guaranteed to be
    /// sorted afterwards.
    ///
    /// Entries previously handed out by this table are not affected; an entry shared with
    /// anything else is copied before its counts change.
    ///
    /// Fails only if a table total would overflow, in which case the table is left as it was.
    pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<()> {
        let total_documents = checked_total(self.total_documents, 1, "total documents")?;
        let total_tokens =
            checked_total(self.total_tokens, tokens.len() as u64, "total tokens")?;

        // Occurrences of each distinct token in this document.  A token's document count goes up
        // by one no matter how many times it appears here.
        let mut occurrences = HashMap::<&str, u64>::default();
        for token in tokens {
            *occurrences.entry(token.as_ref()).or_insert(0) += 1;
        }

        let index = self
            .index
            .get_or_insert_with(|| hash::build_index(&self.entries));

        let mut unseen = Vec::new();
        for (name, count) in occurrences {
            match index.get(name) {
                Some(&position) => {
                    Arc::make_mut(&mut self.entries[position]).record_document(count);
                }
                None => unseen.push((name, count)),
            }
        }

        if !unseen.is_empty() {
            unseen.sort_unstable_by(|a, b| a.0.cmp(b.0));

            if let Some(last) = self.entries.last() {
                if last.name() > unseen[0].0 {
                    self.sorted = false;
                }
            }

            self.entries.reserve(unseen.len());
            for (name, count) in unseen {
                let entry = Arc::new(Entry::new(name, count, 1));
                index.insert(Arc::clone(entry.shared_name()), self.entries.len());
                self.entries.push(entry);
            }
        }

        self.total_documents = total_documents;
        self.total_tokens = total_tokens;

        Ok(())
    }

    /// Put the entries back in name order, if [`Self::add_tokens`] took them out of it.
    pub fn sort_entries(&mut self) {
        if !self.sorted {
            debug!(entries = self.entries.len(), "Sorting token table entries");

            self.entries.sort_unstable_by(|a, b| a.name().cmp(b.name()));
            self.sorted = true;

            // Every position in the index is potentially wrong now
            self.index = None;
        }
    }
}

/// Merge two tables into a new one, leaving both inputs untouched.
///
/// Tokens present in only one input are shared with the output; tokens present in both get a
/// new entry with the frequencies and document counts summed.  This is a single linear pass over
/// both tables when they are sorted (which they are unless [`TokenTable::add_tokens`] was used
/// on them), and the result is always sorted.
///
/// Fails only if the combined document or token totals would overflow.
pub fn merge(a: &TokenTable, b: &TokenTable) -> Result<TokenTable> {
    // Every entry's frequency is bounded by its table's total tokens, and its document count by
    // the total documents, so once these sums fit the per-entry sums do too.
    let total_documents = checked_total(a.total_documents, b.total_documents, "total documents")?;
    let total_tokens = checked_total(a.total_tokens, b.total_tokens, "total tokens")?;

    let left = a.sorted_entries();
    let right = b.sorted_entries();

    let mut entries = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].name().cmp(right[j].name()) {
            Ordering::Less => {
                entries.push(Arc::clone(&left[i]));
                i += 1;
            }
            Ordering::Greater => {
                entries.push(Arc::clone(&right[j]));
                j += 1;
            }
            Ordering::Equal => {
                entries.push(Arc::new(Entry::combine(&left[i], &right[j])));
                i += 1;
                j += 1;
            }
        }
    }
    entries.extend(left[i..].iter().cloned());
    entries.extend(right[j..].iter().cloned());

    trace!(
        left = left.len(),
        right = right.len(),
        merged = entries.len(),
        "Merged token tables"
    );

    Ok(TokenTable {
        entries,
        total_documents,
        total_tokens,
        sorted: true,
        index: None,
    })
}

fn checked_total(current: u64, added: u64, what: &'static str) -> Result<u64> {
    current
        .checked_add(added)
        .context(CapacityExceededSnafu { what })
        .inspect_err(|_| warn!(current, added, what, "Refusing to overflow token table total"))
}

/// Two tables are equal if they have the same totals and the same entries, regardless of the
/// order in which the entries are stored.
impl PartialEq for TokenTable {
    fn eq(&self, other: &Self) -> bool {
        self.total_documents == other.total_documents
            && self.total_tokens == other.total_tokens
            && self.sorted_entries() == other.sorted_entries()
    }
}

impl Eq for TokenTable {}

impl Serialize for TokenTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TokenTable", 3)?;
        state.serialize_field("total_documents", &self.total_documents)?;
        state.serialize_field("total_tokens", &self.total_tokens)?;
        state.serialize_field("entries", &*self.sorted_entries())?;
        state.end()
    }
}
