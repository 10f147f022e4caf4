//! The obvious way to count tokens, with no cleverness whatsoever.  Slow, but easy enough to
//! convince yourself it's right just by reading it.
use std::collections::{BTreeMap, BTreeSet};
use tokenbin::TokenTable;

/// `(name, frequency, document_count)`, which is how both implementations are compared
pub type Row = (String, u64, u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    /// token -> (frequency, document count)
    counts: BTreeMap<String, (u64, u64)>,
    total_documents: u64,
    total_tokens: u64,
}

impl ReferenceTable {
    /// A reference table holding just one document
    pub fn from_document<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut table = Self::default();
        table.add_document(tokens);
        table
    }

    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let mut seen = BTreeSet::new();

        for token in tokens {
            let token = token.as_ref();
            let counts = self.counts.entry(token.to_string()).or_insert((0, 0));
            counts.0 += 1;
            if seen.insert(token) {
                counts.1 += 1;
            }
        }

        self.total_documents += 1;
        self.total_tokens += tokens.len() as u64;
    }

    pub fn merge(&self, other: &ReferenceTable) -> ReferenceTable {
        let mut merged = self.clone();
        for (token, (frequency, document_count)) in &other.counts {
            let counts = merged.counts.entry(token.clone()).or_insert((0, 0));
            counts.0 += frequency;
            counts.1 += document_count;
        }
        merged.total_documents += other.total_documents;
        merged.total_tokens += other.total_tokens;

        merged
    }

    pub fn total_documents(&self) -> u64 {
        self.total_documents
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Every token, sorted by name
    pub fn rows(&self) -> Vec<Row> {
        self.counts
            .iter()
            .map(|(token, (frequency, document_count))| {
                (token.clone(), *frequency, *document_count)
            })
            .collect()
    }
}

/// The rows of a real table, sorted by name, in the same form as [`ReferenceTable::rows`]
pub fn rows_of(table: &TokenTable) -> Vec<Row> {
    table
        .sorted_entries()
        .iter()
        .map(|entry| {
            (
                entry.name().to_string(),
                entry.frequency(),
                entry.document_count(),
            )
        })
        .collect()
}

/// Whether a real table has exactly the contents of the reference table
pub fn matches(reference: &ReferenceTable, table: &TokenTable) -> bool {
    reference.total_documents() == table.total_documents()
        && reference.total_tokens() == table.total_tokens()
        && reference.rows() == rows_of(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_counts_documents_once_per_token() {
        let mut reference = ReferenceTable::from_document(&["a", "b", "b", "c"]);
        reference.add_document(&["b", "c", "d", "d"]);

        assert_eq!(
            vec![
                ("a".to_string(), 1, 1),
                ("b".to_string(), 3, 2),
                ("c".to_string(), 2, 2),
                ("d".to_string(), 2, 1),
            ],
            reference.rows()
        );
        assert_eq!(2, reference.total_documents());
        assert_eq!(8, reference.total_tokens());
    }

    #[test]
    fn reference_agrees_with_the_scenario_table() {
        let reference = ReferenceTable::from_document(&["token", "beep", "beep"]);
        let table = TokenTable::build(&["token", "beep", "beep"]);

        assert!(matches(&reference, &table));
    }
}
