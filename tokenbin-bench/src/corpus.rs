//! Synthetic corpora for benchmarks.
//!
//! Real text has a long-tailed vocabulary: a handful of words make up most of the tokens, and
//! most words are rare.  That shape is what makes merging interesting (lots of overlap on common
//! tokens, lots of singletons on the tail), so the generator approximates it by drawing word
//! ranks from a roughly Zipf-like distribution.
use rand::prelude::*;

/// Generate `documents` documents of `tokens_per_document` tokens each, drawn from a vocabulary
/// of `vocabulary` distinct words.
///
/// The same seed always produces the same corpus.
pub fn synthetic_documents(
    documents: usize,
    tokens_per_document: usize,
    vocabulary: usize,
    seed: u64,
) -> Vec<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let vocabulary = vocabulary.max(1);

    (0..documents)
        .map(|_| {
            (0..tokens_per_document)
                .map(|_| {
                    // Squaring a uniform sample skews it towards low ranks
                    let x: f64 = rng.gen();
                    let rank = ((x * x) * vocabulary as f64) as usize;
                    word(rank.min(vocabulary - 1))
                })
                .collect()
        })
        .collect()
}

/// Repeat `documents` cyclically until there are `count` of them.
pub fn repeat_documents<T: Clone>(documents: &[T], count: usize) -> Vec<T> {
    documents.iter().cycle().take(count).cloned().collect()
}

/// The word with a given rank.  Words are made of lowercase letters so they look like tokens a
/// word splitter would produce.
fn word(rank: usize) -> String {
    let mut word = String::new();
    let mut n = rank;
    loop {
        word.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break;
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn synthetic_documents_are_reproducible() {
        let a = synthetic_documents(3, 50, 100, 42);
        let b = synthetic_documents(3, 50, 100, 42);

        assert_eq!(a, b);
        assert_eq!(3, a.len());
        assert!(a.iter().all(|doc| doc.len() == 50));
    }

    #[test]
    fn vocabulary_is_bounded() {
        let docs = synthetic_documents(10, 200, 30, 7);
        let distinct = docs.iter().flatten().collect::<HashSet<_>>();

        assert!(distinct.len() <= 30);
    }

    #[test]
    fn words_are_distinct_per_rank() {
        let words = (0..1000).map(word).collect::<HashSet<_>>();

        assert_eq!(1000, words.len());
    }

    #[test]
    fn repeat_cycles() {
        assert_eq!(vec![1, 2, 3, 1, 2], repeat_documents(&[1, 2, 3], 5));
        assert!(repeat_documents::<i32>(&[], 5).is_empty());
    }
}
