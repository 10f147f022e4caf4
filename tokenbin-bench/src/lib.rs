//! Test rig for `tokenbin`.
//!
//! Two things live here: a deliberately naive reference implementation of a token table, which
//! the property tests compare the real one against, and generators for synthetic corpora that
//! are big enough to be interesting in benchmarks.

pub mod corpus;
pub mod reference;
