//! Token frequency tables that can be built per document and cheaply merged.
//!
//! The typical use is to build one [`TokenTable`] per document, possibly on different threads
//! or different machines, then fold them into a single corpus-wide table with [`merge`]:
//!
//! ```
//! use tokenbin::{merge, TokenTable};
//!
//! let first = TokenTable::build(&["a", "b", "b", "c"]);
//! let second = TokenTable::build(&["b", "c", "d", "d"]);
//! let corpus = merge(&first, &second).unwrap();
//!
//! let top = corpus.by_frequency_descending();
//! assert_eq!("b", top[0].name());
//! assert_eq!(3, top[0].frequency());
//! assert_eq!(2, top[0].document_count());
//! ```
mod entry;
mod error;
mod hash;
mod split;
mod table;

pub use entry::*;
pub use error::*;
pub use split::*;
pub use table::*;

pub type Result<T> = std::result::Result<T, TokenBinError>;

#[cfg(test)]
pub mod test_helpers {
    use std::sync::OnceLock;
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

    static TRACING: OnceLock<()> = OnceLock::new();

    /// Initialize tracing for tests with a stdout subscriber.
    /// Safe to call multiple times - will only initialize once.
    pub fn init_test_logging() {
        TRACING.get_or_init(|| {
            let filter = std::env::var("RUST_LOG")
                .map(EnvFilter::new)
                .unwrap_or_else(|_| EnvFilter::new("trace"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_span_events(FmtSpan::CLOSE)
                .with_test_writer()
                .try_init()
                .ok();
        });
    }
}
