//! Reading files from the filesystem as documents.
//!
//! Every file is one document.  Its tokens are copied out of the file's text into their own
//! strings, so the (possibly large) file contents are dropped as soon as the file is split.
use anyhow::{Context, Result};
use futures::{Stream, StreamExt};
use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing::*;
use walkdir::WalkDir;

/// One file's worth of tokens
#[derive(Clone, Debug)]
pub struct Document {
    /// The file the tokens came from
    pub path: PathBuf,

    pub tokens: Vec<String>,
}

/// Expand the paths given on the command line into a list of files.
///
/// Directories are walked recursively and every regular file in them is included.  The result is
/// sorted so that runs over the same inputs always see the files in the same order.
pub fn expand_paths<I, P>(paths: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();

        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry
                    .with_context(|| format!("Error listing directory '{}'", path.display()))?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            // Not checking that it exists; reading it will fail with a better message
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();

    Ok(files)
}

/// Read one file and split it into words.
///
/// Bytes that aren't valid UTF-8 are replaced rather than failing the whole file.
pub async fn read_document(path: PathBuf) -> Result<Document> {
    let contents = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Error reading file '{}'", path.display()))?;

    let text = String::from_utf8_lossy(&contents);
    if matches!(text, Cow::Owned(_)) {
        warn!(path = %path.display(), "File is not valid UTF-8; invalid sequences were replaced");
    }

    let tokens = tokenbin::split_words(&text)
        .map(str::to_owned)
        .collect::<Vec<_>>();

    debug!(path = %path.display(), bytes = contents.len(), tokens = tokens.len(), "Read document");

    Ok(Document { path, tokens })
}

/// Read many files, up to `concurrency` at a time.
///
/// The result is a `Stream` that yields each document as soon as it's read, in no particular
/// order.
pub fn read_documents_streaming(
    paths: Vec<PathBuf>,
    concurrency: NonZeroUsize,
) -> impl Stream<Item = Result<Document>> {
    futures::stream::iter(paths.into_iter().map(read_document)).buffer_unordered(concurrency.get())
}

/// Read many files, up to `concurrency` at a time.
///
/// Wraps [`read_documents_streaming`] and doesn't return until every file has been read.  The
/// first failure fails the whole thing.  Documents are returned in path order.
pub async fn read_documents(
    paths: Vec<PathBuf>,
    concurrency: NonZeroUsize,
) -> Result<Vec<Document>> {
    let results = read_documents_streaming(paths, concurrency)
        .collect::<Vec<_>>()
        .await;

    let mut documents = results.into_iter().collect::<Result<Vec<_>>>()?;
    documents.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(documents)
}
