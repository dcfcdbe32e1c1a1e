//! Reference corpus loading

use crate::error::CorpusError;
use crate::extract::extract_path;
use policylens_domain::{
    DocumentFormat, NullObserver, ReferenceCorpus, ReferenceDocument, ReferenceFailure,
    RunObserver,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads every supported file directly inside a directory.
///
/// - Non-recursive; sub-directories are ignored.
/// - Files are read in file-name order, which is also the prompt order.
/// - Suffixes other than `.pdf`, `.docx` and `.txt` are skipped silently.
/// - A file that fails to extract is recorded as a failure and left out,
///   unless the loader is strict, in which case loading stops.
///
/// # Examples
///
/// ```no_run
/// use policylens_domain::NullObserver;
/// use policylens_extractor::CorpusLoader;
///
/// let corpus = CorpusLoader::new()
///     .strict(true)
///     .load("data", &NullObserver)?;
/// println!("{} reference documents", corpus.len());
/// # Ok::<(), policylens_extractor::CorpusError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader {
    strict: bool,
    max_file_bytes: Option<u64>,
}

impl CorpusLoader {
    /// Lenient loader without a size ceiling
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the whole corpus on the first unreadable file
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Treat files larger than `limit` bytes as unreadable
    pub fn with_max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    /// Load the corpus, reporting each file read to `observer`
    pub fn load(
        &self,
        dir: impl AsRef<Path>,
        observer: &dyn RunObserver,
    ) -> Result<ReferenceCorpus, CorpusError> {
        let dir = dir.as_ref();
        let candidates = list_supported_files(dir)?;

        let mut documents = Vec::with_capacity(candidates.len());
        let mut failures = Vec::new();

        for (name, path, format) in candidates {
            observer.status(&format!("Reading reference file: {}", name));

            match extract_path(&path, format, self.max_file_bytes) {
                Ok(text) => {
                    debug!("Loaded reference '{}' ({} chars)", name, text.len());
                    documents.push(ReferenceDocument::new(name, text));
                }
                Err(source) if self.strict => {
                    return Err(CorpusError::Document { name, source });
                }
                Err(e) => {
                    warn!("Skipping unreadable reference '{}': {}", name, e);
                    observer.warning(&format!("Skipping reference file {}: {}", name, e));
                    failures.push(ReferenceFailure {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Loaded reference corpus from {}: {} readable, {} failed",
            dir.display(),
            documents.len(),
            failures.len()
        );

        Ok(ReferenceCorpus::new(documents, failures))
    }
}

/// Load a corpus with the default lenient loader and no observer
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<ReferenceCorpus, CorpusError> {
    CorpusLoader::new().load(dir, &NullObserver)
}

fn list_supported_files(dir: &Path) -> Result<Vec<(String, PathBuf, DocumentFormat)>, CorpusError> {
    let read_error = |e: std::io::Error| CorpusError::Read {
        path: dir.to_path_buf(),
        cause: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();
        // Follows symlinks, so a linked reference file still counts
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        match DocumentFormat::from_file_name(&name) {
            Some(format) => files.push((name, path, format)),
            None => debug!("Ignoring unsupported reference file '{}'", name),
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}
