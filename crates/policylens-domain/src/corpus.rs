//! Reference corpus - the regulatory texts a policy is compared against

/// One reference document that was read successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDocument {
    /// File name, used verbatim in the prompt markers
    pub name: String,
    /// Extracted text
    pub text: String,
}

impl ReferenceDocument {
    /// Create a new reference document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A supported reference file whose text could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFailure {
    /// File name
    pub name: String,
    /// Human-readable cause
    pub reason: String,
}

/// The reference documents loaded for one run.
///
/// Built once by the corpus loader and never mutated afterwards. Documents
/// keep the loader's order, which is the prompt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCorpus {
    documents: Vec<ReferenceDocument>,
    failures: Vec<ReferenceFailure>,
}

impl ReferenceCorpus {
    /// Create a corpus from already-ordered documents and failures
    pub fn new(documents: Vec<ReferenceDocument>, failures: Vec<ReferenceFailure>) -> Self {
        Self { documents, failures }
    }

    /// Build a corpus from `(name, text)` pairs, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use policylens_domain::ReferenceCorpus;
    ///
    /// let corpus = ReferenceCorpus::from_pairs([("decree13.txt", "Art.1: consent required.")]);
    /// assert_eq!(corpus.len(), 1);
    /// assert_eq!(corpus.names(), vec!["decree13.txt"]);
    /// ```
    pub fn from_pairs<I, N, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: Into<String>,
    {
        let documents = pairs
            .into_iter()
            .map(|(name, text)| ReferenceDocument::new(name, text))
            .collect();
        Self::new(documents, Vec::new())
    }

    /// Readable documents, in prompt order
    pub fn documents(&self) -> &[ReferenceDocument] {
        &self.documents
    }

    /// Files that were supported but unreadable
    pub fn failures(&self) -> &[ReferenceFailure] {
        &self.failures
    }

    /// Number of readable documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no document could be read
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Names of the readable documents
    pub fn names(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.name.as_str()).collect()
    }

    /// Look up a readable document by file name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.text.as_str())
    }
}
