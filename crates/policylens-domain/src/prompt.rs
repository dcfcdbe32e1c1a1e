//! The payload sent to the generative model

/// An assembled prompt: ordered text parts.
///
/// The remote service receives the parts as separate content parts; the
/// single-string form joins them with newlines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt {
    parts: Vec<String>,
}

impl Prompt {
    /// Create a prompt from its parts
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Ordered parts
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Single-string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use policylens_domain::Prompt;
    ///
    /// let prompt = Prompt::new(vec!["a".into(), "b".into()]);
    /// assert_eq!(prompt.text(), "a\nb");
    /// ```
    pub fn text(&self) -> String {
        self.parts.join("\n")
    }

    /// Length of the single-string form in bytes
    pub fn len(&self) -> usize {
        let separators = self.parts.len().saturating_sub(1);
        self.parts.iter().map(String::len).sum::<usize>() + separators
    }

    /// True when the prompt has no text at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Self::new(vec![text.to_string()])
    }
}
