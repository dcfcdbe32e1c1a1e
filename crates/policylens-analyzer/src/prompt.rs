//! Prompt assembly for policy compliance analysis

use crate::config::DEFAULT_REGULATIONS;
use policylens_domain::{Prompt, ReferenceCorpus};

/// Builds the analysis prompt from a policy text and a reference corpus
///
/// The output is a pure function of the inputs: no truncation, no length
/// budgeting, and identical inputs give byte-identical prompts.
pub struct PromptBuilder<'a> {
    policy_text: &'a str,
    corpus: &'a ReferenceCorpus,
    regulations: String,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(policy_text: &'a str, corpus: &'a ReferenceCorpus) -> Self {
        Self {
            policy_text,
            corpus,
            regulations: DEFAULT_REGULATIONS.to_string(),
        }
    }

    /// Name other regulations in the framing sentence
    pub fn with_regulations(mut self, regulations: impl Into<String>) -> Self {
        self.regulations = regulations.into();
        self
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> Prompt {
        let mut parts = Vec::with_capacity(self.corpus.len() + 16);

        // 1. Role and framing
        parts.push(ROLE.to_string());
        parts.push(format!(
            "Below is a company's 'Privacy Policy' and reference documents on data security regulations (such as {}).",
            self.regulations
        ));

        // 2. The policy, verbatim
        parts.push("### POLICY DOCUMENT TO BE ANALYZED:".to_string());
        parts.push(self.policy_text.to_string());
        parts.push("---".to_string());

        // 3. Reference documents in corpus order
        parts.push("### REFERENCE DOCUMENTS:".to_string());
        for document in self.corpus.documents() {
            parts.push(reference_block(&document.name, &document.text));
        }

        // 4. What we want back
        parts.push("---".to_string());
        parts.extend(ANALYSIS_REQUEST.iter().map(|line| line.to_string()));

        Prompt::new(parts)
    }
}

const ROLE: &str = "YOU ARE AN EXPERT IN DATA PRIVACY POLICY ANALYSIS.";

const ANALYSIS_REQUEST: [&str; 6] = [
    "### ANALYSIS REQUEST:",
    "Based on the provided reference documents, please perform the following requests and present the results in English, using Markdown format:",
    "1. **Key Points Summary:** Briefly summarize the most important clauses in the company's policy.",
    "2. **Compliance Analysis:** Compare the company's policy against each reference document (especially Vietnam's Decree 13). Point out clauses that appear to be compliant and those that may be lacking, unclear, or non-compliant.",
    "3. **Improvement Suggestions:** Provide specific recommendations to improve the policy, helping it better comply with the stated regulations and standards, especially the requirements of Vietnamese law.",
    "4. **Compliance Rating (Estimate):** Provide an estimate of the overall compliance level on a scale of 10 (e.g., 7/10) and briefly explain the score.",
];

fn reference_block(name: &str, text: &str) -> String {
    format!(
        "\n--- Start of {name} ---\n{text}\n--- End of {name} ---\n",
        name = name,
        text = text
    )
}
