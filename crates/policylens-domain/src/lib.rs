//! PolicyLens Domain Layer
//!
//! Value types and trait seams shared by every other PolicyLens crate.
//! Like a clean-architecture core it carries no I/O: document parsing,
//! HTTP and rendering all live in infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **Policy document**: the company-supplied file being evaluated
//! - **Reference corpus**: regulatory texts the policy is compared against
//! - **Prompt**: the ordered text parts sent to the generative model
//! - **Run**: one user-triggered analysis (`Idle → Running → Succeeded | Failed`)
//!
//! ## Seams
//!
//! - [`traits::LlmProvider`]: the remote `generate(prompt) -> text` function
//! - [`traits::ProviderFactory`]: builds a fresh provider per run from a credential
//! - [`traits::RunObserver`]: informational status sink owned by the shell

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod document;
pub mod format;
pub mod prompt;
pub mod run;
pub mod traits;

// Re-exports for convenience
pub use corpus::{ReferenceCorpus, ReferenceDocument, ReferenceFailure};
pub use document::{Credential, UploadedDocument};
pub use format::DocumentFormat;
pub use prompt::Prompt;
pub use run::{AnalysisRun, RunId, RunState};
pub use traits::{LlmProvider, NullObserver, ProviderFactory, RunObserver};
