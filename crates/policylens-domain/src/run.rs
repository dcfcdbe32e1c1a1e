//! Analysis run lifecycle

use std::fmt;

/// Identifier for one analysis run, based on UUIDv7.
///
/// Time-ordered, so log lines from consecutive runs sort naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// State of a run.
///
/// ```text
/// Idle → Running → Succeeded
///                ↘ Failed(message)
/// ```
///
/// There is no retry state: a failed run stays failed and the next user
/// action starts a new run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Created, waiting for the trigger
    Idle,
    /// Pipeline executing
    Running,
    /// Result delivered
    Succeeded,
    /// Pipeline stopped with a user-facing message
    Failed(String),
}

impl RunState {
    fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Succeeded => "succeeded",
            RunState::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One analysis run and its state machine
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    id: RunId,
    state: RunState,
}

impl AnalysisRun {
    /// Create an idle run with a fresh id
    pub fn new() -> Self {
        Self {
            id: RunId::new(),
            state: RunState::Idle,
        }
    }

    /// Run identifier
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// `Idle → Running`
    ///
    /// # Examples
    ///
    /// ```
    /// use policylens_domain::{AnalysisRun, RunState};
    ///
    /// let mut run = AnalysisRun::new();
    /// run.start().unwrap();
    /// run.fail("quota exceeded").unwrap();
    /// assert_eq!(run.state(), &RunState::Failed("quota exceeded".to_string()));
    /// assert!(run.start().is_err());
    /// ```
    pub fn start(&mut self) -> Result<(), String> {
        self.transition(RunState::Idle, RunState::Running)
    }

    /// `Running → Succeeded`
    pub fn succeed(&mut self) -> Result<(), String> {
        self.transition(RunState::Running, RunState::Succeeded)
    }

    /// `Running → Failed(message)`
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), String> {
        self.transition(RunState::Running, RunState::Failed(message.into()))
    }

    fn transition(&mut self, from: RunState, to: RunState) -> Result<(), String> {
        if self.state != from {
            return Err(format!(
                "Invalid run transition: {} -> {} (expected {})",
                self.state, to, from
            ));
        }
        self.state = to;
        Ok(())
    }
}

impl Default for AnalysisRun {
    fn default() -> Self {
        Self::new()
    }
}
