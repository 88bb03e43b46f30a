/// Analysis state definitions for one orchestrated call
use crate::AnalyzerError;
use std::fmt;

/// Represents the current state of a single page analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisState {
    /// The target page is being requested and parsed
    Fetching,

    /// Extractors and the link pipeline are running against the parsed document
    Analyzing,

    /// Terminal: either a report was produced or the fetch failed
    Done,
}

impl AnalysisState {
    /// Returns true if no further work happens in this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// ```text
    /// Fetching ──ok──▶ Analyzing ──join──▶ Done
    ///     └──────────fail───────────────▶ Done
    /// ```
    pub fn can_transition_to(&self, next: AnalysisState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Analyzing)
                | (Self::Fetching, Self::Done)
                | (Self::Analyzing, Self::Done)
        )
    }

    /// Moves to `next`, rejecting illegal transitions
    pub fn advance(self, next: AnalysisState) -> Result<AnalysisState, AnalyzerError> {
        if !self.can_transition_to(next) {
            return Err(AnalyzerError::InvalidTransition {
                from: self,
                to: next,
            });
        }
        tracing::trace!("Analysis state {} -> {}", self, next);
        Ok(next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Analyzing => "analyzing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for AnalysisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
