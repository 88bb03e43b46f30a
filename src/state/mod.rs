//! State module for tracking analysis progress
//!
//! `AnalysisState` is the lifecycle of one analysis call: the page is fetched,
//! the parsed document is analysed, and the call is done (with a report or a failure).

mod analysis_state;

pub use analysis_state::AnalysisState;
