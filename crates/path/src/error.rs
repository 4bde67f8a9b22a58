use thiserror::Error;

use crate::automaton::StateId;

/// Structural rejection of a path query. The IR is expected to arrive
/// upstream-validated; these are the fail-fast checks that guarantee no
/// partial automaton is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("path query has no steps")]
    EmptyQuery,
    #[error("step {0} has no alternatives")]
    EmptyStep(usize),
}

/// Internal invariant break: two transition guards of one state evaluated
/// true for the same fact. Never recoverable — the scan consuming the
/// automaton must abort immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ambiguous automaton: state {state} has more than one transition for one fact")]
pub struct DeterminismError {
    pub state: StateId,
}
