//! Deterministic automaton over opening-token facts.

use crate::error::DeterminismError;
use crate::fact::Fact;
use crate::guard::Guard;

pub type StateId = usize;

/// Immutable product of [`crate::compile`]: states, guarded transitions and
/// the accepting set. Built once per query and shared read-only for the
/// whole scan.
///
/// Determinism invariant: for every state and every concrete fact, at most
/// one outgoing guard evaluates true. [`Automaton::step`] re-checks this and
/// surfaces a violation as [`DeterminismError`] rather than picking silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    start: StateId,
    finals: Vec<bool>,
    transitions: Vec<Vec<(Guard, StateId)>>,
}

impl Automaton {
    pub(crate) fn new(
        start: StateId,
        finals: Vec<bool>,
        transitions: Vec<Vec<(Guard, StateId)>>,
    ) -> Self {
        debug_assert_eq!(finals.len(), transitions.len());
        Self { start, finals, transitions }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.get(state).copied().unwrap_or(false)
    }

    /// Advance from `state` on one fact. `Ok(None)` means no transition
    /// applies — the branch mismatches.
    pub fn step(&self, state: StateId, fact: &Fact) -> Result<Option<StateId>, DeterminismError> {
        let mut hit: Option<StateId> = None;
        for (guard, target) in &self.transitions[state] {
            if guard.eval(fact) {
                if hit.is_some() {
                    return Err(DeterminismError { state });
                }
                hit = Some(*target);
            }
        }
        Ok(hit)
    }

    /// Outgoing transitions of one state, in evaluation order.
    pub fn transitions(&self, state: StateId) -> &[(Guard, StateId)] {
        &self.transitions[state]
    }
}
