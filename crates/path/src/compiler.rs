//! Query-to-automaton compilation.
//!
//! Two phases:
//!
//! 1. **NFA construction.** A frontier of active states starts at `{0}`.
//!    Every step alternative compiles `nodeTest ∧ predicate` into one
//!    [`Guard`] and adds a guarded edge from each frontier state to a fresh
//!    state. Descendant-axis alternatives additionally put an always-true
//!    self-loop on each frontier state, modeling "zero or more intermediate
//!    levels". The frontier after the last step is the accepting set.
//!
//! 2. **Determinization.** Subset construction generalized to a predicate
//!    alphabet: per state the distinct outgoing guards are partitioned into
//!    mutually exclusive regions, one per non-empty guard subset, by
//!    conjoining the subset with the negations of the rest. Constant folding
//!    in [`Guard`] discards unsatisfiable regions and keeps the state count
//!    small. The region where every guard is false carries no transition —
//!    that is the mismatch case.

use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use smallvec::{SmallVec, smallvec};

use crate::automaton::{Automaton, StateId};
use crate::error::CompileError;
use crate::guard::Guard;
use crate::ir::{Axis, NodeTest, PathQuery, Predicate};

/// Compile a path query into a deterministic automaton. Total for
/// structurally valid input; fails fast on empty queries or steps without
/// returning a partial automaton.
pub fn compile(query: &PathQuery) -> Result<Automaton, CompileError> {
    if query.steps.is_empty() {
        return Err(CompileError::EmptyQuery);
    }

    // Phase 1: NFA over the frontier.
    let mut nfa: Vec<Vec<(Guard, usize)>> = vec![Vec::new()];
    let mut frontier: SmallVec<[usize; 8]> = smallvec![0];
    for (index, step) in query.steps.iter().enumerate() {
        if step.alternatives.is_empty() {
            return Err(CompileError::EmptyStep(index));
        }
        let mut next: SmallVec<[usize; 8]> = SmallVec::new();
        for alt in &step.alternatives {
            let guard = Guard::and(test_guard(&alt.test), predicate_guard(&alt.predicate));
            let fresh = nfa.len();
            nfa.push(Vec::new());
            if guard != Guard::False {
                for &state in &frontier {
                    nfa[state].push((guard.clone(), fresh));
                }
            }
            if alt.axis == Axis::Descendant {
                for &state in &frontier {
                    let already_looped =
                        nfa[state].iter().any(|(g, t)| *t == state && *g == Guard::True);
                    if !already_looped {
                        nfa[state].push((Guard::True, state));
                    }
                }
            }
            next.push(fresh);
        }
        frontier = next;
    }

    let automaton = determinize(&nfa, &frontier);
    tracing::debug!(
        steps = query.steps.len(),
        nfa_states = nfa.len(),
        dfa_states = automaton.state_count(),
        "path query compiled"
    );
    Ok(automaton)
}

fn test_guard(test: &NodeTest) -> Guard {
    match test {
        NodeTest::AnyNode => Guard::True,
        NodeTest::Name(name) => Guard::NameIs(name.clone()),
    }
}

fn predicate_guard(predicate: &Predicate) -> Guard {
    match predicate {
        Predicate::True => Guard::True,
        Predicate::False => Guard::False,
        Predicate::Exists(attr) => Guard::AttrExists(attr.clone()),
        Predicate::Eq(attr, value) => Guard::AttrEq(attr.clone(), value.clone()),
        // Absent attribute satisfies neither Eq nor Neq.
        Predicate::Neq(attr, value) => Guard::and(
            Guard::AttrExists(attr.clone()),
            Guard::not(Guard::AttrEq(attr.clone(), value.clone())),
        ),
        Predicate::And(a, b) => Guard::and(predicate_guard(a), predicate_guard(b)),
        Predicate::Or(a, b) => Guard::or(predicate_guard(a), predicate_guard(b)),
        Predicate::Not(inner) => Guard::not(predicate_guard(inner)),
    }
}

fn determinize(nfa: &[Vec<(Guard, usize)>], nfa_finals: &[usize]) -> Automaton {
    let mut index: HashMap<Vec<usize>, StateId> = HashMap::new();
    let mut sets: Vec<Vec<usize>> = Vec::new();
    let mut transitions: Vec<Vec<(Guard, StateId)>> = Vec::new();
    let mut worklist: VecDeque<StateId> = VecDeque::new();

    let start = intern(vec![0], &mut index, &mut sets, &mut transitions, &mut worklist);

    while let Some(current) = worklist.pop_front() {
        let members = sets[current].clone();

        // Distinct guards in first-appearance order, each with the NFA
        // targets it can reach from this state set.
        let mut guards: Vec<Guard> = Vec::new();
        let mut targets: Vec<Vec<usize>> = Vec::new();
        for &member in &members {
            for (guard, target) in &nfa[member] {
                if let Some(pos) = guards.iter().position(|g| g == guard) {
                    if !targets[pos].contains(target) {
                        targets[pos].push(*target);
                    }
                } else {
                    guards.push(guard.clone());
                    targets.push(vec![*target]);
                }
            }
        }

        for subset in (0..guards.len()).powerset() {
            if subset.is_empty() {
                continue;
            }
            let mut region = Guard::True;
            for (i, guard) in guards.iter().enumerate() {
                let polarity = if subset.binary_search(&i).is_ok() {
                    guard.clone()
                } else {
                    Guard::not(guard.clone())
                };
                region = Guard::and(region, polarity);
                if region == Guard::False {
                    break;
                }
            }
            if region == Guard::False {
                continue;
            }
            let mut target_set: Vec<usize> =
                subset.iter().flat_map(|&i| targets[i].iter().copied()).collect();
            target_set.sort_unstable();
            target_set.dedup();
            let target_id =
                intern(target_set, &mut index, &mut sets, &mut transitions, &mut worklist);
            transitions[current].push((region, target_id));
        }
    }

    let finals = sets
        .iter()
        .map(|set| set.iter().any(|member| nfa_finals.contains(member)))
        .collect();
    Automaton::new(start, finals, transitions)
}

fn intern(
    set: Vec<usize>,
    index: &mut HashMap<Vec<usize>, StateId>,
    sets: &mut Vec<Vec<usize>>,
    transitions: &mut Vec<Vec<(Guard, StateId)>>,
    worklist: &mut VecDeque<StateId>,
) -> StateId {
    if let Some(&id) = index.get(&set) {
        return id;
    }
    let id = sets.len();
    index.insert(set.clone(), id);
    sets.push(set);
    transitions.push(Vec::new());
    worklist.push_back(id);
    id
}
