//! Path-query IR and automaton compiler for streaming subtree matching.
//!
//! A [`PathQuery`] describes which subtrees of a serialized tree are wanted:
//! an ordered list of steps, each step a set of alternatives over an axis
//! (child or descendant), a node test and a boolean attribute predicate.
//! [`compile`] turns a query into an immutable deterministic [`Automaton`]
//! over the facts extracted from opening tokens; the automaton is built once
//! per query and shared read-only by the matcher for the whole scan.

pub mod automaton;
pub mod compiler;
pub mod error;
pub mod fact;
pub mod guard;
pub mod ir;

pub use automaton::{Automaton, StateId};
pub use compiler::compile;
pub use error::{CompileError, DeterminismError};
pub use fact::{Fact, NodeName};
pub use guard::Guard;
pub use ir::{Axis, NodeTest, PathQuery, Predicate, Step, StepAlternative};
