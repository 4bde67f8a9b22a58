//! Streaming subtree matching over tree token streams.
//!
//! The matcher drives a compiled deterministic automaton (see
//! `treestream-path`) over one forward pass of a token stream — a tree
//! serialized as open/close/leaf events — and emits every matching subtree as
//! an independent, incrementally-fed channel of the original tokens, without
//! materializing the tree.
//!
//! # Example
//!
//! ```
//! use treestream_match::{Matcher, simple::{open, close, text}};
//! use treestream_path::{PathQuery, Step, NodeTest};
//!
//! let query = PathQuery::default()
//!     .step(Step::descendant(NodeTest::named("item")));
//! let matcher = Matcher::compile(&query).unwrap();
//!
//! let tokens = vec![
//!     open("list"),
//!     open("item"), text("a"), close(),
//!     open("item"), text("b"), close(),
//!     close(),
//! ];
//!
//! let mut bodies = Vec::new();
//! for matched in matcher.scan(tokens) {
//!     let subtree = matched.unwrap();
//!     bodies.push(subtree.count()); // open + text + close
//! }
//! assert_eq!(bodies, [3, 3]);
//! ```
//!
//! Consumers of emitted channels run wherever the caller likes, but an
//! emitted channel must be drained (or dropped): with a bounded channel a
//! full queue suspends the whole scan by design.

pub mod channel;
pub mod combinators;
pub mod error;
pub mod matcher;
pub mod simple;
pub mod token;

pub use channel::{SubtreeEvent, SubtreeEvents};
pub use error::MatchError;
pub use matcher::{MatchOptions, MatchStream, Matcher};
pub use token::{TokenClass, TreeToken};

pub use treestream_path::{
    Automaton, Axis, CompileError, Fact, NodeName, NodeTest, PathQuery, Predicate, Step,
    StepAlternative, compile,
};
