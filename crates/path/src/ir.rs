//! Passive path-query IR.
//!
//! Built upstream (by a query-language parser or by hand through the
//! convenience constructors) and consumed by [`crate::compile`]. The IR is
//! plain data: serializable, comparable, with no behavior beyond
//! construction helpers.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::fact::NodeName;

/// Relation between a step and its parent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Immediate child level.
    Child,
    /// Any number of levels below (zero or more intermediate opens).
    Descendant,
}

/// Restricts which node identities a step may match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeTest {
    AnyNode,
    /// Match by local name; if `ns_uri` is set the namespace must match too,
    /// otherwise any namespace is accepted.
    Name(NodeName),
}

impl NodeTest {
    pub fn named(local: impl AsRef<str>) -> Self {
        NodeTest::Name(NodeName::local(local))
    }

    pub fn named_ns(ns_uri: impl AsRef<str>, local: impl AsRef<str>) -> Self {
        NodeTest::Name(NodeName::qualified(ns_uri, local))
    }
}

/// Boolean expression over the attribute facts of an opening token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    True,
    False,
    Exists(CompactString),
    Eq(CompactString, CompactString),
    /// Attribute present with a different value. An absent attribute does
    /// not satisfy `Neq`.
    Neq(CompactString, CompactString),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn exists(attr: impl AsRef<str>) -> Self {
        Predicate::Exists(CompactString::new(attr.as_ref()))
    }

    pub fn eq(attr: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Predicate::Eq(CompactString::new(attr.as_ref()), CompactString::new(value.as_ref()))
    }

    pub fn neq(attr: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        Predicate::Neq(CompactString::new(attr.as_ref()), CompactString::new(value.as_ref()))
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }
}

/// One way a step may be satisfied: axis, node test and predicate together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepAlternative {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicate: Predicate,
}

impl StepAlternative {
    pub fn new(axis: Axis, test: NodeTest, predicate: Predicate) -> Self {
        Self { axis, test, predicate }
    }
}

/// A step is a non-empty set of alternatives; emptiness is rejected at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub alternatives: Vec<StepAlternative>,
}

impl Step {
    pub fn single(axis: Axis, test: NodeTest, predicate: Predicate) -> Self {
        Self { alternatives: vec![StepAlternative::new(axis, test, predicate)] }
    }

    /// Child-axis step without a predicate.
    pub fn child(test: NodeTest) -> Self {
        Self::single(Axis::Child, test, Predicate::True)
    }

    /// Descendant-axis step without a predicate.
    pub fn descendant(test: NodeTest) -> Self {
        Self::single(Axis::Descendant, test, Predicate::True)
    }

    pub fn or(mut self, alternative: StepAlternative) -> Self {
        self.alternatives.push(alternative);
        self
    }

    /// Replace the predicate of every alternative in this step with
    /// `predicate`. To predicate one alternative differently, build it via
    /// [`StepAlternative::new`] and attach it with [`Step::or`].
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        for alt in &mut self.alternatives {
            alt.predicate = predicate.clone();
        }
        self
    }
}

/// An ordered sequence of steps, matched from the root downwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathQuery {
    pub steps: Vec<Step>,
}

impl PathQuery {
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}
