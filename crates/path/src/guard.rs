//! Compiled transition guards.
//!
//! A guard is the closed, tagged-variant form of `nodeTest ∧ predicate`:
//! a pure total boolean function over one [`Fact`]. The smart constructors
//! constant-fold while building, which is what keeps the determinized
//! automaton small — conjoining a guard with its own negation, or two
//! different name tests, collapses to [`Guard::False`] instead of surviving
//! as an unsatisfiable transition region.

use compact_str::CompactString;

use crate::fact::{Fact, NodeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    True,
    False,
    /// Node identity test. A pattern without a namespace matches any
    /// namespace with the same local name.
    NameIs(NodeName),
    AttrExists(CompactString),
    AttrEq(CompactString, CompactString),
    And(Box<Guard>, Box<Guard>),
    Or(Box<Guard>, Box<Guard>),
    Not(Box<Guard>),
}

impl Guard {
    /// Evaluate against one fact. Total: never fails, never recurses beyond
    /// the guard's own structure.
    pub fn eval(&self, fact: &Fact) -> bool {
        match self {
            Guard::True => true,
            Guard::False => false,
            Guard::NameIs(pattern) => {
                pattern.local == fact.name.local
                    && (pattern.ns_uri.is_none() || pattern.ns_uri == fact.name.ns_uri)
            }
            Guard::AttrExists(name) => fact.attribute(name).is_some(),
            Guard::AttrEq(name, value) => fact.attribute(name) == Some(value.as_str()),
            Guard::And(a, b) => a.eval(fact) && b.eval(fact),
            Guard::Or(a, b) => a.eval(fact) || b.eval(fact),
            Guard::Not(inner) => !inner.eval(fact),
        }
    }

    /// Conjunction with constant folding.
    pub fn and(a: Guard, b: Guard) -> Guard {
        match (a, b) {
            (Guard::True, g) | (g, Guard::True) => g,
            (Guard::False, _) | (_, Guard::False) => Guard::False,
            (a, b) if a == b => a,
            (a, b) if Guard::contradicts(&a, &b) => Guard::False,
            (a, b) => Guard::And(Box::new(a), Box::new(b)),
        }
    }

    /// Disjunction with constant folding.
    pub fn or(a: Guard, b: Guard) -> Guard {
        match (a, b) {
            (Guard::True, _) | (_, Guard::True) => Guard::True,
            (Guard::False, g) | (g, Guard::False) => g,
            (a, b) if a == b => a,
            (a, b) => Guard::Or(Box::new(a), Box::new(b)),
        }
    }

    /// Negation with constant folding.
    #[allow(clippy::should_implement_trait)]
    pub fn not(g: Guard) -> Guard {
        match g {
            Guard::True => Guard::False,
            Guard::False => Guard::True,
            Guard::Not(inner) => *inner,
            other => Guard::Not(Box::new(other)),
        }
    }

    /// Syntactic unsatisfiability of `a ∧ b`. Conservative: only the cases a
    /// single fact can never satisfy — a guard against its own negation, two
    /// different fully-resolved name tests, two different values for the same
    /// attribute.
    fn contradicts(a: &Guard, b: &Guard) -> bool {
        match (a, b) {
            (Guard::Not(x), y) if **x == *y => true,
            (x, Guard::Not(y)) if *x == **y => true,
            (Guard::NameIs(x), Guard::NameIs(y)) => {
                x.local != y.local
                    || (x.ns_uri.is_some() && y.ns_uri.is_some() && x.ns_uri != y.ns_uri)
            }
            (Guard::AttrEq(ka, va), Guard::AttrEq(kb, vb)) => ka == kb && va != vb,
            _ => false,
        }
    }
}
