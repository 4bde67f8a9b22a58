//! Simple in-memory token type for tests, examples and benches.
//!
//! Analogous to a pre-lexed markup event stream: open events carry a name
//! and attributes, text is opaque. Real deployments adapt their own decoder
//! output via [`TreeToken`] instead.
//!
//! ```
//! use treestream_match::simple::{open, close, text};
//!
//! // <a id="1">hi</a>
//! let tokens = vec![open("a").attr("id", "1"), text("hi"), close()];
//! assert_eq!(tokens.len(), 3);
//! ```

use compact_str::CompactString;

use treestream_path::{Fact, NodeName};

use crate::token::{TokenClass, TreeToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleToken {
    Open { name: NodeName, attributes: Vec<(CompactString, CompactString)> },
    Close,
    Text(CompactString),
}

impl SimpleToken {
    /// Attach an attribute; meaningful on `Open` tokens only.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let SimpleToken::Open { attributes, .. } = &mut self {
            attributes.push((CompactString::new(name), CompactString::new(value)));
        } else {
            debug_assert!(false, "attr() on a non-open token");
        }
        self
    }

    pub fn name(&self) -> Option<&NodeName> {
        match self {
            SimpleToken::Open { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl TreeToken for SimpleToken {
    fn classify(&self) -> TokenClass {
        match self {
            SimpleToken::Open { name, attributes } => {
                TokenClass::Open(Fact { name: name.clone(), attributes: attributes.clone() })
            }
            SimpleToken::Close => TokenClass::Close,
            SimpleToken::Text(_) => TokenClass::Other,
        }
    }
}

// Convenience helper functions for concise test code
pub fn open(name: &str) -> SimpleToken {
    SimpleToken::Open { name: NodeName::local(name), attributes: Vec::new() }
}

pub fn open_ns(ns_uri: &str, name: &str) -> SimpleToken {
    SimpleToken::Open { name: NodeName::qualified(ns_uri, name), attributes: Vec::new() }
}

pub fn close() -> SimpleToken {
    SimpleToken::Close
}

pub fn text(value: &str) -> SimpleToken {
    SimpleToken::Text(CompactString::new(value))
}
