//! Facts extracted from opening tokens.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A node identity, optionally namespace-qualified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeName {
    pub local: CompactString,
    pub ns_uri: Option<CompactString>,
}

impl NodeName {
    pub fn local(name: impl AsRef<str>) -> Self {
        Self { local: CompactString::new(name.as_ref()), ns_uri: None }
    }

    pub fn qualified(ns_uri: impl AsRef<str>, local: impl AsRef<str>) -> Self {
        Self {
            local: CompactString::new(local.as_ref()),
            ns_uri: Some(CompactString::new(ns_uri.as_ref())),
        }
    }
}

/// The identity and attribute set of one opening token, used to evaluate
/// transition guards. Attributes are single-valued per name; the first entry
/// wins on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fact {
    pub name: NodeName,
    pub attributes: Vec<(CompactString, CompactString)>,
}

impl Fact {
    pub fn new(name: NodeName) -> Self {
        Self { name, attributes: Vec::new() }
    }

    pub fn with_attribute(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.attributes
            .push((CompactString::new(name.as_ref()), CompactString::new(value.as_ref())));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}
