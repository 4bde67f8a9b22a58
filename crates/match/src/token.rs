//! Token capability: the only view the matcher has of the input.

use treestream_path::Fact;

/// Classification of one token. `Other` covers text, comments and anything
/// else that is neither an open nor a close — forwarded verbatim, never
/// inspected by the automaton.
#[derive(Debug, Clone)]
pub enum TokenClass {
    Open(Fact),
    Close,
    Other,
}

/// Adapter trait for the external token type. The matcher clones tokens to
/// fan them out to concurrent per-match channels, so tokens should be cheap
/// to clone (reference-counted payloads or small values).
pub trait TreeToken: Clone + core::fmt::Debug + Send + 'static {
    fn classify(&self) -> TokenClass;
}
