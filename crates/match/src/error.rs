use thiserror::Error;

use treestream_path::DeterminismError;

/// Scan-fatal failures surfaced through the match stream. Everything else
/// the matcher tolerates: unmatched closes are ignored, truncated input
/// force-terminates open channels, a failed consumer only mutes its own
/// channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Compiler invariant break detected at runtime; aborts the whole scan.
    #[error(transparent)]
    Determinism(#[from] DeterminismError),
}
