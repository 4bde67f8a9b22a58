//! The streaming tree matcher.
//!
//! One synchronous scanning task owns all mutable state — branch stack,
//! depth, budgets, open-channel registry — so none of it needs locking. The
//! scan makes a single forward pass over the token stream and publishes one
//! [`SubtreeEvents`] channel per committed match, in strictly increasing
//! order of the opening-token position.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use smallvec::{SmallVec, smallvec};

use treestream_path::{Automaton, CompileError, PathQuery, StateId, compile};

use crate::channel::{SubtreeEvents, SubtreeFeed};
use crate::error::MatchError;
use crate::token::{TokenClass, TreeToken};

/// Budgets and policy knobs for one scan.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Maximum number of matches to commit; `None` is unlimited.
    max_matches: Option<usize>,
    /// Maximum number of already-open matches a new commit may be nested
    /// inside; `None` is unlimited, `Some(0)` forbids nested matches.
    max_nesting: Option<usize>,
    /// Whether a match's own delimiting open/close tokens are delivered to
    /// its own channel. Enclosing channels always receive them.
    emit_open_and_close: bool,
    /// Per-match channel capacity; `None` is unbounded. A bounded channel at
    /// capacity suspends the scan until the consumer catches up.
    channel_capacity: Option<usize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_matches: None,
            max_nesting: None,
            emit_open_and_close: true,
            channel_capacity: Some(256),
        }
    }
}

impl MatchOptions {
    pub fn with_max_matches(mut self, max: usize) -> Self {
        self.max_matches = Some(max);
        self
    }

    pub fn with_max_nesting(mut self, max: usize) -> Self {
        self.max_nesting = Some(max);
        self
    }

    pub fn with_open_close_markers(mut self, emit: bool) -> Self {
        self.emit_open_and_close = emit;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: Option<usize>) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn max_matches(&self) -> Option<usize> {
        self.max_matches
    }

    pub fn max_nesting(&self) -> Option<usize> {
        self.max_nesting
    }

    pub fn emit_open_and_close(&self) -> bool {
        self.emit_open_and_close
    }

    pub fn channel_capacity(&self) -> Option<usize> {
        self.channel_capacity
    }
}

/// A compiled query plus scan options. Cheap to clone; the automaton is
/// shared read-only.
#[derive(Debug, Clone)]
pub struct Matcher {
    pub(crate) automaton: Arc<Automaton>,
    pub(crate) options: MatchOptions,
}

impl Matcher {
    pub fn new(automaton: Automaton) -> Self {
        Self { automaton: Arc::new(automaton), options: MatchOptions::default() }
    }

    /// Compile a query and wrap it with default options.
    pub fn compile(query: &PathQuery) -> Result<Self, CompileError> {
        Ok(Self::new(compile(query)?))
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Run the scan over `tokens` on a dedicated thread and return the lazy
    /// stream of match channels.
    ///
    /// The stream is single-use and ordered by opening-token position.
    /// Dropping it cancels the scan at the next token, and a spent match
    /// budget ends the scan as soon as the last committed subtree closes, so
    /// the scanning thread never outlives the outer consumer on unbounded
    /// input. Every emitted channel must be drained or dropped — a bounded
    /// channel at capacity stalls the scan by design, so an
    /// emitted-but-ignored channel can block it indefinitely.
    pub fn scan<T, I>(&self, tokens: I) -> MatchStream<T>
    where
        T: TreeToken,
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let (out_tx, out_rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let automaton = Arc::clone(&self.automaton);
        let options = self.options.clone();
        let flag = Arc::clone(&cancelled);
        thread::spawn(move || {
            run_scan(&automaton, &options, tokens.into_iter(), &out_tx, &flag);
        });
        MatchStream { rx: out_rx, cancelled }
    }
}

/// Lazy, single-pass sequence of match channels produced by
/// [`Matcher::scan`].
#[derive(Debug)]
pub struct MatchStream<T> {
    rx: mpsc::Receiver<Result<SubtreeEvents<T>, MatchError>>,
    cancelled: Arc<AtomicBool>,
}

impl<T> Drop for MatchStream<T> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl<T> Iterator for MatchStream<T> {
    type Item = Result<SubtreeEvents<T>, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}

/// One entry per currently-open ancestor. The resetting flag is sticky and
/// local to its branch: it travels down the stack on every push and reverts
/// when the branch closes, never through shared state.
#[derive(Debug, Clone, Copy)]
struct BranchFrame {
    state: StateId,
    resetting: bool,
}

fn run_scan<T: TreeToken>(
    automaton: &Automaton,
    options: &MatchOptions,
    tokens: impl Iterator<Item = T>,
    out: &mpsc::Sender<Result<SubtreeEvents<T>, MatchError>>,
    cancelled: &AtomicBool,
) {
    // Invariant: stack.len() == depth + 1 at every token boundary.
    let mut stack: SmallVec<[BranchFrame; 16]> =
        smallvec![BranchFrame { state: automaton.start(), resetting: false }];
    let mut depth = 0usize;
    let mut open: Vec<SubtreeFeed<T>> = Vec::new();
    let mut matches_left = options.max_matches;
    let mut next_ordinal = 0usize;

    for token in tokens {
        if cancelled.load(Ordering::Relaxed) {
            tracing::debug!("match stream dropped, cancelling scan");
            // Feeds are dropped without End markers: consumers see a
            // torn-down scan, not completed matches.
            return;
        }
        // A spent budget with no channel still open can never commit or
        // forward another token; stop reading input.
        if matches_left == Some(0) && open.is_empty() {
            tracing::debug!("match budget spent, ending scan early");
            return;
        }
        match token.classify() {
            TokenClass::Open(fact) => {
                let top = *stack.last().expect("stack holds one frame per open ancestor");
                let stepped = match automaton.step(top.state, &fact) {
                    Ok(stepped) => stepped,
                    Err(violation) => {
                        tracing::error!(state = violation.state, "determinism violation, aborting scan");
                        let _ = out.send(Err(violation.into()));
                        // Drop all feeds without End markers: consumers see a
                        // torn-down scan, not a completed match.
                        return;
                    }
                };
                match stepped {
                    Some(next_state) => {
                        let commit = !top.resetting
                            && matches_left != Some(0)
                            && options.max_nesting.is_none_or(|n| open.len() <= n)
                            && automaton.is_final(next_state);
                        if commit {
                            let (feed, events) = SubtreeEvents::create(
                                next_ordinal,
                                depth,
                                options.channel_capacity,
                                options.emit_open_and_close,
                            );
                            if out.send(Ok(events)).is_err() {
                                tracing::debug!("match stream dropped, cancelling scan");
                                return;
                            }
                            tracing::debug!(ordinal = next_ordinal, depth, "match committed");
                            next_ordinal += 1;
                            matches_left = matches_left.map(|m| m - 1);
                            open.push(feed);
                        }
                        for feed in open.iter_mut() {
                            // Only the channel committed at this very token
                            // may withhold its own opening token; enclosing
                            // channels always receive it.
                            if feed.depth == depth && !feed.own_delimiters {
                                continue;
                            }
                            feed.offer(token.clone());
                        }
                        stack.push(BranchFrame { state: next_state, resetting: top.resetting });
                        depth += 1;
                    }
                    None => {
                        // Mismatch: sticky per-branch reset, state stays put.
                        for feed in open.iter_mut() {
                            feed.offer(token.clone());
                        }
                        stack.push(BranchFrame { state: top.state, resetting: true });
                        depth += 1;
                    }
                }
            }
            TokenClass::Close => {
                if depth == 0 {
                    // No open branch pairs with this close; reference
                    // behavior tolerates it.
                    tracing::debug!("unmatched close ignored");
                    continue;
                }
                let vacated = depth - 1;
                for feed in open.iter_mut() {
                    if feed.depth == vacated && !feed.own_delimiters {
                        continue;
                    }
                    feed.offer(token.clone());
                }
                for feed in open.iter_mut().filter(|f| f.depth == vacated) {
                    tracing::trace!(ordinal = feed.ordinal, "match complete");
                    feed.finish();
                }
                open.retain(|f| f.depth != vacated);
                stack.pop();
                depth -= 1;
            }
            TokenClass::Other => {
                for feed in open.iter_mut() {
                    feed.offer(token.clone());
                }
            }
        }
    }

    // End of input. Still-open channels are force-terminated with their End
    // marker: documented truncation, not an error.
    if !open.is_empty() {
        tracing::debug!(open = open.len(), "input ended with open matches, truncating");
    }
    for feed in open.iter_mut() {
        feed.finish();
    }
}
