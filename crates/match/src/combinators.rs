//! Derived operations: thin compositions over [`Matcher::scan`].

use std::sync::mpsc;
use std::thread;

use crate::channel::SubtreeEvents;
use crate::error::MatchError;
use crate::matcher::{MatchStream, Matcher};
use crate::token::TreeToken;

impl Matcher {
    /// First match only, flattened to its token sequence. Runs with a match
    /// budget of one and no nested matches competing for it.
    pub fn first<T, I>(&self, tokens: I) -> Result<Option<Vec<T>>, MatchError>
    where
        T: TreeToken,
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let constrained = Matcher {
            automaton: self.automaton.clone(),
            options: self.options.clone().with_max_matches(1).with_max_nesting(0),
        };
        match constrained.scan(tokens).next() {
            None => Ok(None),
            Some(Err(error)) => Err(error),
            Some(Ok(subtree)) => Ok(Some(subtree.collect())),
        }
    }

    /// All matches that are not nested inside another match.
    pub fn topmost<T, I>(&self, tokens: I) -> MatchStream<T>
    where
        T: TreeToken,
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let constrained = Matcher {
            automaton: self.automaton.clone(),
            options: self.options.clone().with_max_nesting(0),
        };
        constrained.scan(tokens)
    }

    /// Feed every match to `sink`, one consumer thread per match, discarding
    /// outputs. Returns once the scan and every consumer finished.
    pub fn through<T, I, S>(&self, tokens: I, sink: S) -> Result<(), MatchError>
    where
        T: TreeToken,
        I: IntoIterator<Item = T> + Send + 'static,
        S: Fn(SubtreeEvents<T>) + Send + Sync,
    {
        thread::scope(|scope| {
            for matched in self.scan(tokens) {
                let subtree = matched?;
                let sink = &sink;
                scope.spawn(move || sink(subtree));
            }
            Ok(())
        })
    }

    /// Run `f` over every match concurrently and collect the results.
    ///
    /// With `deterministic` the results come back in the order matches were
    /// opened, regardless of completion order; otherwise in completion
    /// order.
    pub fn aggregate<T, I, F, R>(
        &self,
        tokens: I,
        f: F,
        deterministic: bool,
    ) -> Result<Vec<R>, MatchError>
    where
        T: TreeToken,
        I: IntoIterator<Item = T> + Send + 'static,
        F: Fn(SubtreeEvents<T>) -> R + Send + Sync,
        R: Send,
    {
        let (done_tx, done_rx) = mpsc::channel::<(usize, R)>();
        let scan_result: Result<(), MatchError> = thread::scope(|scope| {
            for matched in self.scan(tokens) {
                let subtree = matched?;
                let f = &f;
                let done = done_tx.clone();
                scope.spawn(move || {
                    let ordinal = subtree.ordinal();
                    let _ = done.send((ordinal, f(subtree)));
                });
            }
            Ok(())
        });
        drop(done_tx);
        scan_result?;

        // Completion order as received; spawn order when deterministic.
        let mut completed: Vec<(usize, R)> = done_rx.into_iter().collect();
        if deterministic {
            completed.sort_by_key(|(ordinal, _)| *ordinal);
        }
        Ok(completed.into_iter().map(|(_, result)| result).collect())
    }
}
