//! Per-match token channels.
//!
//! Each committed match gets one single-producer/single-consumer conduit fed
//! by the scanning thread. End-of-data is an explicit [`SubtreeEvent::End`]
//! marker, distinct from channel disconnection: a consumer that sees `End`
//! knows the match completed (its closing token was consumed, or the input
//! ended), while a bare disconnect means the scan was torn down.

use std::sync::mpsc;

/// One element of a match channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtreeEvent<T> {
    Token(T),
    /// Explicit end-of-data marker; always the last event of a completed
    /// match.
    End,
}

pub(crate) enum FeedSender<T> {
    Bounded(mpsc::SyncSender<SubtreeEvent<T>>),
    Unbounded(mpsc::Sender<SubtreeEvent<T>>),
}

impl<T> FeedSender<T> {
    fn send(&self, event: SubtreeEvent<T>) -> Result<(), ()> {
        match self {
            // Blocks while the queue is at capacity: deliberate backpressure.
            FeedSender::Bounded(tx) => tx.send(event).map_err(|_| ()),
            FeedSender::Unbounded(tx) => tx.send(event).map_err(|_| ()),
        }
    }
}

/// Producer half, owned by the scanning thread. Tagged with the depth at
/// which the match was committed and its spawn ordinal.
pub(crate) struct SubtreeFeed<T> {
    tx: FeedSender<T>,
    pub(crate) depth: usize,
    pub(crate) ordinal: usize,
    /// Whether this channel receives its own delimiting open/close tokens.
    pub(crate) own_delimiters: bool,
    /// Consumer dropped its receiver; stop offering, keep the registry entry
    /// until the subtree closes so nesting accounting stays correct.
    muted: bool,
}

impl<T> SubtreeFeed<T> {
    pub(crate) fn offer(&mut self, token: T) {
        if self.muted {
            return;
        }
        if self.tx.send(SubtreeEvent::Token(token)).is_err() {
            tracing::trace!(ordinal = self.ordinal, "match consumer gone, muting channel");
            self.muted = true;
        }
    }

    pub(crate) fn finish(&mut self) {
        if !self.muted {
            let _ = self.tx.send(SubtreeEvent::End);
            self.muted = true;
        }
    }
}

/// Consumer half of one match: the tokens of exactly one matched subtree, in
/// input order, ending with an explicit end-of-data marker.
///
/// Iterates over tokens; [`SubtreeEvents::recv`] exposes the raw events. The
/// iterator ends on `End` (match complete) and on disconnect (scan aborted).
#[derive(Debug)]
pub struct SubtreeEvents<T> {
    rx: mpsc::Receiver<SubtreeEvent<T>>,
    ordinal: usize,
    done: bool,
}

impl<T> SubtreeEvents<T> {
    pub(crate) fn create(
        ordinal: usize,
        depth: usize,
        capacity: Option<usize>,
        own_delimiters: bool,
    ) -> (SubtreeFeed<T>, SubtreeEvents<T>) {
        let (tx, rx) = match capacity {
            Some(capacity) => {
                let (tx, rx) = mpsc::sync_channel(capacity);
                (FeedSender::Bounded(tx), rx)
            }
            None => {
                let (tx, rx) = mpsc::channel();
                (FeedSender::Unbounded(tx), rx)
            }
        };
        let feed = SubtreeFeed { tx, depth, ordinal, own_delimiters, muted: false };
        let events = SubtreeEvents { rx, ordinal, done: false };
        (feed, events)
    }

    /// Spawn-order index of this match within the scan (0-based, strictly
    /// increasing with the opening-token position).
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Next raw event; `None` after `End` or when the scan was torn down
    /// before this match completed.
    pub fn recv(&mut self) -> Option<SubtreeEvent<T>> {
        if self.done {
            return None;
        }
        match self.rx.recv() {
            Ok(SubtreeEvent::End) => {
                self.done = true;
                Some(SubtreeEvent::End)
            }
            Ok(event) => Some(event),
            Err(mpsc::RecvError) => {
                self.done = true;
                None
            }
        }
    }
}

impl<T> Iterator for SubtreeEvents<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.recv()? {
            SubtreeEvent::Token(token) => Some(token),
            SubtreeEvent::End => None,
        }
    }
}
