use rstest::rstest;

use treestream_match::simple::{SimpleToken, close, open, text};
use treestream_match::{MatchOptions, Matcher, NodeTest, PathQuery, Step, SubtreeEvent};

fn descendant_matcher(name: &str) -> Matcher {
    Matcher::compile(&PathQuery::default().step(Step::descendant(NodeTest::named(name)))).unwrap()
}

#[rstest]
fn withheld_delimiters_leave_only_the_body() {
    let matcher = descendant_matcher("a")
        .with_options(MatchOptions::default().with_open_close_markers(false));
    let tokens = vec![open("r"), open("a"), text("body"), close(), close()];

    let matches: Vec<Vec<SimpleToken>> =
        matcher.scan(tokens).map(|m| m.unwrap().collect()).collect();
    assert_eq!(matches, vec![vec![text("body")]]);
}

/// Only a channel's own delimiters are subject to the policy; enclosing
/// channels receive every token of their subtree unconditionally.
#[rstest]
fn enclosing_channels_always_see_nested_delimiters() {
    let matcher = descendant_matcher("a")
        .with_options(MatchOptions::default().with_open_close_markers(false));
    let tokens = vec![open("a"), open("a"), close(), close()];

    let matches: Vec<Vec<SimpleToken>> =
        matcher.scan(tokens).map(|m| m.unwrap().collect()).collect();
    assert_eq!(matches.len(), 2);
    // Outer channel: inner open/close forwarded, own pair withheld.
    assert_eq!(matches[0], vec![open("a"), close()]);
    // Inner channel: nothing but its withheld delimiters.
    assert_eq!(matches[1], Vec::<SimpleToken>::new());
}

#[rstest]
fn end_marker_is_explicit_and_final() {
    let matcher = descendant_matcher("a");
    let tokens = vec![open("a"), text("x"), close()];

    let mut stream = matcher.scan(tokens);
    let mut subtree = stream.next().unwrap().unwrap();

    assert!(matches!(subtree.recv(), Some(SubtreeEvent::Token(_))));
    assert!(matches!(subtree.recv(), Some(SubtreeEvent::Token(_))));
    assert!(matches!(subtree.recv(), Some(SubtreeEvent::Token(_))));
    assert!(matches!(subtree.recv(), Some(SubtreeEvent::End)));
    assert!(subtree.recv().is_none());
    assert!(stream.next().is_none());
}

#[rstest]
fn truncated_input_terminates_open_channels() {
    let matcher = descendant_matcher("a");
    // No closing tokens at all: the match channel still ends cleanly.
    let tokens = vec![open("r"), open("a"), text("x")];

    let matches: Vec<Vec<SimpleToken>> =
        matcher.scan(tokens).map(|m| m.unwrap().collect()).collect();
    assert_eq!(matches, vec![vec![open("a"), text("x")]]);
}

#[rstest]
fn unmatched_close_is_tolerated() {
    let matcher = Matcher::compile(&PathQuery::default().step(Step::child(NodeTest::named("a"))))
        .unwrap();
    let tokens = vec![close(), open("a"), close(), close()];

    let matches: Vec<Vec<SimpleToken>> =
        matcher.scan(tokens).map(|m| m.unwrap().collect()).collect();
    assert_eq!(matches, vec![vec![open("a"), close()]]);
}

#[rstest]
fn dropping_one_consumer_does_not_disturb_siblings() {
    let matcher = descendant_matcher("item");
    let tokens = vec![
        open("list"),
        open("item"),
        text("a"),
        close(),
        open("item"),
        text("b"),
        close(),
        close(),
    ];

    let mut stream = matcher.scan(tokens);
    // Drop the first match without draining it.
    drop(stream.next().unwrap().unwrap());
    let second: Vec<SimpleToken> = stream.next().unwrap().unwrap().collect();
    assert_eq!(second, vec![open("item"), text("b"), close()]);
    assert!(stream.next().is_none());
}

#[rstest]
fn unbounded_channels_accept_large_subtrees() {
    let matcher = descendant_matcher("a")
        .with_options(MatchOptions::default().with_channel_capacity(None));
    let mut tokens = vec![open("a")];
    for i in 0..2000 {
        tokens.push(text(&i.to_string()));
    }
    tokens.push(close());

    // Drain only after the scan finished; an unbounded channel never stalls
    // the scanner.
    let matches: Vec<Vec<SimpleToken>> =
        matcher.scan(tokens).map(|m| m.unwrap().collect()).collect();
    assert_eq!(matches[0].len(), 2002);
}
