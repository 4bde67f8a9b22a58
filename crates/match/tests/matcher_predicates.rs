use rstest::rstest;

use treestream_match::simple::{SimpleToken, close, open};
use treestream_match::{Axis, Matcher, NodeTest, PathQuery, Predicate, Step};

fn match_count(matcher: &Matcher, tokens: Vec<SimpleToken>) -> usize {
    matcher.scan(tokens).map(|m| m.expect("scan succeeds")).count()
}

fn eq_matcher() -> Matcher {
    let step = Step::single(Axis::Child, NodeTest::named("a"), Predicate::eq("id", "v"));
    Matcher::compile(&PathQuery::default().step(step)).unwrap()
}

#[rstest]
fn eq_matches_the_exact_value() {
    let tokens = vec![open("a").attr("id", "v"), close()];
    assert_eq!(match_count(&eq_matcher(), tokens), 1);
}

#[rstest]
fn eq_rejects_a_differing_value() {
    let tokens = vec![open("a").attr("id", "w"), close()];
    assert_eq!(match_count(&eq_matcher(), tokens), 0);
}

#[rstest]
fn eq_rejects_an_absent_attribute() {
    let tokens = vec![open("a"), close()];
    assert_eq!(match_count(&eq_matcher(), tokens), 0);
}

#[rstest]
fn exists_accepts_any_value() {
    let step = Step::single(Axis::Child, NodeTest::named("a"), Predicate::exists("id"));
    let matcher = Matcher::compile(&PathQuery::default().step(step)).unwrap();

    assert_eq!(match_count(&matcher, vec![open("a").attr("id", "w"), close()]), 1);
    assert_eq!(match_count(&matcher, vec![open("a"), close()]), 0);
}

#[rstest]
fn composed_predicates_gate_commits() {
    // //item[@kind='x' or (@id and not @kind='y')]
    let predicate = Predicate::eq("kind", "x")
        .or(Predicate::exists("id").and(Predicate::eq("kind", "y").not()));
    let step = Step::single(Axis::Descendant, NodeTest::named("item"), predicate);
    let matcher = Matcher::compile(&PathQuery::default().step(step)).unwrap();

    let tokens = vec![
        open("root"),
        open("item").attr("kind", "x"),
        close(),
        open("item").attr("id", "1").attr("kind", "y"),
        close(),
        open("item").attr("id", "2"),
        close(),
        open("item"),
        close(),
        close(),
    ];
    assert_eq!(match_count(&matcher, tokens), 2);
}

#[rstest]
fn namespace_qualified_tests_select_by_namespace() {
    use treestream_match::simple::open_ns;

    let matcher =
        Matcher::compile(&PathQuery::default().step(Step::child(NodeTest::named_ns("urn:x", "a"))))
            .unwrap();

    assert_eq!(match_count(&matcher, vec![open_ns("urn:x", "a"), close()]), 1);
    assert_eq!(match_count(&matcher, vec![open_ns("urn:y", "a"), close()]), 0);
    assert_eq!(match_count(&matcher, vec![open("a"), close()]), 0);
}
