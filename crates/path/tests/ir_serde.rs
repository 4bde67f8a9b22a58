use rstest::rstest;

use treestream_path::{Axis, NodeTest, PathQuery, Predicate, Step, StepAlternative};

#[rstest]
fn query_round_trips_through_json() {
    let query = PathQuery::default()
        .step(Step::descendant(NodeTest::named_ns("urn:x", "item")))
        .step(
            Step::single(
                Axis::Child,
                NodeTest::AnyNode,
                Predicate::exists("id").and(Predicate::eq("kind", "leaf").not()),
            )
            .or(StepAlternative::new(
                Axis::Descendant,
                NodeTest::named("fallback"),
                Predicate::neq("kind", "leaf"),
            )),
        );

    let json = serde_json::to_string(&query).unwrap();
    let back: PathQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
}
