use criterion::{Criterion, black_box, criterion_group, criterion_main};

use treestream_match::simple::{SimpleToken, close, open, text};
use treestream_match::{Axis, Matcher, NodeTest, PathQuery, Predicate, Step, compile};

fn sample_queries() -> Vec<PathQuery> {
    vec![
        PathQuery::default().step(Step::child(NodeTest::named("root"))),
        PathQuery::default().step(Step::descendant(NodeTest::named("item"))),
        PathQuery::default()
            .step(Step::child(NodeTest::named("root")))
            .step(Step::descendant(NodeTest::named("item")))
            .step(Step::single(Axis::Child, NodeTest::AnyNode, Predicate::exists("id"))),
    ]
}

fn build_sample_document(sections: usize, items: usize) -> Vec<SimpleToken> {
    let mut tokens = vec![open("root")];
    for s in 0..sections {
        tokens.push(open("section").attr("name", &s.to_string()));
        for i in 0..items {
            tokens.push(open("item").attr("id", &format!("{s}-{i}")));
            tokens.push(open("label"));
            tokens.push(text("lorem ipsum"));
            tokens.push(close());
            tokens.push(close());
        }
        tokens.push(close());
    }
    tokens.push(close());
    tokens
}

fn benchmark_compiler(c: &mut Criterion) {
    let queries = sample_queries();
    c.bench_function("compiler/compile", |b| {
        b.iter(|| {
            for query in &queries {
                let automaton = compile(black_box(query)).expect("compile failure");
                black_box(automaton);
            }
        })
    });
}

fn benchmark_scan(c: &mut Criterion) {
    let matcher =
        Matcher::compile(&PathQuery::default().step(Step::descendant(NodeTest::named("item"))))
            .expect("compile failure");
    let document = build_sample_document(10, 50);

    c.bench_function("matcher/scan_descendant_items", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for matched in matcher.scan(black_box(document.clone())) {
                total += matched.expect("scan failure").count();
            }
            black_box(total);
        })
    });
}

criterion_group!(benches, benchmark_compiler, benchmark_scan);
criterion_main!(benches);
