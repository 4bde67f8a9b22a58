//! Extract matching subtrees from a small event stream and print them.
//!
//! ```sh
//! cargo run --example treestream_extract
//! ```

use treestream_match::simple::{SimpleToken, close, open, text};
use treestream_match::{Axis, Matcher, NodeTest, PathQuery, Predicate, Step};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // //entry[@kind='note']
    let query = PathQuery::default().step(Step::single(
        Axis::Descendant,
        NodeTest::named("entry"),
        Predicate::eq("kind", "note"),
    ));
    let matcher = Matcher::compile(&query)?;

    let tokens = vec![
        open("journal"),
        open("entry").attr("kind", "note"),
        text("remember the milk"),
        close(),
        open("entry").attr("kind", "task"),
        text("ship the release"),
        close(),
        open("archive"),
        open("entry").attr("kind", "note"),
        text("old idea"),
        close(),
        close(),
        close(),
    ];

    for matched in matcher.scan(tokens) {
        let subtree = matched?;
        println!("match #{}:", subtree.ordinal());
        for token in subtree {
            match token {
                SimpleToken::Open { name, .. } => println!("  open  <{}>", name.local),
                SimpleToken::Close => println!("  close"),
                SimpleToken::Text(value) => println!("  text  {value:?}"),
            }
        }
    }
    Ok(())
}
