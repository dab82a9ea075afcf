use std::borrow::Cow;

use fieldsieve::{FilterPolicy, Sieve};

#[derive(Sieve)]
struct Borrowed<'a> {
    #[sieve(tags("pii"))]
    name: &'a str,
    notes: Cow<'a, str>,
    scores: &'a [u8],
}

#[derive(Sieve)]
struct Label<'a>(&'a str);

fn main() {
    let name = String::from("Ada");
    let scores = [1, 2, 3];
    let borrowed = Borrowed {
        name: &name,
        notes: Cow::Borrowed("none"),
        scores: &scores,
    };

    let _ = fieldsieve::render_filtered(&borrowed, &FilterPolicy::include(["pii"]));
    let _ = fieldsieve::render(&Label("tag"));
    let _ = fieldsieve::build_schema::<Borrowed<'static>>();
}
