use std::marker::PhantomData;

use fieldsieve::{FilterPolicy, Sieve};

#[derive(Sieve)]
#[sieve(title = "Page")]
struct Page<T, M> {
    #[sieve(tags("internal"))]
    cursor: Option<String>,
    items: Vec<T>,
    marker: PhantomData<M>,
}

struct NotRenderable;

fn main() {
    let page: Page<u32, NotRenderable> = Page {
        cursor: None,
        items: vec![1, 2],
        marker: PhantomData,
    };

    let _ = fieldsieve::render_filtered(&page, &FilterPolicy::exclude(["internal"]));
    let _ = fieldsieve::build_schema::<Page<u32, NotRenderable>>();
}
