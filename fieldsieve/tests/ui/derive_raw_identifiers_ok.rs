use fieldsieve::{FilterPolicy, Sieve};

#[derive(Sieve)]
struct Keywords {
    #[sieve(tags("internal"), title = "Type")]
    r#type: String,
    r#match: bool,
}

#[derive(Sieve)]
enum Token {
    r#Loop,
    r#Fn { r#ref: u8 },
}

fn main() {
    let value = Keywords {
        r#type: "kind".into(),
        r#match: true,
    };

    let _ = fieldsieve::render_filtered(&value, &FilterPolicy::exclude(["internal"]));
    let _ = fieldsieve::render(&Token::r#Fn { r#ref: 1 });
    let _ = fieldsieve::render(&Token::Loop);
    let _ = fieldsieve::lookup::<Keywords>("type");
}
