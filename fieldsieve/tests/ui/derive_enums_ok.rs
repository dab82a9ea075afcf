use fieldsieve::{FilterPolicy, Sieve};

#[derive(Sieve)]
enum Never {}

#[derive(Sieve)]
#[sieve(title = "Color")]
enum Color {
    Red,
    Green,
}

#[derive(Sieve)]
enum Payload<T> {
    Empty,
    One(T),
    Pair(T, T),
    Named { value: T, color: Color },
}

fn main() {
    let payload = Payload::Named {
        value: 1_u8,
        color: Color::Green,
    };

    let _ = fieldsieve::render_filtered(&payload, &FilterPolicy::pass_through());
    let _ = fieldsieve::render(&Payload::<String>::Empty);
    let _ = fieldsieve::build_schema::<Payload<String>>();
    let _ = fieldsieve::build_schema::<Color>();
    let _ = fieldsieve::build_schema::<Never>();
}
