#[xcore_derive::command(aliases("two words"))]
struct Spaced;

fn main() {}
