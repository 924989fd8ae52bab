#[xcore_derive::command(aliases(""), description = "Nameless")]
struct Nameless;

fn main() {}
