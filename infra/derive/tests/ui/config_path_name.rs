#[xcore_derive::config(name = "../escape")]
struct Escaping;

fn main() {}
