#[xcore_derive::config(shared_root)]
struct General;

fn main() {}
