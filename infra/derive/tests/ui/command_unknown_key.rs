#[xcore_derive::command(aliases("pay"), hidden)]
struct Pay;

fn main() {}
