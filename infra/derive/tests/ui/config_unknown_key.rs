#[xcore_derive::config(name = "bank", reload)]
struct Bank;

fn main() {}
