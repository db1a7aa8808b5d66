mod builder;
mod middleware;

pub use builder::{App, Builder};
