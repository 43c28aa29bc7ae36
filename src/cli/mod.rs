pub mod app;
pub mod args;
pub mod render;

pub use args::Cli;
