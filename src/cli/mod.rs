pub mod args;
pub mod command;
pub mod render;
pub mod repl;

pub use args::Args;
pub use repl::Repl;
