pub mod commands;
pub mod logging;
pub mod repl;
pub mod sink;

pub use repl::readline;
pub use sink::TextSink;
