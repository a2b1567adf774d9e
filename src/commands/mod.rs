//! Subcommand handlers.

pub mod annotate;
pub mod generate;
pub mod verify;

pub use annotate::run_annotate;
pub use generate::run_generate;
pub use verify::run_verify;
