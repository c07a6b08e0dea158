//! Ready-made output streams
//!
//! Any `Write + Send` value can be wrapped with
//! [`shared_stream`](crate::shared_stream); these helpers cover the common
//! process streams and append-mode files.

pub mod console;
pub mod file;

pub use console::{stderr, stdout};
pub use file::open_file;
