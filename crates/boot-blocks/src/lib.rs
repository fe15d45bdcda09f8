pub mod blocks;
pub mod error;
pub mod fragment;
pub mod log_sanitize;
pub mod manifest;
pub mod net;
pub mod paths;
pub mod patch;
pub mod runner;

pub use error::{Error, ErrorKind, Result};
