pub mod allocation;
pub mod cli;
pub mod error;
pub mod k8s;
pub mod server;

pub use error::{AllocatorError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
