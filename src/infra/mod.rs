//! Infrastructure: errors, configuration, storage.

pub mod config;
pub mod error;
pub mod storage;

pub use config::PassConfig;
pub use error::{PassError, PassResult};
pub use storage::{LocalStorage, Storage};
