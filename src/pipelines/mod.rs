//! Build workflows.

pub mod build;

pub use build::{fetch_pass, pass_mime_type, BuildState, PassGenerator, PASS_MIME_TYPE};
