//! Domain data: pass definitions, bundles, manifests.

pub mod bundle;
pub mod definition;
pub mod manifest;

pub use bundle::{PassBundle, MANIFEST_JSON, PASS_JSON, SIGNATURE};
pub use manifest::Manifest;
