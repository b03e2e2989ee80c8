//! Services: certificate loading, manifest signing, archive packaging.

pub mod certificates;
pub mod packager;
pub mod signer;

#[cfg(test)]
pub mod test_certs;

pub use certificates::SigningIdentity;
pub use packager::ArchivePackager;
pub use signer::ManifestSigner;
