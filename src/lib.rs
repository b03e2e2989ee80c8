//! Pass Generator Library
//!
//! Builds cryptographically signed Apple Wallet (`.pkpass`) archives from a
//! JSON pass definition and a set of asset files. The pipeline hashes every
//! bundled file into a manifest, produces a detached PKCS#7 signature over
//! the manifest with the pass certificate chain, and packages everything
//! into a flat zip archive.
//!
//! ```no_run
//! use pass_generator::{
//!     LocalStorage, PassConfig, PassDefinition, PassGenerator, PassStyle, StyleFields,
//! };
//!
//! # fn main() -> Result<(), pass_generator::PassError> {
//! let config = PassConfig::from_file("passgenerator.toml")?;
//! let storage = LocalStorage::new(&config.storage_root)?;
//!
//! let definition = PassDefinition::new(
//!     "Ticket for Rustfest",
//!     &config.organization_name,
//!     &config.pass_type_identifier,
//!     "8c1d7e2f",
//!     &config.team_identifier,
//!     PassStyle::EventTicket(StyleFields::default()),
//! );
//!
//! let mut generator = PassGenerator::new(Some("8c1d7e2f".into()), &config, storage)?;
//! generator.set_definition(&definition)?;
//! generator.add_asset("assets/icon.png")?;
//! let pkpass = generator.build()?;
//! # let _ = pkpass;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod infra;
pub mod pipelines;
pub mod services;

pub use domain::bundle::{PassBundle, MANIFEST_JSON, PASS_JSON, SIGNATURE};
pub use domain::definition::{
    Barcode, BarcodeFormat, Beacon, BoardingPassFields, DataDetectorType, DateStyle, Field,
    Location, Nfc, NumberStyle, PassDefinition, PassStyle, StyleFields, TextAlignment,
    TransitType,
};
pub use domain::manifest::Manifest;
pub use infra::config::PassConfig;
pub use infra::error::{PassError, PassResult};
pub use infra::storage::{LocalStorage, Storage};
pub use pipelines::build::{
    fetch_pass, pass_mime_type, BuildState, PassGenerator, PASS_MIME_TYPE,
};
pub use services::certificates::SigningIdentity;
pub use services::signer::ManifestSigner;
