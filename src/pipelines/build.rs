//! The pass build workflow.
//!
//! One `PassGenerator` owns one build: it loads the signing material up
//! front, refuses duplicate archives, and walks the staging → manifest →
//! sign → package → finalize sequence. The staging folder is scoped to the
//! build identifier and removed on every exit path, error returns and
//! unwinds included.

use crate::domain::bundle::{PassBundle, MANIFEST_JSON, SIGNATURE};
use crate::domain::definition::PassDefinition;
use crate::domain::manifest::Manifest;
use crate::infra::config::PassConfig;
use crate::infra::error::{PassError, PassResult};
use crate::infra::storage::Storage;
use crate::services::certificates::SigningIdentity;
use crate::services::packager::ArchivePackager;
use crate::services::signer::ManifestSigner;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Declared MIME type of the produced archive
pub const PASS_MIME_TYPE: &str = "application/vnd.apple.pkpass";

/// Pipeline position of one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Created,
    Staged,
    ManifestWritten,
    Signed,
    Packaged,
    Finalized,
    Failed,
}

/// Per-build staging directory, removed when the guard goes out of scope
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    fn create(path: PathBuf) -> PassResult<Self> {
        fs::create_dir_all(&path).map_err(|e| {
            PassError::IoError(format!(
                "Failed to create staging directory {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { path })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "Failed to remove staging directory {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Builds one signed pass archive for one build identifier
#[derive(Debug)]
pub struct PassGenerator<S: Storage> {
    build_id: String,
    archive_name: String,
    storage: S,
    identity: SigningIdentity,
    bundle: PassBundle,
    state: BuildState,
}

impl<S: Storage> PassGenerator<S> {
    /// Start a build.
    ///
    /// Loads and validates the certificate material immediately so a broken
    /// configuration fails before any content is staged. With no identifier
    /// given, a unique `pass_<uuid>` one is generated. An already-persisted
    /// archive under the same identifier is a conflict unless the config sets
    /// `overwrite_existing`, in which case the old archive is deleted first.
    pub fn new(build_id: Option<String>, config: &PassConfig, storage: S) -> PassResult<Self> {
        config.validate()?;

        let identity = SigningIdentity::load(
            &config.certificate_store_path,
            &config.certificate_store_password,
            &config.wwdr_certificate_path,
        )?;

        let build_id =
            build_id.unwrap_or_else(|| format!("pass_{}", Uuid::new_v4().simple()));
        Self::validate_build_id(&build_id)?;

        let archive_name = format!("{build_id}.pkpass");

        if storage.exists(&archive_name) {
            if config.overwrite_existing {
                log::info!("Replacing existing archive {archive_name}");
                storage.delete(&archive_name)?;
            } else {
                return Err(PassError::ConflictError(format!(
                    "The file {archive_name} already exists, try another pass id or fetch it"
                )));
            }
        }

        Ok(Self {
            build_id,
            archive_name,
            storage,
            identity,
            bundle: PassBundle::default(),
            state: BuildState::Created,
        })
    }

    /// Set the pass definition from the typed model.
    ///
    /// Runs the definition's required-field validation before accepting it.
    pub fn set_definition(&mut self, definition: &PassDefinition) -> PassResult<()> {
        definition.validate()?;
        self.bundle.set_pass_json(definition.to_json()?);
        Ok(())
    }

    /// Set the pass definition from a pre-serialized JSON document
    pub fn set_definition_json(&mut self, json: &str) -> PassResult<()> {
        serde_json::from_str::<serde_json::Value>(json).map_err(|e| {
            PassError::FormatError(format!("An invalid JSON pass definition was provided: {e}"))
        })?;
        self.bundle.set_pass_json(json.as_bytes().to_vec());
        Ok(())
    }

    /// Add an asset file (images and the like) to the pass
    pub fn add_asset<P: AsRef<Path>>(&mut self, path: P) -> PassResult<()> {
        self.bundle.add_asset(path)
    }

    /// Run the full pipeline and return the finished archive bytes.
    ///
    /// The archive is also kept in persistent storage for later retrieval.
    /// On failure the originating error propagates, the state becomes
    /// `Failed`, and nothing reaches persistent storage.
    pub fn build(&mut self) -> PassResult<Vec<u8>> {
        match self.run_pipeline() {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.state = BuildState::Failed;
                log::warn!("Build {} failed: {}", self.build_id, e);
                Err(e)
            }
        }
    }

    fn run_pipeline(&mut self) -> PassResult<Vec<u8>> {
        if self.bundle.pass_json().is_empty() {
            return Err(PassError::ValidationError(
                "No pass definition was set for this build".to_string(),
            ));
        }

        // Guard removes the staging folder on every exit path below
        let _staging = StagingDir::create(self.storage.resolve(&self.build_id))?;
        self.state = BuildState::Staged;
        log::debug!("Build {}: staged", self.build_id);

        let manifest = Manifest::from_bundle(&self.bundle)?;
        let manifest_bytes = manifest.to_json()?;
        self.storage
            .write(&format!("{}/{}", self.build_id, MANIFEST_JSON), &manifest_bytes)?;
        self.state = BuildState::ManifestWritten;
        log::debug!(
            "Build {}: manifest written ({} entries)",
            self.build_id,
            manifest.entries().len()
        );

        let signature = ManifestSigner::new(&self.identity).sign(&manifest_bytes)?;
        self.storage
            .write(&format!("{}/{}", self.build_id, SIGNATURE), &signature)?;
        self.state = BuildState::Signed;
        log::debug!("Build {}: manifest signed", self.build_id);

        let staged_archive = format!("{}/{}", self.build_id, self.archive_name);
        ArchivePackager::write(
            &self.storage.resolve(&staged_archive),
            self.bundle.pass_json(),
            &manifest_bytes,
            &signature,
            self.bundle.assets(),
        )?;
        self.state = BuildState::Packaged;
        log::debug!("Build {}: packaged", self.build_id);

        self.storage.rename(&staged_archive, &self.archive_name)?;
        self.state = BuildState::Finalized;
        log::info!(
            "Build {}: finalized as {}",
            self.build_id,
            self.archive_name
        );

        self.storage.read(&self.archive_name)
    }

    /// The identifier naming this build and its archive
    #[must_use]
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// The archive filename under the storage root
    #[must_use]
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Current pipeline state
    #[must_use]
    pub fn state(&self) -> BuildState {
        self.state
    }

    fn validate_build_id(build_id: &str) -> PassResult<()> {
        if build_id.is_empty() {
            return Err(PassError::ValidationError(
                "The build identifier must not be empty".to_string(),
            ));
        }
        if build_id.contains(['/', '\\']) || build_id.contains("..") {
            return Err(PassError::ValidationError(format!(
                "The build identifier '{build_id}' must not contain path components"
            )));
        }
        Ok(())
    }
}

/// Retrieve a previously built pass from storage, if present
pub fn fetch_pass<S: Storage>(storage: &S, pass_id: &str) -> PassResult<Option<Vec<u8>>> {
    let archive_name = format!("{pass_id}.pkpass");
    if storage.exists(&archive_name) {
        storage.read(&archive_name).map(Some)
    } else {
        Ok(None)
    }
}

/// The fixed MIME type identifying the pass-archive format
#[must_use]
pub const fn pass_mime_type() -> &'static str {
    PASS_MIME_TYPE
}
