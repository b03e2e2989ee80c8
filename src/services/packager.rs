//! Flat zip assembly of the finished pass archive.

use crate::domain::bundle::{MANIFEST_JSON, PASS_JSON, SIGNATURE};
use crate::infra::error::{PassError, PassResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes the archive: pass.json, manifest.json, signature and every asset
/// as top-level entries, no subdirectories.
pub struct ArchivePackager;

impl ArchivePackager {
    /// Assemble the archive at `out_path`.
    ///
    /// Asset files are read while adding, so a path that disappeared since
    /// the manifest was built surfaces as an IO error here.
    pub fn write(
        out_path: &Path,
        pass_json: &[u8],
        manifest_bytes: &[u8],
        signature_bytes: &[u8],
        assets: &BTreeMap<String, PathBuf>,
    ) -> PassResult<()> {
        let file = fs::File::create(out_path).map_err(|e| {
            PassError::PackagingError(format!(
                "Failed to create archive {}: {}",
                out_path.display(),
                e
            ))
        })?;
        let mut writer = ZipWriter::new(file);

        Self::add_entry(&mut writer, PASS_JSON, pass_json)?;
        Self::add_entry(&mut writer, MANIFEST_JSON, manifest_bytes)?;
        Self::add_entry(&mut writer, SIGNATURE, signature_bytes)?;

        for (basename, path) in assets {
            let contents = fs::read(path).map_err(|e| {
                PassError::IoError(format!("Failed to read asset {}: {}", path.display(), e))
            })?;
            Self::add_entry(&mut writer, basename, &contents)?;
        }

        writer
            .finish()
            .map_err(|e| PassError::PackagingError(format!("Failed to finish archive: {e}")))?;

        log::debug!(
            "Packaged {} with {} asset entries",
            out_path.display(),
            assets.len()
        );
        Ok(())
    }

    fn add_entry<W: Write + std::io::Seek>(
        writer: &mut ZipWriter<W>,
        name: &str,
        bytes: &[u8],
    ) -> PassResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        writer.start_file(name, options).map_err(|e| {
            PassError::PackagingError(format!("Failed to add {name} to archive: {e}"))
        })?;
        writer
            .write_all(bytes)
            .map_err(|e| PassError::PackagingError(format!("Failed to write {name}: {e}")))?;
        Ok(())
    }
}
