//! Archive extraction.
//!
//! Two extractors unpack a gzip-compressed tar stream into a directory:
//! [`TarGzExtractor`] does it in process, [`SystemTarExtractor`] pipes the
//! stream into the system `tar` and judges success by its exit status.

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};

/// Unpacks an archive stream into a destination directory.
pub trait ArchiveExtractor {
    fn extract(&self, archive: Box<dyn Read>, dest: &Path) -> Result<()>;
}

/// Which extractor a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractorKind {
    /// In-process gzip + tar.
    #[default]
    Builtin,
    /// `tar -xz -C <dest> -f -`
    SystemTar,
}

impl ExtractorKind {
    /// Build the extractor for this kind.
    pub fn extractor(&self) -> Box<dyn ArchiveExtractor> {
        match self {
            ExtractorKind::Builtin => Box::new(TarGzExtractor),
            ExtractorKind::SystemTar => Box::new(SystemTarExtractor::default()),
        }
    }
}

/// In-process `.tar.gz` extraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: Box<dyn Read>, dest: &Path) -> Result<()> {
        let mut tarball = tar::Archive::new(GzDecoder::new(archive));
        tarball
            .unpack(dest)
            .with_context(|| format!("Failed to extract archive into {}", dest.display()))
    }
}

/// Extraction through the system `tar` binary.
#[derive(Debug, Clone)]
pub struct SystemTarExtractor {
    program: String,
}

impl Default for SystemTarExtractor {
    fn default() -> Self {
        Self {
            program: "tar".to_string(),
        }
    }
}

impl SystemTarExtractor {
    /// Use a specific tar-compatible program.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl ArchiveExtractor for SystemTarExtractor {
    fn extract(&self, mut archive: Box<dyn Read>, dest: &Path) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("-xz")
            .arg("-C")
            .arg(dest)
            .args(["-f", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;

        // tar may exit before consuming all input; its status decides the result
        let copied = match child.stdin.take() {
            Some(mut stdin) => io::copy(&mut archive, &mut stdin).map(|_| ()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.program,
                output
                    .status
                    .code()
                    .map(|c| format!("status {}", c))
                    .unwrap_or_else(|| "a signal".to_string()),
                stderr.trim()
            );
        }

        copied.context("Failed to stream archive into tar")
    }
}
