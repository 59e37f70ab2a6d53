//! Archive fetch and install.
//!
//! - [`fetch`] - the [`ArchiveFetcher`] seam and its HTTP implementation
//! - [`extract`] - the [`ArchiveExtractor`] seam, in-process and system `tar`
//! - [`installer`] - [`PackageInstaller`], which ties both to a profile

pub mod extract;
pub mod fetch;
pub mod installer;

pub use extract::{ArchiveExtractor, ExtractorKind, SystemTarExtractor, TarGzExtractor};
pub use fetch::{ArchiveFetcher, HttpFetcher};
pub use installer::{
    read_record, IdempotencyCheck, InstallRecord, InstallationOutcome, PackageInstaller,
    INSTALL_MARKER,
};
