//! Loader boundary.
//!
//! Conversion of a user-selected file bundle into volume resources happens
//! outside the core (network upload, DICOM conversion, format decoding).
//! The core consumes the result through these contracts: a bundle loader
//! yields addressable handles, and a pair source yields the decoded
//! anatomical and segmentation grids.

use std::path::PathBuf;

use crate::core::types::Result;
use crate::volume::grid::{LabelGrid, ScanGrid};

/// Addressable resources produced by bundle upload/inference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeHandles {
    /// Anatomical volume resource.
    pub scan_url: String,
    /// Segmentation resource.
    pub labels_url: String,
}

/// Uploads a file bundle and returns resource handles, or fails.
pub trait BundleLoader {
    fn load_bundle(&mut self, files: &[PathBuf]) -> Result<VolumeHandles>;
}

/// Produces a decoded scan/segmentation grid pair.
///
/// The fetch is awaited to completion before any rendering or statistics
/// step begins; the core never observes a partially loaded grid.
pub trait VolumePairSource {
    fn fetch(&mut self) -> Result<(ScanGrid, LabelGrid)>;
}
