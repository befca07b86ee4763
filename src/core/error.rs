//! Error types for the segmentation viewer core

use thiserror::Error;

/// Main error type for the viewer core
#[derive(Debug, Error)]
pub enum Error {
    #[error("buffer length {actual} does not match {nx}x{ny}x{nz} voxels")]
    BufferShape {
        nx: usize,
        ny: usize,
        nz: usize,
        actual: usize,
    },

    #[error("voxel spacing must be non-zero, got ({0}, {1}, {2}) mm")]
    ZeroSpacing(f32, f32, f32),

    #[error("scan and segmentation grids disagree: {0}")]
    GridMismatch(String),

    #[error("volume load failed: {0}")]
    Load(String),
}
