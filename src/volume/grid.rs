//! Voxel grid: dimensions, physical spacing, and a flat sample buffer.
//!
//! Both the anatomical scan and the segmentation label volume share this
//! type; they are created together by the loader with identical dimensions
//! and spacing, and dropped together when a new scan is loaded.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};

/// Grid dimensions in voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total voxel count.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the signed voxel coordinate lies in [0,nx) x [0,ny) x [0,nz).
    pub fn contains(&self, x: i64, y: i64, z: i64) -> bool {
        x >= 0 && y >= 0 && z >= 0
            && (x as usize) < self.nx
            && (y as usize) < self.ny
            && (z as usize) < self.nz
    }

    /// Flat buffer index for an in-bounds coordinate: x + y*nx + z*nx*ny.
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.nx + z * self.nx * self.ny
    }
}

/// A 3D scalar volume with millimeter spacing.
#[derive(Clone, Debug)]
pub struct VoxelGrid<T> {
    dims: GridDims,
    /// Voxel spacing (sx, sy, sz) in millimeters. Components are non-zero.
    spacing: Vec3,
    data: Vec<T>,
}

/// Anatomical scan intensities.
pub type ScanGrid = VoxelGrid<f32>;

/// Segmentation labels; 0 is background.
pub type LabelGrid = VoxelGrid<u8>;

impl<T: Copy + Default> VoxelGrid<T> {
    /// Create a grid filled with the default sample value.
    pub fn new(dims: GridDims, spacing: Vec3) -> Result<Self> {
        Self::from_data(dims, spacing, vec![T::default(); dims.len()])
    }
}

impl<T: Copy> VoxelGrid<T> {
    /// Create a grid from an existing flat buffer.
    ///
    /// Fails if the buffer length does not match the dimensions or any
    /// spacing component is zero.
    pub fn from_data(dims: GridDims, spacing: Vec3, data: Vec<T>) -> Result<Self> {
        if data.len() != dims.len() {
            return Err(Error::BufferShape {
                nx: dims.nx,
                ny: dims.ny,
                nz: dims.nz,
                actual: data.len(),
            });
        }
        if spacing.x == 0.0 || spacing.y == 0.0 || spacing.z == 0.0 {
            return Err(Error::ZeroSpacing(spacing.x, spacing.y, spacing.z));
        }
        Ok(Self { dims, spacing, data })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// Physical volume of one voxel in mm^3. Spacing sign never flips this
    /// negative.
    pub fn voxel_volume_mm3(&self) -> f64 {
        (self.spacing.x as f64 * self.spacing.y as f64 * self.spacing.z as f64).abs()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.data[self.dims.index(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        let idx = self.dims.index(x, y, z);
        self.data[idx] = value;
    }

    /// True if this grid shares dimensions and spacing with another.
    pub fn same_topology<U: Copy>(&self, other: &VoxelGrid<U>) -> bool {
        self.dims == other.dims && self.spacing == other.spacing
    }
}
