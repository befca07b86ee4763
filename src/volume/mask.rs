//! Scratch bitmap for in-progress brush strokes.
//!
//! The mask shares the segmentation grid's voxel topology but owns a
//! distinct buffer; it accumulates paint during a stroke and is only ever
//! folded into the label grid by an explicit commit. It is zeroed when
//! painting mode is entered and again when it is exited, so uncommitted
//! paint never survives a mode change.

use crate::core::types::IVec3;
use crate::volume::grid::GridDims;

/// One live draw mask exists per painting session.
#[derive(Clone, Debug)]
pub struct DrawMask {
    dims: GridDims,
    data: Vec<u8>,
}

impl DrawMask {
    /// Create a zeroed mask with the given voxel topology.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            data: vec![0; dims.len()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reset every voxel to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// True if no voxel is painted.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Paint a filled sphere of `radius` voxels centered at `center`.
    ///
    /// Offsets with dx^2 + dy^2 + dz^2 <= r^2 are set to `label`; anything
    /// falling outside the grid is skipped per voxel. Values are set, not
    /// accumulated, so repainting the same stroke is idempotent.
    pub fn paint_sphere(&mut self, center: IVec3, radius: i32, label: u8) {
        let r = radius.max(1);
        let r2 = r * r;
        let (nx, ny, nz) = (self.dims.nx as i32, self.dims.ny as i32, self.dims.nz as i32);

        for dz in -r..=r {
            let zz = center.z + dz;
            if zz < 0 || zz >= nz {
                continue;
            }
            for dy in -r..=r {
                let yy = center.y + dy;
                if yy < 0 || yy >= ny {
                    continue;
                }
                for dx in -r..=r {
                    let xx = center.x + dx;
                    if xx < 0 || xx >= nx {
                        continue;
                    }
                    if dx * dx + dy * dy + dz * dz > r2 {
                        continue;
                    }
                    let idx = self.dims.index(xx as usize, yy as usize, zz as usize);
                    self.data[idx] = label;
                }
            }
        }
    }

    /// Indices of painted voxels, for commit.
    pub fn painted(&self) -> impl Iterator<Item = usize> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v > 0)
            .map(|(i, _)| i)
    }

    /// Number of painted voxels.
    pub fn painted_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }
}
