//! Per-label physical volume statistics.
//!
//! Pure scan over a label grid; recomputed on demand after every committed
//! edit rather than maintained incrementally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::volume::grid::LabelGrid;

/// Physical volume derived from the voxel tally of one label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelVolumeRecord {
    /// Number of voxels carrying this label.
    pub voxel_count: usize,
    /// voxel_count * |sx*sy*sz| in mm^3.
    pub volume_mm3: f64,
    /// volume_mm3 / 1000.
    pub volume_ml: f64,
}

/// Tally every non-zero label in the grid and derive physical volumes.
///
/// Deterministic and side-effect free; safe to call repeatedly. Background
/// (value 0) is skipped.
pub fn label_volumes(grid: &LabelGrid) -> BTreeMap<u8, LabelVolumeRecord> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &v in grid.data() {
        if v == 0 {
            continue;
        }
        *counts.entry(v).or_insert(0) += 1;
    }

    let voxel_mm3 = grid.voxel_volume_mm3();
    counts
        .into_iter()
        .map(|(label, voxel_count)| {
            let volume_mm3 = voxel_count as f64 * voxel_mm3;
            (
                label,
                LabelVolumeRecord {
                    voxel_count,
                    volume_mm3,
                    volume_ml: volume_mm3 / 1000.0,
                },
            )
        })
        .collect()
}

/// Total number of labeled (non-background) voxels in a report.
pub fn total_labeled(records: &BTreeMap<u8, LabelVolumeRecord>) -> usize {
    records.values().map(|r| r.voxel_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::volume::grid::GridDims;

    fn grid_with(labels: &[(usize, usize, usize, u8)], spacing: Vec3) -> LabelGrid {
        let mut g = LabelGrid::new(GridDims::new(8, 8, 8), spacing).unwrap();
        for &(x, y, z, v) in labels {
            g.set(x, y, z, v);
        }
        g
    }

    #[test]
    fn test_background_skipped() {
        let g = LabelGrid::new(GridDims::new(4, 4, 4), Vec3::ONE).unwrap();
        assert!(label_volumes(&g).is_empty());
    }

    #[test]
    fn test_counts_per_label() {
        let g = grid_with(
            &[(0, 0, 0, 1), (1, 0, 0, 1), (2, 0, 0, 2), (3, 3, 3, 2), (4, 4, 4, 2)],
            Vec3::ONE,
        );
        let report = label_volumes(&g);
        assert_eq!(report.len(), 2);
        assert_eq!(report[&1].voxel_count, 2);
        assert_eq!(report[&2].voxel_count, 3);
        assert_eq!(total_labeled(&report), 5);
    }

    #[test]
    fn test_physical_volume_identities() {
        let spacing = Vec3::new(0.75, 0.75, 2.5);
        let g = grid_with(&[(0, 0, 0, 7), (1, 1, 1, 7), (2, 2, 2, 7)], spacing);
        let report = label_volumes(&g);
        let rec = report[&7];

        let per_voxel = (0.75f64 * 0.75 * 2.5).abs();
        assert!((rec.volume_mm3 - 3.0 * per_voxel).abs() < 1e-9);
        assert!((rec.volume_ml - rec.volume_mm3 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_spacing_stays_positive() {
        let g = grid_with(&[(0, 0, 0, 3)], Vec3::new(1.0, 1.0, -2.0));
        let rec = label_volumes(&g)[&3];
        assert!(rec.volume_mm3 > 0.0);
        assert!((rec.volume_mm3 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_never_exceeds_voxel_count() {
        let g = grid_with(&[(0, 0, 0, 1), (1, 0, 0, 2), (2, 0, 0, 3)], Vec3::ONE);
        let report = label_volumes(&g);
        assert!(total_labeled(&report) <= g.dims().len());
        // And equals the non-zero count exactly
        let nonzero = g.data().iter().filter(|&&v| v != 0).count();
        assert_eq!(total_labeled(&report), nonzero);
    }

    #[test]
    fn test_record_serializes() {
        let g = grid_with(&[(0, 0, 0, 1)], Vec3::ONE);
        let report = label_volumes(&g);
        let json = serde_json::to_string(&report).unwrap();
        let back: BTreeMap<u8, LabelVolumeRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[&1], report[&1]);
    }
}
