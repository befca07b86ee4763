//! Per-scan viewer session.
//!
//! One explicit context object per loaded scan, constructed after the load
//! completes and discarded wholesale on reload. It owns the grid pair and
//! every stateful component, replacing hidden module-level globals and
//! keeping the ordering obligations in one place: grids exist before the
//! registry, the registry before controls bind, the draw mask is zeroed
//! before any stroke.

use std::collections::BTreeMap;

use log::{info, warn};

use crate::camera::bridge::CameraBridge;
use crate::camera::fit::{fit_camera, CameraPlacement};
use crate::core::config::ViewerConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::editor::brush::{BrushMaskEditor, CommitReceipt};
use crate::editor::undo::UndoStack;
use crate::loader::VolumePairSource;
use crate::scene::mesh::MeshInstance;
use crate::scene::registry::MeshRegistry;
use crate::view::hub::ViewSyncHub;
use crate::view::ports::{CursorLocation, DrawableSurface, VolumetricRenderer};
use crate::volume::grid::{LabelGrid, ScanGrid};
use crate::volume::stats::{label_volumes, LabelVolumeRecord};

/// Everything alive for one loaded scan.
pub struct Session {
    scan: ScanGrid,
    labels: LabelGrid,
    pub registry: MeshRegistry,
    pub editor: BrushMaskEditor,
    pub undo: UndoStack,
    pub hub: ViewSyncHub,
    pub bridge: CameraBridge,
    config: ViewerConfig,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("dims", &self.scan.dims())
            .field("spacing", &self.scan.spacing())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build a session from an already-decoded grid pair.
    ///
    /// The scan and segmentation must share dimensions and spacing.
    pub fn new(scan: ScanGrid, labels: LabelGrid, config: ViewerConfig) -> Result<Self> {
        if !scan.same_topology(&labels) {
            return Err(Error::GridMismatch(format!(
                "scan {:?} @ {:?} vs segmentation {:?} @ {:?}",
                scan.dims(),
                scan.spacing(),
                labels.dims(),
                labels.spacing()
            )));
        }
        info!(
            "session created: {:?} voxels @ {:?} mm",
            scan.dims(),
            scan.spacing()
        );
        Ok(Self {
            scan,
            labels,
            registry: MeshRegistry::default(),
            editor: BrushMaskEditor::new(config.brush),
            undo: UndoStack::new(),
            hub: ViewSyncHub::new(),
            bridge: CameraBridge::new(config.bridge),
            config,
        })
    }

    /// Fetch a grid pair from the loader boundary and build a session.
    ///
    /// On failure nothing is constructed, so a previously loaded session
    /// held by the caller stays intact.
    pub fn load(source: &mut dyn VolumePairSource, config: ViewerConfig) -> Result<Self> {
        let (scan, labels) = source.fetch()?;
        Self::new(scan, labels, config)
    }

    pub fn scan(&self) -> &ScanGrid {
        &self.scan
    }

    pub fn labels(&self) -> &LabelGrid {
        &self.labels
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Index extracted meshes by label. Replaces any prior registry and
    /// drops selection state with it.
    pub fn attach_meshes(&mut self, meshes: impl IntoIterator<Item = MeshInstance>) {
        self.registry = MeshRegistry::build(meshes);
        self.undo.set_scope(None);
    }

    /// Recompute per-label physical volumes from the current segmentation.
    pub fn label_volumes(&self) -> BTreeMap<u8, LabelVolumeRecord> {
        label_volumes(&self.labels)
    }

    /// Select a mesh: updates the registry highlight and re-scopes the
    /// undo history to the new target.
    pub fn select_mesh(&mut self, label: u8) -> Option<u8> {
        let selected = self.registry.select(label)?;
        self.undo.set_scope(Some(selected));
        Some(selected)
    }

    /// Toggle painting mode on or off.
    pub fn set_paint_mode(&mut self, on: bool, surface: &mut dyn DrawableSurface) {
        if on {
            self.editor.arm(self.scan.dims(), surface);
        } else {
            self.editor.disarm(surface);
        }
    }

    pub fn pointer_down(&mut self) {
        self.editor.pointer_down();
    }

    pub fn pointer_leave(&mut self) {
        self.editor.pointer_leave();
    }

    /// Cursor moved while painting; forwarded to the brush.
    pub fn on_location_change(&mut self, loc: &CursorLocation, surface: &mut dyn DrawableSurface) {
        self.editor.on_location_change(loc, surface);
    }

    /// Pointer released: commit the stroke and recompute volumes.
    ///
    /// The renderer's volume data is refreshed inside the commit; the
    /// returned report is the downstream recompute notification for the
    /// volume table and any linked views that must re-render.
    pub fn pointer_up(
        &mut self,
        renderer: &mut dyn VolumetricRenderer,
    ) -> Option<(CommitReceipt, BTreeMap<u8, LabelVolumeRecord>)> {
        let receipt = self
            .editor
            .pointer_up(&mut self.labels, renderer, &mut self.undo)?;
        Some((receipt, label_volumes(&self.labels)))
    }

    /// Roll back the latest committed stroke, if any.
    pub fn undo_last_commit(&mut self, renderer: &mut dyn VolumetricRenderer) -> bool {
        if !self.undo.undo(&mut self.labels) {
            warn!("undo requested with empty history");
            return false;
        }
        renderer.refresh_volume();
        renderer.redraw();
        true
    }

    /// Initial mesh-camera placement framing the attached meshes.
    /// `fov_y` is the mesh camera's vertical field of view in radians.
    pub fn fit_mesh_camera(&self, fov_y: f32) -> Option<CameraPlacement> {
        fit_camera(self.registry.bounds(), fov_y, self.config.fit.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::state::VolumetricCamera;
    use crate::core::types::Vec3;
    use crate::math::Aabb;
    use crate::scene::mesh::Material;
    use crate::view::ports::{DragMode, RendererCaps};
    use crate::volume::grid::GridDims;
    use crate::volume::mask::DrawMask;

    #[derive(Default)]
    struct FakeRenderer {
        volume_refreshes: u32,
        redraws: u32,
    }

    impl DrawableSurface for FakeRenderer {
        fn caps(&self) -> RendererCaps {
            RendererCaps::default()
        }
        fn set_drawing_enabled(&mut self, _enabled: bool) {}
        fn set_drag_mode(&mut self, _mode: DragMode) {}
        fn set_radiological_convention(&mut self, _enabled: bool) {}
        fn set_draw_opacity(&mut self, _opacity: f32) {}
        fn refresh_drawing(&mut self, _mask: &DrawMask) {}
    }

    impl VolumetricRenderer for FakeRenderer {
        fn set_camera(&mut self, _camera: &VolumetricCamera) {}
        fn camera_ready(&self) -> bool {
            true
        }
        fn redraw(&mut self) {
            self.redraws += 1;
        }
        fn refresh_volume(&mut self) {
            self.volume_refreshes += 1;
        }
    }

    fn session(n: usize) -> Session {
        let dims = GridDims::new(n, n, n);
        let scan = ScanGrid::new(dims, Vec3::ONE).unwrap();
        let labels = LabelGrid::new(dims, Vec3::ONE).unwrap();
        Session::new(scan, labels, ViewerConfig::default()).unwrap()
    }

    fn mesh(label: u8) -> MeshInstance {
        MeshInstance::new(
            label,
            Some(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))),
            Material::opaque([0.5, 0.5, 0.5]),
        )
    }

    #[test]
    fn test_topology_mismatch_rejected() {
        let scan = ScanGrid::new(GridDims::new(4, 4, 4), Vec3::ONE).unwrap();
        let labels = LabelGrid::new(GridDims::new(4, 4, 5), Vec3::ONE).unwrap();
        let err = Session::new(scan, labels, ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, Error::GridMismatch(_)));
    }

    #[test]
    fn test_paint_commit_updates_volumes() {
        let mut session = session(16);
        let mut renderer = FakeRenderer::default();

        session.set_paint_mode(true, &mut renderer);
        session.pointer_down();
        session.on_location_change(
            &CursorLocation {
                vox: Vec3::splat(8.0),
                mm: Vec3::splat(8.0),
            },
            &mut renderer,
        );
        let (receipt, report) = session.pointer_up(&mut renderer).unwrap();

        assert!(receipt.changed_voxels > 0);
        assert_eq!(renderer.volume_refreshes, 1);
        let paint_label = session.config().brush.paint_label;
        assert_eq!(report[&paint_label].voxel_count, receipt.changed_voxels);
        // mL identity holds on the derived report
        let rec = report[&paint_label];
        assert!((rec.volume_ml - rec.volume_mm3 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn test_undo_rolls_back_commit() {
        let mut session = session(16);
        let mut renderer = FakeRenderer::default();

        session.set_paint_mode(true, &mut renderer);
        session.pointer_down();
        session.on_location_change(
            &CursorLocation {
                vox: Vec3::splat(8.0),
                mm: Vec3::splat(8.0),
            },
            &mut renderer,
        );
        session.pointer_up(&mut renderer).unwrap();
        assert!(!session.label_volumes().is_empty());

        assert!(session.undo_last_commit(&mut renderer));
        assert!(session.label_volumes().is_empty());
        assert_eq!(renderer.volume_refreshes, 2);
        assert!(renderer.redraws >= 1);

        assert!(!session.undo_last_commit(&mut renderer));
    }

    #[test]
    fn test_selection_rescopes_undo() {
        let mut session = session(8);
        session.attach_meshes([mesh(1), mesh(2)]);

        assert_eq!(session.select_mesh(1), Some(1));
        assert_eq!(session.undo.scope(), Some(1));
        assert_eq!(session.registry.highlight().unwrap().label, 1);

        assert_eq!(session.select_mesh(2), Some(2));
        assert_eq!(session.undo.scope(), Some(2));
        assert_eq!(session.registry.highlight().unwrap().label, 2);
    }

    #[test]
    fn test_failed_load_leaves_existing_session_alone() {
        struct FailingSource;
        impl VolumePairSource for FailingSource {
            fn fetch(&mut self) -> crate::core::types::Result<(ScanGrid, LabelGrid)> {
                Err(Error::Load("upload failed".into()))
            }
        }

        let mut current = session(8);
        current.labels_mut_for_test().set(1, 1, 1, 4);

        let attempt = Session::load(&mut FailingSource, ViewerConfig::default());
        assert!(attempt.is_err());
        // The held session is untouched by the failed attempt.
        assert_eq!(current.labels().get(1, 1, 1), 4);
    }

    #[test]
    fn test_fit_camera_over_attached_meshes() {
        let mut session = session(8);
        assert!(session.fit_mesh_camera(1.0).is_none());

        session.attach_meshes([mesh(1)]);
        let placement = session.fit_mesh_camera(1.0).unwrap();
        assert_eq!(placement.target, Vec3::ZERO);
    }

    impl Session {
        fn labels_mut_for_test(&mut self) -> &mut LabelGrid {
            &mut self.labels
        }
    }
}
