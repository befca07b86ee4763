//! Linked-view synchronization.
//!
//! Volumetric view instances register with the hub; directed links declare
//! which state a view broadcasts to each peer. Two signals propagate:
//! cursor location (keeps peer crosshairs aligned) and 2D/3D render-mode
//! toggles, the latter gated per link by [`ModeFlags`]. Propagation writes
//! peer state directly and never follows the peers' own links, so a
//! back-link can never feed a broadcast back into its origin.

use std::collections::HashMap;

use log::warn;

use crate::view::ports::CursorLocation;

/// Handle for a registered volumetric view instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewId(u32);

/// Which state categories a link propagates: slice ("2d") and volume
/// render ("3d").
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub plane: bool,
    pub volume: bool,
}

impl ModeFlags {
    pub const ALL: ModeFlags = ModeFlags {
        plane: true,
        volume: true,
    };
}

/// Per-view render-mode visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderModes {
    pub plane_visible: bool,
    pub volume_visible: bool,
}

#[derive(Default)]
struct ViewState {
    cursor: Option<CursorLocation>,
    modes: RenderModes,
}

type LocationHook = Box<dyn FnMut(&CursorLocation)>;

/// Fan-out hub for linked volumetric views.
#[derive(Default)]
pub struct ViewSyncHub {
    states: HashMap<ViewId, ViewState>,
    links: HashMap<ViewId, Vec<(ViewId, ModeFlags)>>,
    hooks: HashMap<ViewId, LocationHook>,
    next_id: u32,
}

impl ViewSyncHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view instance and get its handle.
    pub fn register(&mut self) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.states.insert(id, ViewState::default());
        id
    }

    /// Remove a view and every link pointing at it.
    pub fn unregister(&mut self, id: ViewId) {
        self.states.remove(&id);
        self.links.remove(&id);
        self.hooks.remove(&id);
        for targets in self.links.values_mut() {
            targets.retain(|(t, _)| *t != id);
        }
    }

    /// Declare that `origin` broadcasts to `target` with the given flags.
    ///
    /// Links are directed; the reverse direction is a separate declaration
    /// with its own flags. Relinking an existing pair updates its flags.
    pub fn broadcast_to(&mut self, origin: ViewId, target: ViewId, flags: ModeFlags) {
        if origin == target {
            warn!("view cannot broadcast to itself; link ignored");
            return;
        }
        if !self.states.contains_key(&origin) || !self.states.contains_key(&target) {
            warn!("broadcast link references an unregistered view; ignored");
            return;
        }
        let targets = self.links.entry(origin).or_default();
        if let Some(entry) = targets.iter_mut().find(|(t, _)| *t == target) {
            entry.1 = flags;
        } else {
            targets.push((target, flags));
        }
    }

    /// Install a location-change hook on a view. The hook fires once for
    /// the view's own report and whenever a peer broadcast moves this
    /// view's cursor; propagation never fires it a second time.
    pub fn set_location_hook(&mut self, id: ViewId, hook: LocationHook) {
        self.hooks.insert(id, hook);
    }

    /// A view reports a cursor move from its own interaction.
    ///
    /// Updates the origin's state and fires its own hook exactly once, then
    /// pushes the location to every linked peer and fires the peers' hooks.
    /// Peers' outbound links are not followed, so a back-link can never
    /// re-invoke the origin's hook.
    pub fn report_location(&mut self, origin: ViewId, loc: CursorLocation) {
        let Some(state) = self.states.get_mut(&origin) else {
            warn!("location report from unregistered view; ignored");
            return;
        };
        state.cursor = Some(loc);

        if let Some(hook) = self.hooks.get_mut(&origin) {
            hook(&loc);
        }

        let targets: Vec<ViewId> = self
            .links
            .get(&origin)
            .map(|ts| ts.iter().map(|(t, _)| *t).collect())
            .unwrap_or_default();

        for target in targets {
            if let Some(peer) = self.states.get_mut(&target) {
                peer.cursor = Some(loc);
            }
            if let Some(hook) = self.hooks.get_mut(&target) {
                hook(&loc);
            }
        }
    }

    /// A view reports a 2D/3D render-mode change from its own interaction.
    ///
    /// Each linked peer receives only the components its link flags allow.
    pub fn report_modes(&mut self, origin: ViewId, modes: RenderModes) {
        let Some(state) = self.states.get_mut(&origin) else {
            warn!("mode report from unregistered view; ignored");
            return;
        };
        state.modes = modes;

        let targets: Vec<(ViewId, ModeFlags)> = self
            .links
            .get(&origin)
            .cloned()
            .unwrap_or_default();

        for (target, flags) in targets {
            if let Some(peer) = self.states.get_mut(&target) {
                if flags.plane {
                    peer.modes.plane_visible = modes.plane_visible;
                }
                if flags.volume {
                    peer.modes.volume_visible = modes.volume_visible;
                }
            }
        }
    }

    pub fn cursor(&self, id: ViewId) -> Option<CursorLocation> {
        self.states.get(&id).and_then(|s| s.cursor)
    }

    pub fn modes(&self, id: ViewId) -> Option<RenderModes> {
        self.states.get(&id).map(|s| s.modes)
    }

    /// Number of views this view broadcasts to.
    pub fn link_count(&self, id: ViewId) -> usize {
        self.links.get(&id).map_or(0, |t| t.len())
    }
}
