//! View layer: renderer capability ports and multi-view synchronization.

pub mod ports;
pub mod hub;

pub use hub::{ModeFlags, RenderModes, ViewId, ViewSyncHub};
pub use ports::{CursorLocation, DrawableSurface, RendererCaps, VolumetricRenderer};
