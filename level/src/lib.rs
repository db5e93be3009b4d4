//! Read-only level data for the visibility engine.
//!
//! A loaded level is an index-addressed arena of BSP nodes plus the surface,
//! render-bound, vertex, and actor tables they reference. Everything here is
//! immutable once `Level::new` has validated it; per-frame state (span
//! buffers, zone masks, actor draw stamps) lives with the traversal that
//! owns it.

mod map_data;
mod map_defs;
mod node;

pub use map_data::{Level, LevelError, MAX_ZONES};
pub use map_defs::{
    Aabb, Actor, BspNode, Surf, BACK, FRONT, SURF_INVISIBLE, SURF_MASKED, SURF_MODULATED,
    SURF_PORTAL, SURF_TRANSLUCENT, SURF_TWO_SIDED,
};

pub use glam;
pub use log;
