//! Software visibility determination for BSP levels.
//!
//! Walks a level's BSP tree front to back from the camera, clips candidate
//! polygons against the view frustum in homogeneous clip space,
//! scan-converts them into horizontal spans, and tracks per-scanline
//! occlusion so that only potentially-visible surfaces and actors are handed
//! on to a drawing renderer. Nothing here touches a pixel.
#![allow(clippy::new_without_default)]

mod bsp;
mod clip;
mod defs;
mod frustum;
mod scan;
mod span;
#[cfg(test)]
mod tests;
mod utilities;

pub use bsp::{Camera, VisTraversal};
pub use clip::{resolve, PolyClipper};
pub use defs::{ClipSpan, VisCounters, CLIP_HEIGHT, CLIP_WIDTH, MAX_CLIP_VERTS};
pub use frustum::{
    BoxClass, Frustum, PLANE_BOTTOM, PLANE_FAR, PLANE_LEFT, PLANE_NEAR, PLANE_RIGHT, PLANE_TOP,
};
pub use scan::scan_triangle;
pub use span::SpanBuffer;
