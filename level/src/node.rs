use crate::map_defs::{BspNode, BACK, FRONT};
use glam::Vec3;

impl BspNode {
    /// Signed distance of `p` from the splitting plane.
    pub fn plane_distance(&self, p: Vec3) -> f32 {
        self.plane.dot(p.extend(1.0))
    }

    /// Which side of the splitting plane the point is on. A point exactly on
    /// the plane counts as front; either child order is correct there.
    pub fn point_on_side(&self, p: Vec3) -> usize {
        if self.plane_distance(p) >= 0.0 {
            return FRONT;
        }
        BACK
    }
}
