use glam::{Mat4, Vec4};
use level::Aabb;

/// Bits reported in `BoxClass::Crossing`, one per frustum plane.
pub const PLANE_LEFT: u8 = 1 << 0;
pub const PLANE_RIGHT: u8 = 1 << 1;
pub const PLANE_BOTTOM: u8 = 1 << 2;
pub const PLANE_TOP: u8 = 1 << 3;
pub const PLANE_NEAR: u8 = 1 << 4;
pub const PLANE_FAR: u8 = 1 << 5;

/// How an AABB sits relative to the view frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxClass {
    /// Fully excluded by at least one plane.
    Outside,
    Inside,
    /// Straddles the flagged planes.
    Crossing(u8),
}

/// The six view-frustum planes of one camera setup.
///
/// `plane.dot(p.extend(1.0)) >= 0.0` is the inside half-space. Recomputed
/// from scratch whenever the view matrix changes; holds no other state.
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    pub fn new() -> Self {
        Self {
            planes: [Vec4::ZERO; 6],
        }
    }

    /// Derive the planes from a projection·view matrix by row combination.
    pub fn setup(&mut self, m: &Mat4) {
        let r0 = m.row(0);
        let r1 = m.row(1);
        let r2 = m.row(2);
        let r3 = m.row(3);

        self.planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2];

        for plane in &mut self.planes {
            let len = plane.truncate().length();
            if len > f32::EPSILON {
                *plane /= len;
            }
        }
    }

    /// Test all 8 corners against every plane. Any single plane excluding
    /// the whole box is an early out.
    pub fn classify_box(&self, bound: &Aabb) -> BoxClass {
        let corners = bound.corners();
        let mut crossed = 0u8;

        for (i, plane) in self.planes.iter().enumerate() {
            let mut outside = 0;
            for corner in &corners {
                if plane.dot(corner.extend(1.0)) < 0.0 {
                    outside += 1;
                }
            }
            if outside == corners.len() {
                return BoxClass::Outside;
            }
            if outside != 0 {
                crossed |= 1 << i;
            }
        }

        if crossed == 0 {
            BoxClass::Inside
        } else {
            BoxClass::Crossing(crossed)
        }
    }
}
