use crate::defs::MAX_CLIP_VERTS;
use glam::{Vec3, Vec4};
use std::mem;

/// Sutherland–Hodgman clipping of one triangle against the canonical clip
/// cube, carried out in barycentric weight space.
///
/// The working polygon is a list of weight triples over the three input
/// vertices rather than raw positions: any per-vertex attribute (UV, colour,
/// light) can later be reconstructed from the weights without repeating the
/// clip math. Fixed scratch buffers; nothing on this path allocates.
pub struct PolyClipper {
    work_a: [Vec3; MAX_CLIP_VERTS],
    work_b: [Vec3; MAX_CLIP_VERTS],
}

impl PolyClipper {
    pub fn new() -> Self {
        Self {
            work_a: [Vec3::ZERO; MAX_CLIP_VERTS],
            work_b: [Vec3::ZERO; MAX_CLIP_VERTS],
        }
    }

    /// Clip `tri` (homogeneous clip space, pre-divide) and write the surviving
    /// weight triples to `out`, returning how many. 0 means fully clipped
    /// away; a fully-inside triangle returns its three unit triples
    /// untouched. `depth_clamp` skips the two z planes. Output past
    /// `MAX_CLIP_VERTS` is truncated.
    pub fn clip_triangle(
        &mut self,
        tri: &[Vec4; 3],
        depth_clamp: bool,
        out: &mut [Vec3; MAX_CLIP_VERTS],
    ) -> usize {
        // Signed distance of each input vertex to each cube plane, packed so
        // that a working vertex's distance is its weights dotted with the
        // plane's triple. x/y first so depth clamp can drop the z pair.
        let dists = [
            Vec3::new(tri[0].w + tri[0].x, tri[1].w + tri[1].x, tri[2].w + tri[2].x),
            Vec3::new(tri[0].w - tri[0].x, tri[1].w - tri[1].x, tri[2].w - tri[2].x),
            Vec3::new(tri[0].w + tri[0].y, tri[1].w + tri[1].y, tri[2].w + tri[2].y),
            Vec3::new(tri[0].w - tri[0].y, tri[1].w - tri[1].y, tri[2].w - tri[2].y),
            Vec3::new(tri[0].w + tri[0].z, tri[1].w + tri[1].z, tri[2].w + tri[2].z),
            Vec3::new(tri[0].w - tri[0].z, tri[1].w - tri[1].z, tri[2].w - tri[2].z),
        ];
        let planes = if depth_clamp { &dists[..4] } else { &dists[..] };

        // Common case: every vertex inside every plane, no clipping at all.
        if planes.iter().all(|d| d.min_element() >= 0.0) {
            out[0] = Vec3::X;
            out[1] = Vec3::Y;
            out[2] = Vec3::Z;
            return 3;
        }

        let mut src = &mut self.work_a;
        let mut dst = &mut self.work_b;
        src[0] = Vec3::X;
        src[1] = Vec3::Y;
        src[2] = Vec3::Z;
        let mut len = 3;

        for plane in planes {
            // Weights are convex combinations, so if all three input
            // vertices are inside this plane every working vertex is too.
            if plane.min_element() >= 0.0 {
                continue;
            }

            let mut n = 0;
            for i in 0..len {
                let cur = src[i];
                let nxt = src[(i + 1) % len];
                let d0 = cur.dot(*plane);
                let d1 = nxt.dot(*plane);

                if d0 >= 0.0 {
                    if n < MAX_CLIP_VERTS {
                        dst[n] = cur;
                        n += 1;
                    }
                    if d1 < 0.0 && n < MAX_CLIP_VERTS {
                        dst[n] = cur.lerp(nxt, d0 / (d0 - d1));
                        n += 1;
                    }
                } else if d1 >= 0.0 && n < MAX_CLIP_VERTS {
                    dst[n] = cur.lerp(nxt, d0 / (d0 - d1));
                    n += 1;
                }
            }

            len = n;
            if len < 3 {
                return 0;
            }
            mem::swap(&mut src, &mut dst);
        }

        out[..len].copy_from_slice(&src[..len]);
        len
    }
}

/// Reconstruct a clip-space position from a weight triple. Works for any
/// linearly-interpolated per-vertex attribute with the same shape.
pub fn resolve(tri: &[Vec4; 3], weights: Vec3) -> Vec4 {
    tri[0] * weights.x + tri[1] * weights.y + tri[2] * weights.z
}
