use glam::{Vec3, Vec4};

/// Colour-keyed surface; holes punched by the texture key colour.
pub const SURF_MASKED: u32 = 1 << 0;
/// Alpha-blended surface.
pub const SURF_TRANSLUCENT: u32 = 1 << 1;
/// Multiply-blended surface.
pub const SURF_MODULATED: u32 = 1 << 2;
/// Never handed to the drawing renderer. Portals are often invisible.
pub const SURF_INVISIBLE: u32 = 1 << 3;
/// Boundary between two zones; seeing it admits the far zone.
pub const SURF_PORTAL: u32 = 1 << 4;
/// Processed from either side of its plane.
pub const SURF_TWO_SIDED: u32 = 1 << 5;

/// Child/zone index for the half-space the plane normal points into.
pub const FRONT: usize = 0;
/// Child/zone index for the other half-space.
pub const BACK: usize = 1;

/// Axis-aligned bounding box in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// All 8 corners, for per-plane frustum tests and screen projection.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }

    /// Expand to contain `p`.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }
}

/// A drawable surface record. The material index is opaque to the visibility
/// engine; the drawing renderer resolves it.
#[derive(Debug, Clone)]
pub struct Surf {
    pub flags: u32,
    pub material: usize,
}

impl Surf {
    pub fn new(flags: u32, material: usize) -> Self {
        Self { flags, material }
    }

    /// Solid enough to hide what sits behind it.
    pub fn is_occluder(&self) -> bool {
        self.flags
            & (SURF_MASKED | SURF_TRANSLUCENT | SURF_MODULATED | SURF_INVISIBLE | SURF_PORTAL)
            == 0
    }

    /// Belongs in the back-to-front pass rather than the opaque pass.
    pub fn is_translucent_pass(&self) -> bool {
        self.flags & (SURF_MASKED | SURF_TRANSLUCENT | SURF_MODULATED) != 0
    }
}

/// One node of the static BSP tree.
///
/// Children and the coplanar chain are arena indices; the original data
/// format uses -1 sentinels which load as `None` here. The node's polygon is
/// `vert_count` entries of the level vertex pool starting at `first_vert`.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    /// Splitting plane. `plane.dot(p.extend(1.0)) >= 0.0` is the front side.
    pub plane: Vec4,
    /// `[front, back]` subtree indices.
    pub children: [Option<u32>; 2],
    /// Next node coplanar with this one.
    pub plane_link: Option<u32>,
    /// Index into the level surface table.
    pub surf: u32,
    /// Zone id on the `[front, back]` side of the plane.
    pub zones: [u8; 2],
    /// One bit per zone that can see this node's subtree. Filled during
    /// `Level::new`.
    pub zone_mask: u64,
    /// Index into the render-bound table, if the subtree carries one.
    pub bound: Option<u32>,
    pub first_vert: u32,
    pub vert_count: u32,
}

impl BspNode {
    pub fn new(plane: Vec4, surf: u32, first_vert: u32, vert_count: u32) -> Self {
        Self {
            plane,
            children: [None, None],
            plane_link: None,
            surf,
            zones: [0, 0],
            zone_mask: 0,
            bound: None,
            first_vert,
            vert_count,
        }
    }
}

/// A dynamic object attached to a BSP node, tested at bounding-box
/// granularity only.
#[derive(Debug, Clone)]
pub struct Actor {
    pub bound: Aabb,
    /// The node the actor is currently linked to.
    pub node: u32,
}
