use crate::clip::{self, PolyClipper};
use crate::defs::{VisCounters, MAX_CLIP_VERTS};
use crate::frustum::{
    BoxClass, Frustum, PLANE_BOTTOM, PLANE_LEFT, PLANE_NEAR, PLANE_RIGHT, PLANE_TOP,
};
use crate::scan::scan_triangle;
use crate::span::SpanBuffer;
use crate::utilities::clip_to_screen;
#[cfg(feature = "hprof")]
use coarse_prof::profile;
use glam::{Mat4, Vec2, Vec3};
use level::log::trace;
use level::{Aabb, BspNode, Level, BACK, SURF_INVISIBLE, SURF_PORTAL, SURF_TWO_SIDED};

/// Camera state for one rendered view.
pub struct Camera {
    pub position: Vec3,
    /// Combined projection·view matrix.
    pub view_proj: Mat4,
    /// Viewport in pixels.
    pub width: usize,
    pub height: usize,
    /// Skip the z planes while clipping (depth-clamp rendering).
    pub depth_clamp: bool,
}

impl Camera {
    /// Perspective camera at `position` looking along `forward`, z-up.
    pub fn new(position: Vec3, forward: Vec3, fov: f32, width: usize, height: usize) -> Self {
        let aspect = width as f32 / height as f32;
        let projection = Mat4::perspective_rh_gl(fov, aspect, 1.0, 32768.0);
        let view = Mat4::look_at_rh(position, position + forward, Vec3::Z);
        Self {
            position,
            view_proj: projection * view,
            width,
            height,
            depth_clamp: false,
        }
    }
}

/// One front-to-back walk of a level's BSP tree for one view.
///
/// Owns every piece of per-frame state: the frustum, the clipper scratch,
/// the span buffer, the zone-reachability mask, the actor draw stamps, and
/// the output lists. A single instance must not be shared between
/// concurrently-running views; running the optional sky-portal pre-pass then
/// the main view sequentially on one instance is fine, since `run` resets
/// everything but the actor stamps, and those are frame-keyed.
pub struct VisTraversal {
    frustum: Frustum,
    clipper: PolyClipper,
    spans: SpanBuffer,
    /// One bit per zone reachable so far this run. Grows monotonically as
    /// portal surfaces are found visible; never cleared mid-run.
    zone_mask: u64,
    frame: u32,
    /// Frame stamp per actor: already emitted this run.
    last_draw_frame: Vec<u32>,
    /// Visible opaque surfaces in front-to-back discovery order.
    opaque: Vec<u32>,
    /// Visible masked/translucent/modulated surfaces; the caller sorts and
    /// draws these back-to-front.
    translucent: Vec<u32>,
    /// Potentially visible actors, bounding-box granularity.
    actors: Vec<u32>,
    counters: VisCounters,
    width: usize,
    height: usize,
}

impl VisTraversal {
    pub fn new() -> Self {
        Self {
            frustum: Frustum::new(),
            clipper: PolyClipper::new(),
            spans: SpanBuffer::new(),
            zone_mask: 0,
            frame: 0,
            last_draw_frame: Vec::new(),
            opaque: Vec::new(),
            translucent: Vec::new(),
            actors: Vec::new(),
            counters: VisCounters::default(),
            width: 0,
            height: 0,
        }
    }

    /// Determine visibility for one view. Synchronous and run to
    /// completion; all outputs are valid until the next `run`.
    pub fn run(&mut self, level: &Level, camera: &Camera) {
        #[cfg(feature = "hprof")]
        profile!("vis_run");

        self.frame = self.frame.wrapping_add(1);
        if self.frame == 0 {
            // Stamp wrap: old stamps could collide with a reused frame id.
            self.last_draw_frame.fill(0);
            self.frame = 1;
        }
        self.last_draw_frame.resize(level.actors().len(), 0);

        self.width = camera.width;
        self.height = camera.height;
        self.frustum.setup(&camera.view_proj);
        self.spans.setup(camera.width, camera.height);
        self.opaque.clear();
        self.translucent.clear();
        self.actors.clear();
        self.counters.clear();
        self.zone_mask = 1u64 << level.zone_at(camera.position);

        self.walk_node(level, camera, level.root());

        trace!(
            "vis: {} nodes, {} surfs, {} tris checked; {} spans drawn, {} opaque, {} translucent, {} actors",
            self.counters.nodes_visited,
            self.counters.surfs_checked,
            self.counters.tris_checked,
            self.counters.spans_drawn,
            self.opaque.len(),
            self.translucent.len(),
            self.actors.len()
        );
    }

    /// Visible opaque surface indices, front to back.
    pub fn opaque(&self) -> &[u32] {
        &self.opaque
    }

    /// Visible translucent-pass surface indices.
    pub fn translucent(&self) -> &[u32] {
        &self.translucent
    }

    /// Potentially visible actor indices.
    pub fn visible_actors(&self) -> &[u32] {
        &self.actors
    }

    pub fn counters(&self) -> &VisCounters {
        &self.counters
    }

    /// The zone-reachability mask as of the last `run`.
    pub fn zone_mask(&self) -> u64 {
        self.zone_mask
    }

    fn walk_node(&mut self, level: &Level, camera: &Camera, node_idx: u32) {
        self.counters.nodes_visited += 1;
        let node = &level.nodes()[node_idx as usize];

        // Nothing under this node is reachable from any zone seen so far.
        if node.zone_mask & self.zone_mask == 0 {
            return;
        }

        if let Some(bound) = node.bound {
            let bound = &level.bounds()[bound as usize];
            match self.frustum.classify_box(bound) {
                BoxClass::Outside => return,
                // A box crossing the near plane is assumed visible; its 2D
                // projection is unreliable there.
                BoxClass::Crossing(bits) if bits & PLANE_NEAR != 0 => {}
                BoxClass::Inside => {
                    if !self.bound_visible(camera, bound, 0) {
                        return;
                    }
                }
                BoxClass::Crossing(bits) => {
                    if !self.bound_visible(camera, bound, bits) {
                        return;
                    }
                }
            }
        }

        for &actor_idx in level.node_actors(node_idx) {
            if self.last_draw_frame[actor_idx as usize] == self.frame {
                continue;
            }
            self.last_draw_frame[actor_idx as usize] = self.frame;
            let actor = &level.actors()[actor_idx as usize];
            if self.frustum.classify_box(&actor.bound) != BoxClass::Outside {
                self.actors.push(actor_idx);
            }
        }

        let side = node.point_on_side(camera.position);

        // Camera-side subtree first so occlusion accumulates front to back.
        if let Some(front) = node.children[side] {
            self.walk_node(level, camera, front);
        }

        let mut link = Some(node_idx);
        while let Some(idx) = link {
            let coplanar = &level.nodes()[idx as usize];
            self.draw_surface(level, camera, coplanar, side);
            link = coplanar.plane_link;
        }

        if let Some(back) = node.children[side ^ 1] {
            self.walk_node(level, camera, back);
        }
    }

    /// Project a render bound's corners, build the 2D box (pushed out to the
    /// viewport edge on every crossed side), and probe the span buffer row
    /// by row until something shows through.
    fn bound_visible(&mut self, camera: &Camera, bound: &Aabb, crossed: u8) -> bool {
        #[cfg(feature = "hprof")]
        profile!("bound_visible");
        let w = self.width as f32;
        let h = self.height as f32;
        let mut min = Vec2::MAX;
        let mut max = Vec2::MIN;

        for corner in bound.corners() {
            let clip = camera.view_proj * corner.extend(1.0);
            if clip.w <= f32::EPSILON {
                // Only reachable on degenerate bounds; the near-plane check
                // already routed anything straddling the camera past here.
                return true;
            }
            let p = clip_to_screen(clip, w, h);
            min = min.min(p);
            max = max.max(p);
        }

        // Screen y grows downward: the top plane bounds min.y, the bottom
        // plane max.y.
        if crossed & PLANE_LEFT != 0 {
            min.x = 0.0;
        }
        if crossed & PLANE_RIGHT != 0 {
            max.x = w;
        }
        if crossed & PLANE_TOP != 0 {
            min.y = 0.0;
        }
        if crossed & PLANE_BOTTOM != 0 {
            max.y = h;
        }

        let x0 = min.x.floor().clamp(0.0, w) as i16;
        let x1 = max.x.ceil().clamp(0.0, w) as i16;
        if x1 <= x0 {
            return false;
        }
        let y0 = min.y.floor().clamp(0.0, h) as usize;
        let y1 = max.y.ceil().clamp(0.0, h) as usize;

        for row in y0..y1 {
            if self.spans.is_visible(row, x0, x1) {
                return true;
            }
        }
        false
    }

    /// Clip and scan one coplanar surface. Occluders draw into the span
    /// buffer, everything else only probes it. Any visible part appends the
    /// surface to an output list; a visible portal admits its far zone.
    fn draw_surface(&mut self, level: &Level, camera: &Camera, node: &BspNode, side: usize) {
        #[cfg(feature = "hprof")]
        profile!("draw_surface");
        self.counters.surfs_checked += 1;
        let surf = &level.surfs()[node.surf as usize];

        // Facing away; a one-sided surface neither draws nor occludes.
        if side == BACK && surf.flags & SURF_TWO_SIDED == 0 {
            return;
        }

        let verts = level.node_verts(node);
        if verts.len() < 3 {
            return;
        }

        let occluder = surf.is_occluder();
        let w = self.width as f32;
        let h = self.height as f32;
        let mut weights = [Vec3::ZERO; MAX_CLIP_VERTS];
        let mut screen = [Vec2::ZERO; MAX_CLIP_VERTS];
        let mut any_visible = false;

        let c0 = camera.view_proj * verts[0].extend(1.0);
        for i in 1..verts.len() - 1 {
            self.counters.tris_checked += 1;
            let tri = [
                c0,
                camera.view_proj * verts[i].extend(1.0),
                camera.view_proj * verts[i + 1].extend(1.0),
            ];

            let count = self
                .clipper
                .clip_triangle(&tri, camera.depth_clamp, &mut weights);
            if count < 3 {
                continue;
            }

            let mut degenerate = false;
            for (j, weight) in weights[..count].iter().enumerate() {
                let clip = clip::resolve(&tri, *weight);
                if clip.w <= f32::EPSILON {
                    degenerate = true;
                    break;
                }
                screen[j] = clip_to_screen(clip, w, h);
            }
            if degenerate {
                continue;
            }

            let spans = &mut self.spans;
            let counters = &mut self.counters;
            for k in 1..count - 1 {
                any_visible |= scan_triangle(
                    [screen[0], screen[k], screen[k + 1]],
                    self.width as i32,
                    self.height as i32,
                    |row, x0, x1| {
                        if occluder {
                            let vis = spans.draw_span(row, x0, x1);
                            if vis {
                                counters.spans_drawn += 1;
                            }
                            vis
                        } else {
                            spans.is_visible(row, x0, x1)
                        }
                    },
                );
            }
        }

        if !any_visible {
            return;
        }

        if surf.flags & SURF_PORTAL != 0 {
            // Admit the far zone for the rest of this run.
            self.zone_mask |= 1u64 << node.zones[side ^ 1];
        }
        if surf.flags & SURF_INVISIBLE != 0 {
            return;
        }
        if surf.is_translucent_pass() {
            self.translucent.push(node.surf);
        } else {
            self.opaque.push(node.surf);
        }
    }
}
