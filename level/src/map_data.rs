use crate::map_defs::{Aabb, Actor, BspNode, Surf, BACK, FRONT};
use glam::Vec3;
use log::info;
use std::error::Error;
use std::fmt;

/// Hard cap on zones per level. The traversal's reachability mask is one
/// `u64` bit per zone.
pub const MAX_ZONES: usize = 64;

/// Rejected level data. All of these are loader bugs, not runtime
/// conditions: a level that passes `Level::new` never errors during
/// traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    NoNodes,
    TooManyZones(usize),
    BadNodeIndex(u32),
    BadSurfIndex(u32),
    BadBoundIndex(u32),
    BadVertRange(u32),
    BadZone(u32),
    BadActorNode(u32),
    /// A Front/Back/Plane walk from the root revisited a node still on the
    /// walk path.
    CyclicNode(u32),
    /// A node referenced as child or coplanar link from two places.
    SharedNode(u32),
}

impl Error for LevelError {}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::NoNodes => write!(f, "level has no BSP nodes"),
            LevelError::TooManyZones(n) => {
                write!(f, "level has {n} zones, the mask caps at {MAX_ZONES}")
            }
            LevelError::BadNodeIndex(n) => write!(f, "node {n} links out of range"),
            LevelError::BadSurfIndex(n) => write!(f, "node {n} surf index out of range"),
            LevelError::BadBoundIndex(n) => write!(f, "node {n} bound index out of range"),
            LevelError::BadVertRange(n) => write!(f, "node {n} vertex range out of range"),
            LevelError::BadZone(n) => write!(f, "node {n} zone id out of range"),
            LevelError::BadActorNode(n) => write!(f, "actor {n} attached to missing node"),
            LevelError::CyclicNode(n) => write!(f, "BSP graph cycles through node {n}"),
            LevelError::SharedNode(n) => write!(f, "node {n} is referenced more than once"),
        }
    }
}

/// A loaded, validated level. Strictly read-only for the lifetime of any
/// traversal; multiple independently-owned traversals may share one.
pub struct Level {
    nodes: Vec<BspNode>,
    surfs: Vec<Surf>,
    bounds: Vec<Aabb>,
    verts: Vec<Vec3>,
    actors: Vec<Actor>,
    /// Actor indices grouped per node, parallel with `nodes`.
    node_actors: Vec<Vec<u32>>,
    zone_count: usize,
    root: u32,
}

impl Level {
    /// Validate the arena and fill every node's zone mask. Fails fast on the
    /// data-integrity problems the traversal cannot afford to detect per
    /// frame; malformed data never makes it past load.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mut nodes: Vec<BspNode>,
        surfs: Vec<Surf>,
        bounds: Vec<Aabb>,
        verts: Vec<Vec3>,
        actors: Vec<Actor>,
        zone_count: usize,
        root: u32,
    ) -> Result<Level, LevelError> {
        if nodes.is_empty() {
            return Err(LevelError::NoNodes);
        }
        if zone_count > MAX_ZONES {
            return Err(LevelError::TooManyZones(zone_count));
        }
        if root as usize >= nodes.len() {
            return Err(LevelError::BadNodeIndex(root));
        }

        for (i, node) in nodes.iter().enumerate() {
            let i = i as u32;
            for link in [node.children[FRONT], node.children[BACK], node.plane_link] {
                if let Some(link) = link {
                    if link as usize >= nodes.len() {
                        return Err(LevelError::BadNodeIndex(i));
                    }
                }
            }
            if node.surf as usize >= surfs.len() {
                return Err(LevelError::BadSurfIndex(i));
            }
            if let Some(bound) = node.bound {
                if bound as usize >= bounds.len() {
                    return Err(LevelError::BadBoundIndex(i));
                }
            }
            if node.first_vert as usize + node.vert_count as usize > verts.len() {
                return Err(LevelError::BadVertRange(i));
            }
            if node.zones[FRONT] as usize >= zone_count.max(1)
                || node.zones[BACK] as usize >= zone_count.max(1)
            {
                return Err(LevelError::BadZone(i));
            }
        }

        let mut node_actors = vec![Vec::new(); nodes.len()];
        for (i, actor) in actors.iter().enumerate() {
            if actor.node as usize >= nodes.len() {
                return Err(LevelError::BadActorNode(i as u32));
            }
            node_actors[actor.node as usize].push(i as u32);
        }

        Self::check_and_mask(&mut nodes, root)?;

        info!(
            "level: {} nodes, {} surfs, {} actors, {} zones",
            nodes.len(),
            surfs.len(),
            actors.len(),
            zone_count
        );

        Ok(Level {
            nodes,
            surfs,
            bounds,
            verts,
            actors,
            node_actors,
            zone_count,
            root,
        })
    }

    /// Depth-first walk from the root. Rejects cycles and double references,
    /// and fills each node's zone mask bottom-up with the union of its own
    /// two zone bits, its coplanar chain, and its subtrees.
    fn check_and_mask(nodes: &mut [BspNode], root: u32) -> Result<(), LevelError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unseen,
            Open,
            Done,
        }

        let mut marks = vec![Mark::Unseen; nodes.len()];
        let mut stack = vec![(root, false)];

        while let Some((idx, leaving)) = stack.pop() {
            let i = idx as usize;
            if !leaving {
                match marks[i] {
                    Mark::Open => return Err(LevelError::CyclicNode(idx)),
                    Mark::Done => return Err(LevelError::SharedNode(idx)),
                    Mark::Unseen => {}
                }
                marks[i] = Mark::Open;
                stack.push((idx, true));
                let node = &nodes[i];
                for link in [node.children[FRONT], node.children[BACK], node.plane_link] {
                    if let Some(link) = link {
                        stack.push((link, false));
                    }
                }
            } else {
                let node = &nodes[i];
                let mut mask = (1u64 << node.zones[FRONT]) | (1u64 << node.zones[BACK]);
                for link in [node.children[FRONT], node.children[BACK], node.plane_link] {
                    if let Some(link) = link {
                        mask |= nodes[link as usize].zone_mask;
                    }
                }
                nodes[i].zone_mask = mask;
                marks[i] = Mark::Done;
            }
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn surfs(&self) -> &[Surf] {
        &self.surfs
    }

    pub fn bounds(&self) -> &[Aabb] {
        &self.bounds
    }

    pub fn verts(&self) -> &[Vec3] {
        &self.verts
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn node_actors(&self, node: u32) -> &[u32] {
        &self.node_actors[node as usize]
    }

    pub fn zone_count(&self) -> usize {
        self.zone_count
    }

    pub fn root(&self) -> u32 {
        self.root
    }

    /// The polygon vertices of one node.
    pub fn node_verts(&self, node: &BspNode) -> &[Vec3] {
        let start = node.first_vert as usize;
        &self.verts[start..start + node.vert_count as usize]
    }

    /// Locate the zone containing a point by descending the tree.
    pub fn zone_at(&self, p: Vec3) -> u8 {
        let mut idx = self.root;
        loop {
            let node = &self.nodes[idx as usize];
            let side = node.point_on_side(p);
            match node.children[side] {
                Some(child) => idx = child,
                None => return node.zones[side],
            }
        }
    }
}
