//! Whole-traversal tests on a small two-room portal level.
//!
//! The level: the camera sits in room A (zone 0) looking +X at a dividing
//! plane at x = 50. The plane carries an opaque wall over the left side of
//! the screen and an invisible portal doorway over the right, leading to
//! room B (zone 1). Room B holds a screen-filling far wall at x = 100 and a
//! small quad at x = 75 that sits entirely behind the opaque wall in screen
//! space. World axes: +X is the view direction, +Y is screen-left, +Z is up.

use crate::{Camera, VisTraversal};
use glam::{Vec3, Vec4};
use level::{
    Aabb, Actor, BspNode, Level, Surf, BACK, FRONT, SURF_INVISIBLE, SURF_PORTAL, SURF_TWO_SIDED,
};
use std::f32::consts::FRAC_PI_2;

const SURF_WALL: u32 = 0;
const SURF_DOOR: u32 = 1;
const SURF_FAR_WALL: u32 = 2;
const SURF_HIDDEN: u32 = 3;

fn quad(verts: &mut Vec<Vec3>, corners: [[f32; 3]; 4]) -> (u32, u32) {
    let first = verts.len() as u32;
    for c in corners {
        verts.push(Vec3::from_array(c));
    }
    (first, 4)
}

fn two_room_level() -> Level {
    let mut verts = Vec::new();
    // At depth 50 with a 90 degree square frustum (aspect 1.6, 320x200) the
    // view spans y in [-80, 80] and z in [-50, 50]; the wall and doorway sit
    // just inside so they clip on the fast path and scan to exact rectangles.
    let (wall_v, wall_n) = quad(
        &mut verts,
        [
            [50.0, 0.0, -45.0],
            [50.0, 76.0, -45.0],
            [50.0, 76.0, 45.0],
            [50.0, 0.0, 45.0],
        ],
    );
    let (door_v, door_n) = quad(
        &mut verts,
        [
            [50.0, -76.0, -45.0],
            [50.0, 0.0, -45.0],
            [50.0, 0.0, 45.0],
            [50.0, -76.0, 45.0],
        ],
    );
    let (far_v, far_n) = quad(
        &mut verts,
        [
            [100.0, -200.0, -120.0],
            [100.0, 200.0, -120.0],
            [100.0, 200.0, 120.0],
            [100.0, -200.0, 120.0],
        ],
    );
    let (hidden_v, hidden_n) = quad(
        &mut verts,
        [
            [75.0, 20.0, -20.0],
            [75.0, 60.0, -20.0],
            [75.0, 60.0, 20.0],
            [75.0, 20.0, 20.0],
        ],
    );

    let split = Vec4::new(-1.0, 0.0, 0.0, 50.0);

    // Node 0: the dividing plane, wall surface, doorway chained coplanar.
    let mut n0 = BspNode::new(split, SURF_WALL, wall_v, wall_n);
    n0.zones = [0, 1];
    n0.plane_link = Some(1);
    n0.children[BACK] = Some(2);

    let mut n1 = BspNode::new(split, SURF_DOOR, door_v, door_n);
    n1.zones = [0, 1];

    // Node 2: room B far wall; its front subtree holds the hidden quad.
    let mut n2 = BspNode::new(
        Vec4::new(-1.0, 0.0, 0.0, 100.0),
        SURF_FAR_WALL,
        far_v,
        far_n,
    );
    n2.zones = [1, 1];
    n2.children[FRONT] = Some(3);

    let mut n3 = BspNode::new(
        Vec4::new(-1.0, 0.0, 0.0, 75.0),
        SURF_HIDDEN,
        hidden_v,
        hidden_n,
    );
    n3.zones = [1, 1];
    n3.bound = Some(0);

    let surfs = vec![
        Surf::new(0, 0),
        Surf::new(SURF_PORTAL | SURF_INVISIBLE | SURF_TWO_SIDED, 0),
        Surf::new(0, 1),
        Surf::new(0, 2),
    ];
    let bounds = vec![Aabb::new(
        Vec3::new(70.0, 15.0, -25.0),
        Vec3::new(80.0, 65.0, 25.0),
    )];
    let actors = vec![
        Actor {
            bound: Aabb::new(Vec3::new(20.0, 5.0, -5.0), Vec3::new(30.0, 15.0, 5.0)),
            node: 0,
        },
        Actor {
            bound: Aabb::new(Vec3::new(70.0, -30.0, -5.0), Vec3::new(80.0, -20.0, 5.0)),
            node: 2,
        },
        Actor {
            bound: Aabb::new(Vec3::new(-20.0, -5.0, -5.0), Vec3::new(-10.0, 5.0, 5.0)),
            node: 0,
        },
    ];

    Level::new(vec![n0, n1, n2, n3], surfs, bounds, verts, actors, 2, 0).unwrap()
}

fn room_a_camera() -> Camera {
    Camera::new(Vec3::ZERO, Vec3::X, FRAC_PI_2, 320, 200)
}

#[test]
fn wall_is_opaque_and_portal_admits_the_far_zone() {
    let level = two_room_level();
    let mut vis = VisTraversal::new();
    vis.run(&level, &room_a_camera());

    // Front wall first, far wall (seen through the doorway) second.
    assert_eq!(vis.opaque(), &[SURF_WALL, SURF_FAR_WALL]);
    // The invisible doorway is in no output list.
    assert!(vis.translucent().is_empty());
    // Camera zone plus the doorway's far zone.
    assert_eq!(vis.zone_mask(), 0b11);
}

#[test]
fn screen_occluded_geometry_is_excluded_despite_its_zone_bit() {
    let level = two_room_level();
    let mut vis = VisTraversal::new();
    vis.run(&level, &room_a_camera());

    // Zone 1 was admitted, yet the quad behind the wall never shows.
    assert_eq!(vis.zone_mask() & 0b10, 0b10);
    assert!(!vis.opaque().contains(&SURF_HIDDEN));
    // Its render bound was probed and found covered before any of its
    // triangles were clipped: only wall, doorway, and far wall got checked.
    assert_eq!(vis.counters().surfs_checked, 3);
}

#[test]
fn actors_are_reported_at_box_granularity() {
    let level = two_room_level();
    let mut vis = VisTraversal::new();
    vis.run(&level, &room_a_camera());

    // The room-A actor and the room-B actor sit in front of the camera; the
    // third is behind it and fails the frustum test.
    assert_eq!(vis.visible_actors(), &[0, 1]);
}

#[test]
fn repeat_runs_are_stable() {
    let level = two_room_level();
    let mut vis = VisTraversal::new();
    vis.run(&level, &room_a_camera());
    let opaque = vis.opaque().to_vec();
    let actors = vis.visible_actors().to_vec();
    let mask = vis.zone_mask();

    // Frame stamps key per run; a second run reports the same world.
    vis.run(&level, &room_a_camera());
    assert_eq!(vis.opaque(), opaque.as_slice());
    assert_eq!(vis.visible_actors(), actors.as_slice());
    assert_eq!(vis.zone_mask(), mask);
}

#[test]
fn occluded_portal_keeps_its_zone_shut() {
    // A wall at x = 25 covering the whole view hides the doorway at x = 50
    // behind it, so the far zone must never be admitted.
    let mut verts = Vec::new();
    let (blocker_v, blocker_n) = quad(
        &mut verts,
        [
            [25.0, -39.6, -24.75],
            [25.0, 39.6, -24.75],
            [25.0, 39.6, 24.75],
            [25.0, -39.6, 24.75],
        ],
    );
    let (door_v, door_n) = quad(
        &mut verts,
        [
            [50.0, -76.0, -45.0],
            [50.0, 0.0, -45.0],
            [50.0, 0.0, 45.0],
            [50.0, -76.0, 45.0],
        ],
    );

    let mut n0 = BspNode::new(Vec4::new(-1.0, 0.0, 0.0, 25.0), 0, blocker_v, blocker_n);
    n0.zones = [0, 0];
    n0.children[BACK] = Some(1);
    let mut n1 = BspNode::new(Vec4::new(-1.0, 0.0, 0.0, 50.0), 1, door_v, door_n);
    n1.zones = [0, 1];

    let surfs = vec![
        Surf::new(0, 0),
        Surf::new(SURF_PORTAL | SURF_INVISIBLE | SURF_TWO_SIDED, 0),
    ];
    let level = Level::new(vec![n0, n1], surfs, Vec::new(), verts, Vec::new(), 2, 0).unwrap();

    let mut vis = VisTraversal::new();
    vis.run(&level, &room_a_camera());
    assert_eq!(vis.opaque(), &[0]);
    // The doorway is fully hidden, so zone 1 stays out of the mask.
    assert_eq!(vis.zone_mask(), 0b01);
}

#[test]
fn zone_gating_skips_unreachable_subtrees() {
    let level = two_room_level();
    let mut vis = VisTraversal::new();

    // From inside room B, looking further away from room A.
    let camera = Camera::new(Vec3::new(150.0, 0.0, 0.0), Vec3::X, FRAC_PI_2, 320, 200);
    vis.run(&level, &camera);
    assert_eq!(vis.zone_mask() & 0b10, 0b10);
    // Every one-sided wall faces the other way; nothing is drawn.
    assert!(vis.opaque().is_empty());
}
