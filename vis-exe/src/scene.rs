//! A small procedural level for demonstrating the visibility engine: two
//! rooms joined by a portal doorway.
//!
//! The camera spawns at the origin of room A (zone 0) looking down +X. The
//! dividing plane at x = 50 carries an opaque wall on the screen-left side
//! and an invisible portal doorway on the right, opening into room B
//! (zone 1). Room B contains, front to back: a small quad tucked entirely
//! behind the wall in screen space (with a render bound so the traversal can
//! cull it wholesale), a translucent window visible through the doorway, and
//! a far wall filling the whole view.

use level::glam::{Vec3, Vec4};
use level::{
    Aabb, Actor, BspNode, Level, LevelError, Surf, BACK, FRONT, SURF_INVISIBLE, SURF_PORTAL,
    SURF_TRANSLUCENT, SURF_TWO_SIDED,
};

fn quad(verts: &mut Vec<Vec3>, corners: [[f32; 3]; 4]) -> (u32, u32) {
    let first = verts.len() as u32;
    for c in corners {
        verts.push(Vec3::from_array(c));
    }
    (first, 4)
}

pub fn two_room_level() -> Result<Level, LevelError> {
    let mut verts = Vec::new();
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
    let (window_v, window_n) = quad(
        &mut verts,
        [
            [90.0, -40.0, -20.0],
            [90.0, -10.0, -20.0],
            [90.0, -10.0, 20.0],
            [90.0, -40.0, 20.0],
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
    let (far_v, far_n) = quad(
        &mut verts,
        [
            [100.0, -200.0, -120.0],
            [100.0, 200.0, -120.0],
            [100.0, 200.0, 120.0],
            [100.0, -200.0, 120.0],
        ],
    );

    let split = Vec4::new(-1.0, 0.0, 0.0, 50.0);

    // Node 0: the dividing plane; opaque wall, doorway chained coplanar.
    let mut n0 = BspNode::new(split, 0, wall_v, wall_n);
    n0.zones = [0, 1];
    n0.plane_link = Some(1);
    n0.children[BACK] = Some(2);

    let mut n1 = BspNode::new(split, 1, door_v, door_n);
    n1.zones = [0, 1];

    // Node 2: the window plane splits room B; hidden quad in front of it,
    // far wall behind.
    let mut n2 = BspNode::new(Vec4::new(-1.0, 0.0, 0.0, 90.0), 2, window_v, window_n);
    n2.zones = [1, 1];
    n2.children[FRONT] = Some(3);
    n2.children[BACK] = Some(4);

    let mut n3 = BspNode::new(Vec4::new(-1.0, 0.0, 0.0, 75.0), 3, hidden_v, hidden_n);
    n3.zones = [1, 1];
    n3.bound = Some(0);

    let mut n4 = BspNode::new(Vec4::new(-1.0, 0.0, 0.0, 100.0), 4, far_v, far_n);
    n4.zones = [1, 1];

    let surfs = vec![
        Surf::new(0, 0),
        Surf::new(SURF_PORTAL | SURF_INVISIBLE | SURF_TWO_SIDED, 0),
        Surf::new(SURF_TRANSLUCENT, 1),
        Surf::new(0, 2),
        Surf::new(0, 3),
    ];
    let bounds = vec![Aabb::new(
        Vec3::new(70.0, 15.0, -25.0),
        Vec3::new(80.0, 65.0, 25.0),
    )];
    let actors = vec![
        // Room A, straight ahead.
        Actor {
            bound: Aabb::new(Vec3::new(20.0, 5.0, -5.0), Vec3::new(30.0, 15.0, 5.0)),
            node: 0,
        },
        // Room B, in the doorway's view.
        Actor {
            bound: Aabb::new(Vec3::new(70.0, -30.0, -5.0), Vec3::new(80.0, -20.0, 5.0)),
            node: 4,
        },
        // Behind the camera.
        Actor {
            bound: Aabb::new(Vec3::new(-20.0, -5.0, -5.0), Vec3::new(-10.0, 5.0, 5.0)),
            node: 0,
        },
    ];

    Level::new(vec![n0, n1, n2, n3, n4], surfs, bounds, verts, actors, 2, 0)
}
